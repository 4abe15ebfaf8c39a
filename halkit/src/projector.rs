//! Attribute projection: the resource's own fields as they appear in the
//! serialized document.

use halkit_model::{Schema, convert_case, convert_keys};
use serde_json::{Map, Value};

/// Selects the plain attributes of `resource`.
///
/// The whitelist narrows first; relationship keys and blacklisted keys are
/// then removed, so a whitelisted relationship key is still dropped. Case
/// conversion runs last so filtering always sees the original keys.
pub fn project(resource: &Map<String, Value>, schema: &Schema) -> Map<String, Value> {
    let whitelisted =
        |key: &str| schema.whitelist.is_empty() || schema.whitelist.iter().any(|w| w == key);
    let blacklisted = |key: &str| schema.blacklist.iter().any(|b| b == key);

    resource
        .iter()
        .filter(|(key, _)| {
            let key = key.as_str();
            whitelisted(key) && !schema.is_relationship(key) && !blacklisted(key)
        })
        .map(|(key, value)| match schema.convert_case {
            Some(style) => (convert_case(key, style), convert_keys(value.clone(), style)),
            None => (key.clone(), value.clone()),
        })
        .collect()
}
