//! Top-level envelope assembly.

use crate::embedded::{EMBEDDED, EmbeddedResolver, LINKS};
use halkit_model::{Result, Schema, SchemaRegistry};
use serde_json::{Map, Value};
use tracing::debug;

/// Serializes `data` of type `type_name` with the named schema.
///
/// The envelope is assembled in order: top-level `_links`, top-level meta
/// merged flat, then the resource or collection body. Later keys overwrite
/// earlier ones. Top-level options are resolved with `extra` as data and
/// the raw payload as context.
pub fn serialize(
    registry: &SchemaRegistry,
    type_name: &str,
    data: &Value,
    schema_name: &str,
    extra: &Value,
) -> Result<Value> {
    let schema = registry.get(type_name, schema_name)?;
    debug!(
        "Serializing {} with schema {} ({})",
        type_name,
        schema_name,
        payload_kind(data)
    );

    let envelope = open_envelope(schema, data, extra)?;
    let body = EmbeddedResolver::new(registry, extra).serialize_data(type_name, data, schema)?;
    Ok(close_envelope(envelope, type_name, body))
}

/// Resolves top-level links and meta into a fresh envelope.
pub(crate) fn open_envelope(
    schema: &Schema,
    data: &Value,
    extra: &Value,
) -> Result<Map<String, Value>> {
    let mut envelope = Map::new();
    if let Some(links) = schema.top_level_links.resolve(extra, data)? {
        envelope.insert(LINKS.to_string(), Value::Object(links));
    }
    if let Some(meta) = schema.top_level_meta.resolve(extra, data)? {
        envelope.extend(meta);
    }
    Ok(envelope)
}

/// Merges the serialized body into the envelope.
///
/// An empty collection body is `[]` on its own, or `_embedded[type_name] = []`
/// next to top-level links/meta. An empty single body adds nothing. An
/// envelope left with no keys is `null`.
pub(crate) fn close_envelope(
    mut envelope: Map<String, Value>,
    type_name: &str,
    body: Value,
) -> Value {
    match body {
        Value::Object(doc) => envelope.extend(doc),
        Value::Array(docs) if envelope.is_empty() => return Value::Array(docs),
        Value::Array(docs) => {
            let mut embedded = Map::new();
            embedded.insert(type_name.to_string(), Value::Array(docs));
            envelope.insert(EMBEDDED.to_string(), Value::Object(embedded));
        }
        _ => {}
    }

    if envelope.is_empty() {
        Value::Null
    } else {
        Value::Object(envelope)
    }
}

pub(crate) fn payload_kind(data: &Value) -> &'static str {
    match data {
        Value::Array(items) if items.is_empty() => "empty collection",
        Value::Array(_) => "collection",
        Value::Object(_) => "resource",
        Value::Null => "null",
        _ => "identifier",
    }
}
