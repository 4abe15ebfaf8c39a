//! Reconstruction of domain objects from HAL documents.
//!
//! Own attributes are copied verbatim (case conversion is not reversed).
//! Relationships come back either as full objects or, when only a link is
//! available, as the identifier taken from the last segment of its href.

use crate::embedded::{EMBEDDED, LINKS};
use crate::shape::is_blank;
use halkit_model::{Result, SchemaRegistry, convert_case};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub struct Deserializer<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Deserializer<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Deserializes a single-resource document, or a collection document
    /// whose `_embedded[type_name]` is an array.
    pub fn deserialize(
        &self,
        type_name: &str,
        document: &Value,
        schema_name: &str,
    ) -> Result<Option<Value>> {
        self.registry.get(type_name, schema_name)?;

        let collection = document
            .get(EMBEDDED)
            .and_then(|embedded| embedded.get(type_name))
            .and_then(Value::as_array);

        if let Some(items) = collection {
            debug!("Deserializing {} {} documents", items.len(), type_name);
            let resources = items
                .iter()
                .map(|item| self.deserialize_resource(type_name, item, schema_name))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Some(Value::Array(resources)));
        }

        debug!("Deserializing {} document", type_name);
        let resource = self.deserialize_resource(type_name, document, schema_name)?;
        Ok((!is_blank(&resource)).then_some(resource))
    }

    /// Rebuilds one resource: attributes plus every declared relationship
    /// found in `_embedded` or, failing that, in `_links`.
    pub fn deserialize_resource(
        &self,
        type_name: &str,
        document: &Value,
        schema_name: &str,
    ) -> Result<Value> {
        let schema = self.registry.get(type_name, schema_name)?;
        let Some(doc) = document.as_object() else {
            return Ok(document.clone());
        };

        let mut resource: Map<String, Value> = doc
            .iter()
            .filter(|(key, _)| key.as_str() != LINKS && key.as_str() != EMBEDDED)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let embedded = doc.get(EMBEDDED).and_then(Value::as_object);
        let links = doc.get(LINKS).and_then(Value::as_object);

        for (relation, spec) in &schema.embedded {
            let converted = schema.convert_case.map(|style| convert_case(relation, style));
            let body = embedded.and_then(|e| {
                e.get(relation)
                    .or_else(|| converted.as_deref().and_then(|key| e.get(key)))
            });

            let value = match body {
                Some(Value::Array(items)) => {
                    let mut values = Vec::with_capacity(items.len());
                    for item in items {
                        let resolved =
                            self.deserialize_embedded(&spec.type_name, item, &spec.schema)?;
                        if let Some(v) = resolved {
                            values.push(v);
                        }
                    }
                    Some(Value::Array(values))
                }
                Some(single) => self.deserialize_embedded(&spec.type_name, single, &spec.schema)?,
                None => links
                    .and_then(|l| l.get(relation))
                    .and_then(identifiers_from_link),
            };

            if let Some(value) = value {
                resource.insert(relation.clone(), value);
            }
        }

        if let Some(embedded) = embedded {
            for key in embedded.keys() {
                let declared = schema.embedded.keys().any(|relation| {
                    relation == key
                        || schema
                            .convert_case
                            .is_some_and(|style| convert_case(relation, style) == *key)
                });
                if !declared {
                    warn!("Ignoring undeclared embedded relation {} on {}", key, type_name);
                }
            }
        }

        Ok(Value::Object(resource))
    }

    /// Deserializes one related document. A document holding nothing but
    /// `_links.self.href` is unpopulated and yields the bare identifier.
    pub fn deserialize_embedded(
        &self,
        type_name: &str,
        document: &Value,
        schema_name: &str,
    ) -> Result<Option<Value>> {
        if let Some(id) = self_link_identifier(document) {
            return Ok(Some(Value::String(id)));
        }

        let resource = self.deserialize_resource(type_name, document, schema_name)?;
        Ok((!is_blank(&resource)).then_some(resource))
    }
}

/// Returns the identifier of a document shaped exactly like
/// `{"_links": {"self": {"href": "..."}}}`.
fn self_link_identifier(document: &Value) -> Option<String> {
    let doc = document.as_object().filter(|d| d.len() == 1)?;
    let links = doc.get(LINKS)?.as_object().filter(|l| l.len() == 1)?;
    let this = links.get("self")?.as_object().filter(|s| s.len() == 1)?;
    trailing_segment(this.get("href")?.as_str()?)
}

/// Extracts identifiers from a relation link (`{"href": ...}` or
/// `{"self": {"href": ...}}`) or an array of them.
fn identifiers_from_link(link: &Value) -> Option<Value> {
    match link {
        Value::Array(items) => {
            let ids: Vec<Value> = items
                .iter()
                .filter_map(href_of)
                .filter_map(trailing_segment)
                .map(Value::String)
                .collect();
            (!ids.is_empty()).then_some(Value::Array(ids))
        }
        single => href_of(single)
            .and_then(trailing_segment)
            .map(Value::String),
    }
}

fn href_of(link: &Value) -> Option<&str> {
    link.get("href")
        .or_else(|| link.get("self").and_then(|s| s.get("href")))
        .and_then(Value::as_str)
}

/// The last non-empty path segment of `href`, ignoring query and fragment.
pub(crate) fn trailing_segment(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
