//! Recursive resolution of resources and their relationships.
//!
//! A relationship value is either populated (a full object, serialized under
//! `_embedded`) or unpopulated (a bare identifier, surfaced only through the
//! parent's `_links`). The link of a relationship is written into the
//! parent's link set as a side effect of resolving it, independently of
//! whether a body was produced.

use crate::projector::project;
use crate::shape::{Shape, is_blank};
use halkit_model::{EmbeddedSpec, Result, Schema, SchemaRegistry, convert_case};
use serde_json::{Map, Value};
use tracing::trace;

pub(crate) const LINKS: &str = "_links";
pub(crate) const EMBEDDED: &str = "_embedded";

/// Serializes resource payloads against registered schemas.
pub struct EmbeddedResolver<'a> {
    registry: &'a SchemaRegistry,
    extra: &'a Value,
}

impl<'a> EmbeddedResolver<'a> {
    /// `extra` is passed as the context argument to every link function.
    pub fn new(registry: &'a SchemaRegistry, extra: &'a Value) -> Self {
        Self { registry, extra }
    }

    /// Serializes a single resource or a collection of them.
    ///
    /// Empty payloads map to `null` (or `[]` for an empty array). A
    /// collection becomes a document whose `_embedded[type_name]` holds the
    /// serialized elements in input order.
    pub fn serialize_data(&self, type_name: &str, data: &Value, schema: &Schema) -> Result<Value> {
        match Shape::of(data) {
            Shape::Empty { array } => Ok(Shape::empty_value(array)),
            Shape::Array(items) => {
                let docs = items
                    .iter()
                    .map(|item| self.serialize_data(type_name, item, schema))
                    .collect::<Result<Vec<_>>>()?;
                Ok(collection(type_name, docs))
            }
            Shape::Composite(_) | Shape::Identifier(_) => {
                self.serialize_resource(data, schema).map(Value::Object)
            }
        }
    }

    /// Serializes one resource: own links, projected attributes, then every
    /// declared relationship.
    pub fn serialize_resource(&self, data: &Value, schema: &Schema) -> Result<Map<String, Value>> {
        let mut links = schema.links.resolve(data, self.extra)?.unwrap_or_default();
        let mut doc = data
            .as_object()
            .map(|attributes| project(attributes, schema))
            .unwrap_or_default();

        let mut embedded = Map::new();
        for (relation, spec) in &schema.embedded {
            let target = self.registry.get(&spec.type_name, &spec.schema)?;
            let value = data.get(relation).unwrap_or(&Value::Null);

            let resolved =
                self.serialize_embedded_resource(relation, value, spec, target, &mut links)?;
            if let Some(resolved) = resolved.filter(|v| !is_blank(v)) {
                let key = match schema.convert_case {
                    Some(style) => convert_case(relation, style),
                    None => relation.clone(),
                };
                embedded.insert(key, resolved);
            }
        }

        if !links.is_empty() {
            doc.insert(LINKS.to_string(), Value::Object(links));
        }
        if !embedded.is_empty() {
            doc.insert(EMBEDDED.to_string(), Value::Object(embedded));
        }
        Ok(doc)
    }

    /// Resolves one relationship value.
    ///
    /// Returns the populated body, if any, carrying only the target schema's
    /// links. The relationship's link, if any, is written to
    /// `parent_links[relation]`: assigned for a to-one value, appended when
    /// resolving the elements of a to-many value.
    pub fn serialize_embedded_resource(
        &self,
        relation: &str,
        value: &Value,
        spec: &EmbeddedSpec,
        target: &Schema,
        parent_links: &mut Map<String, Value>,
    ) -> Result<Option<Value>> {
        match Shape::of(value) {
            Shape::Empty { array } => Ok(Some(Shape::empty_value(array))),
            Shape::Array(items) => {
                trace!("Resolving to-many relationship {} ({} items)", relation, items.len());
                parent_links.insert(relation.to_string(), Value::Array(Vec::new()));

                let mut docs = Vec::with_capacity(items.len());
                for item in items {
                    let resolved = self.serialize_embedded_resource(
                        relation,
                        item,
                        spec,
                        target,
                        parent_links,
                    )?;
                    if let Some(doc) = resolved.filter(|d| !d.is_null()) {
                        docs.push(doc);
                    }
                }

                if matches!(parent_links.get(relation), Some(Value::Array(acc)) if acc.is_empty()) {
                    parent_links.remove(relation);
                }
                Ok((!docs.is_empty()).then_some(Value::Array(docs)))
            }
            shape => {
                let relation_links = spec.links.resolve(value, self.extra)?;

                let body = match shape {
                    Shape::Composite(_) => {
                        Some(Value::Object(self.serialize_resource(value, target)?))
                    }
                    _ => {
                        trace!("Relationship {} is unpopulated", relation);
                        None
                    }
                };

                if let Some(links) = relation_links {
                    match parent_links.get_mut(relation) {
                        Some(Value::Array(acc)) => acc.push(Value::Object(links)),
                        _ => {
                            parent_links.insert(relation.to_string(), Value::Object(links));
                        }
                    }
                }

                Ok(body)
            }
        }
    }
}

/// Wraps serialized documents as `{"_embedded": {type_name: docs}}`.
pub(crate) fn collection(type_name: &str, docs: Vec<Value>) -> Value {
    let mut embedded = Map::new();
    embedded.insert(type_name.to_string(), Value::Array(docs));

    let mut doc = Map::new();
    doc.insert(EMBEDDED.to_string(), Value::Object(embedded));
    Value::Object(doc)
}
