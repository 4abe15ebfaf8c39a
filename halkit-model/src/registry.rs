use crate::{HalError, Result, Schema, SchemaOptions};
use std::collections::HashMap;
use tracing::debug;

/// Schemas keyed by `(type, schema name)`.
///
/// Filled by explicit registration before any mapping call and only read
/// afterwards. Registering the same pair twice replaces the earlier schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, HashMap<String, Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `schema` under `(type_name, schema_name)`, replacing any
    /// previous entry.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        schema_name: impl Into<String>,
        schema: Schema,
    ) {
        let type_name = type_name.into();
        let schema_name = schema_name.into();
        debug!(
            "Registering schema {} for type {} ({} relationships)",
            schema_name,
            type_name,
            schema.embedded.len()
        );
        self.schemas
            .entry(type_name)
            .or_default()
            .insert(schema_name, schema);
    }

    /// Validates declarative options and registers the resulting schema.
    pub fn register_options(
        &mut self,
        type_name: impl Into<String>,
        schema_name: impl Into<String>,
        options: SchemaOptions,
    ) -> Result<()> {
        let schema = options.into_schema()?;
        self.register(type_name, schema_name, schema);
        Ok(())
    }

    /// Looks up a schema, distinguishing an unknown type from an unknown
    /// schema variant of a known type.
    pub fn get(&self, type_name: &str, schema_name: &str) -> Result<&Schema> {
        let variants = self
            .schemas
            .get(type_name)
            .ok_or_else(|| HalError::UnregisteredType(type_name.to_string()))?;

        variants
            .get(schema_name)
            .ok_or_else(|| HalError::UnregisteredSchema {
                type_name: type_name.to_string(),
                schema: schema_name.to_string(),
            })
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    /// Sorted schema names registered for `type_name`.
    pub fn schema_names(&self, type_name: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .schemas
            .get(type_name)
            .map(|variants| variants.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Total number of registered `(type, schema)` pairs.
    pub fn len(&self) -> usize {
        self.schemas.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
