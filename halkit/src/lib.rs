//! Schema-driven mapping between domain objects and HAL+JSON.
//!
//! Resources are plain `serde_json` values. A [`HalSerializer`] owns a
//! [`SchemaRegistry`] describing, per resource type and schema name, which
//! attributes are exposed, which links are generated, and which fields hold
//! relationships to other registered types.
//!
//! - [`HalSerializer::serialize`] builds the HAL envelope: top-level
//!   `_links` and meta, the resource (or `_embedded[type]` collection), and
//!   recursively resolved `_embedded` relationships.
//! - [`HalSerializer::serialize_async`] does the same for collections while
//!   yielding to the scheduler between elements.
//! - [`HalSerializer::deserialize`] maps a HAL document back to a domain
//!   object, recovering unpopulated relationships from link hrefs.

mod deserializer;
mod embedded;
mod projector;
mod serializer;
mod shape;
mod stream;

pub use deserializer::Deserializer;
pub use embedded::EmbeddedResolver;
pub use halkit_model::{
    CaseStyle, DEFAULT_SCHEMA, EmbeddedOptions, EmbeddedSpec, HalError, OptionSpec, OptionValue,
    Result, Schema, SchemaCatalog, SchemaOptions, SchemaRegistry, convert_case, convert_keys,
};
pub use projector::project;
pub use shape::Shape;
pub use stream::{TokioYield, YieldPoint};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// Maps domain objects to and from HAL documents using registered schemas.
#[derive(Debug, Clone, Default)]
pub struct HalSerializer {
    registry: SchemaRegistry,
}

impl HalSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already populated registry.
    pub fn with_registry(registry: SchemaRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Registers `schema` as the `"default"` schema of `type_name`.
    pub fn register_default(&mut self, type_name: impl Into<String>, schema: Schema) {
        self.registry.register(type_name, DEFAULT_SCHEMA, schema);
    }

    /// Registers `schema` under `(type_name, schema_name)`, replacing any
    /// previous registration of that pair.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        schema_name: impl Into<String>,
        schema: Schema,
    ) {
        self.registry.register(type_name, schema_name, schema);
    }

    /// Validates declarative options given as JSON and registers them.
    /// `None` as schema name means `"default"`; `null` options mean all
    /// defaults.
    pub fn register_json(
        &mut self,
        type_name: impl Into<String>,
        schema_name: Option<&str>,
        options: Value,
    ) -> Result<()> {
        let options = SchemaOptions::from_value(options)?;
        self.registry.register_options(
            type_name,
            schema_name.unwrap_or(DEFAULT_SCHEMA),
            options,
        )
    }

    /// Loads a TOML or JSON schema catalog and registers all of it.
    pub fn load_catalog(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        SchemaCatalog::load_from(path)?.register_into(&mut self.registry)
    }

    /// Serializes a resource or a collection. `extra` feeds the top-level
    /// links and meta and is passed as context to every link function;
    /// `Value::Null` stands for no extra options.
    pub fn serialize(
        &self,
        type_name: &str,
        data: &Value,
        schema_name: Option<&str>,
        extra: &Value,
    ) -> Result<Value> {
        serializer::serialize(
            &self.registry,
            type_name,
            data,
            schema_name.unwrap_or(DEFAULT_SCHEMA),
            extra,
        )
    }

    /// Like [`serialize`](Self::serialize), yielding to the tokio scheduler
    /// between collection elements. Resolves to the same document.
    pub async fn serialize_async(
        &self,
        type_name: &str,
        data: &Value,
        schema_name: Option<&str>,
        extra: &Value,
    ) -> Result<Value> {
        self.serialize_async_with(&TokioYield, type_name, data, schema_name, extra)
            .await
    }

    /// Like [`serialize_async`](Self::serialize_async) with a caller-provided
    /// yield point.
    pub async fn serialize_async_with<Y: YieldPoint>(
        &self,
        yielder: &Y,
        type_name: &str,
        data: &Value,
        schema_name: Option<&str>,
        extra: &Value,
    ) -> Result<Value> {
        stream::serialize_async(
            &self.registry,
            type_name,
            data,
            schema_name.unwrap_or(DEFAULT_SCHEMA),
            extra,
            yielder,
        )
        .await
    }

    /// Maps a HAL document back to a resource, or to an array of resources
    /// for a collection document. `None` when nothing could be recovered.
    pub fn deserialize(
        &self,
        type_name: &str,
        document: &Value,
        schema_name: Option<&str>,
    ) -> Result<Option<Value>> {
        Deserializer::new(&self.registry).deserialize(
            type_name,
            document,
            schema_name.unwrap_or(DEFAULT_SCHEMA),
        )
    }

    /// Serializes any `Serialize` value.
    pub fn to_hal<T: Serialize + ?Sized>(
        &self,
        type_name: &str,
        data: &T,
        schema_name: Option<&str>,
        extra: &Value,
    ) -> Result<Value> {
        let data = serde_json::to_value(data)?;
        self.serialize(type_name, &data, schema_name, extra)
    }

    /// Deserializes a HAL document into `T`.
    pub fn from_hal<T: DeserializeOwned>(
        &self,
        type_name: &str,
        document: &Value,
        schema_name: Option<&str>,
    ) -> Result<Option<T>> {
        self.deserialize(type_name, document, schema_name)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(HalError::from)
    }
}
