//! File-backed schema catalogs.
//!
//! A catalog declares many schemas at once, one table per type and schema
//! name:
//!
//! ```toml
//! [article.default]
//! blacklist = ["updated"]
//!
//! [article.default.embedded.author]
//! type = "people"
//!
//! [comment.only-body]
//! whitelist = "body"
//! ```

use crate::{HalError, Result, SchemaOptions, SchemaRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Declarative schemas grouped by type, then by schema name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaCatalog {
    pub types: BTreeMap<String, BTreeMap<String, SchemaOptions>>,
}

impl SchemaCatalog {
    /// Parses a TOML catalog.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        // Go through a generic value first so TOML syntax errors and
        // grammar violations are reported as different error kinds.
        let raw: toml::Table = toml::from_str(contents)?;
        let value = serde_json::to_value(raw)?;
        Self::from_value(value)
    }

    /// Parses a JSON catalog.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self> {
        let catalog: Self = serde_json::from_value(value)
            .map_err(|e| HalError::ConfigValidation(e.to_string()))?;
        for variants in catalog.types.values() {
            for options in variants.values() {
                options.validate()?;
            }
        }
        Ok(catalog)
    }

    /// Reads a catalog from disk. Files ending in `.json` are parsed as
    /// JSON, everything else as TOML.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };
        info!(
            "Loaded schema catalog from {:?} ({} types)",
            path,
            catalog.types.len()
        );
        Ok(catalog)
    }

    /// Registers every schema of the catalog. Returns how many were added.
    pub fn register_into(self, registry: &mut SchemaRegistry) -> Result<usize> {
        let mut count = 0;
        for (type_name, variants) in self.types {
            for (schema_name, options) in variants {
                registry.register_options(type_name.clone(), schema_name, options)?;
                count += 1;
            }
        }
        Ok(count)
    }
}
