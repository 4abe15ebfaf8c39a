//! Declarative schema options.
//!
//! [`SchemaOptions`] is the data-only form of a [`Schema`]: it can be read
//! from JSON or TOML and is checked against the recognized option grammar
//! before it becomes a schema. Function-valued options cannot be expressed
//! here; use the [`Schema`] builders for those.

use crate::{DEFAULT_SCHEMA, CaseStyle, EmbeddedSpec, HalError, OptionSpec, Result, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Recognized registration options, with their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaOptions {
    #[serde(default)]
    pub blacklist: StringList,
    #[serde(default)]
    pub whitelist: StringList,
    #[serde(default)]
    pub links: Map<String, Value>,
    #[serde(default)]
    pub embedded: BTreeMap<String, EmbeddedOptions>,
    #[serde(default)]
    pub top_level_links: Map<String, Value>,
    #[serde(default)]
    pub top_level_meta: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert_case: Option<CaseStyle>,
}

/// A list of strings that may also be written as a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    One(String),
    Many(Vec<String>),
}

impl Default for StringList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl StringList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

/// Options of one relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddedOptions {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub links: Map<String, Value>,
}

impl SchemaOptions {
    /// Parses options from an arbitrary JSON value. `null` means all
    /// defaults; anything that does not fit the grammar is a
    /// [`HalError::ConfigValidation`].
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let options: Self = serde_json::from_value(value)
            .map_err(|e| HalError::ConfigValidation(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks constraints the serde shape alone cannot express.
    pub fn validate(&self) -> Result<()> {
        for (name, relation) in &self.embedded {
            if name.is_empty() {
                return Err(HalError::ConfigValidation(
                    "embedded relationship names must not be empty".into(),
                ));
            }
            if relation.type_name.is_empty() {
                return Err(HalError::ConfigValidation(format!(
                    "embedded relationship {name} requires a type"
                )));
            }
            if relation.schema.as_deref() == Some("") {
                return Err(HalError::ConfigValidation(format!(
                    "embedded relationship {name} has an empty schema name"
                )));
            }
        }
        Ok(())
    }

    /// Validates and converts into a [`Schema`].
    pub fn into_schema(self) -> Result<Schema> {
        self.validate()?;

        let embedded = self
            .embedded
            .into_iter()
            .map(|(name, relation)| {
                let spec = EmbeddedSpec::new(relation.type_name)
                    .schema(relation.schema.unwrap_or_else(|| DEFAULT_SCHEMA.to_string()))
                    .links(OptionSpec::literal(relation.links));
                (name, spec)
            })
            .collect();

        Ok(Schema {
            blacklist: self.blacklist.into_vec(),
            whitelist: self.whitelist.into_vec(),
            links: OptionSpec::literal(self.links),
            top_level_links: OptionSpec::literal(self.top_level_links),
            top_level_meta: OptionSpec::literal(self.top_level_meta),
            embedded,
            convert_case: self.convert_case,
        })
    }
}

impl TryFrom<SchemaOptions> for Schema {
    type Error = HalError;

    fn try_from(options: SchemaOptions) -> Result<Self> {
        options.into_schema()
    }
}
