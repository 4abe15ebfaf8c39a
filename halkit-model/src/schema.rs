use crate::{CaseStyle, OptionSpec};
use std::collections::BTreeMap;

/// Name used when a schema variant is not specified.
pub const DEFAULT_SCHEMA: &str = "default";

/// Describes how one resource type is mapped to and from HAL.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Attribute keys removed from the resource's own attributes.
    pub blacklist: Vec<String>,
    /// When non-empty, only these keys are considered as attributes.
    pub whitelist: Vec<String>,
    /// Per-resource links, resolved against each resource.
    pub links: OptionSpec,
    /// Envelope links, resolved against the caller's extra options.
    pub top_level_links: OptionSpec,
    /// Envelope fields, resolved against the caller's extra options.
    pub top_level_meta: OptionSpec,
    /// Relationships keyed by the field name holding them.
    pub embedded: BTreeMap<String, EmbeddedSpec>,
    pub convert_case: Option<CaseStyle>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blacklist<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn whitelist<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn links(mut self, links: OptionSpec) -> Self {
        self.links = links;
        self
    }

    pub fn top_level_links(mut self, links: OptionSpec) -> Self {
        self.top_level_links = links;
        self
    }

    pub fn top_level_meta(mut self, meta: OptionSpec) -> Self {
        self.top_level_meta = meta;
        self
    }

    /// Declares a relationship stored under `field`.
    pub fn embed(mut self, field: impl Into<String>, spec: EmbeddedSpec) -> Self {
        self.embedded.insert(field.into(), spec);
        self
    }

    pub fn convert_case(mut self, style: CaseStyle) -> Self {
        self.convert_case = Some(style);
        self
    }

    /// Returns true if `key` names a declared relationship.
    pub fn is_relationship(&self, key: &str) -> bool {
        self.embedded.contains_key(key)
    }
}

/// Configuration of a single relationship.
#[derive(Debug, Clone)]
pub struct EmbeddedSpec {
    /// Registered resource type of the related objects.
    pub type_name: String,
    /// Schema variant used for populated related objects.
    pub schema: String,
    /// Links resolved against the raw relationship value, which may be a
    /// full object or a bare identifier.
    pub links: OptionSpec,
}

impl EmbeddedSpec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            schema: DEFAULT_SCHEMA.to_string(),
            links: OptionSpec::default(),
        }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn links(mut self, links: OptionSpec) -> Self {
        self.links = links;
        self
    }
}
