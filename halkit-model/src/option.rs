//! Function-or-literal option values and their evaluation.
//!
//! Link and meta options can be configured either as plain JSON literals or
//! as functions of the data being serialized. Both forms go through a single
//! entry point, [`OptionSpec::resolve`], which yields a plain mapping with
//! undefined entries removed, or `None` when nothing is left.

use crate::{HalError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Computes a single option value from `(data, context)`.
/// Returning `Ok(None)` marks the value as undefined and drops the key.
pub type FieldResolver =
    Arc<dyn Fn(&Value, &Value) -> anyhow::Result<Option<Value>> + Send + Sync>;

/// Computes a whole option mapping from `(data, context)`.
/// The returned value must be a JSON object, `null`, or `None`.
pub type MappingResolver =
    Arc<dyn Fn(&Value, &Value) -> anyhow::Result<Option<Value>> + Send + Sync>;

/// One entry of a literal option mapping.
#[derive(Clone)]
pub enum OptionValue {
    Literal(Value),
    Resolver(FieldResolver),
}

impl OptionValue {
    /// Wraps a closure as a computed value.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        Self::Resolver(Arc::new(f))
    }

    fn evaluate(&self, data: &Value, context: &Value) -> Result<Option<Value>> {
        match self {
            Self::Literal(value) => Ok(Some(value.clone())),
            Self::Resolver(f) => f(data, context).map_err(HalError::Resolver),
        }
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Resolver(_) => f.write_str("Resolver(<fn>)"),
        }
    }
}

/// A configured option: either a mapping of key to value-or-function, or one
/// function producing the whole mapping.
#[derive(Clone)]
pub enum OptionSpec {
    Fields(BTreeMap<String, OptionValue>),
    Resolver(MappingResolver),
}

impl Default for OptionSpec {
    fn default() -> Self {
        Self::Fields(BTreeMap::new())
    }
}

impl OptionSpec {
    /// An empty literal mapping. Always resolves to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single function producing the whole mapping.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        Self::Resolver(Arc::new(f))
    }

    /// A mapping made only of literal values.
    pub fn literal(map: Map<String, Value>) -> Self {
        Self::Fields(
            map.into_iter()
                .map(|(k, v)| (k, OptionValue::Literal(v)))
                .collect(),
        )
    }

    /// Adds (or replaces) a key. Turns a function spec into a field mapping.
    pub fn field(self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        let mut fields = match self {
            Self::Fields(fields) => fields,
            Self::Resolver(_) => BTreeMap::new(),
        };
        fields.insert(key.into(), value.into());
        Self::Fields(fields)
    }

    /// Adds a computed key.
    pub fn field_fn<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.field(key, OptionValue::from_fn(f))
    }

    /// True for an empty literal mapping.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Fields(fields) if fields.is_empty())
    }

    /// Evaluates the option against `data`, passing `context` through to
    /// every function. Undefined entries are dropped and an empty result is
    /// reported as `None`.
    pub fn resolve(&self, data: &Value, context: &Value) -> Result<Option<Map<String, Value>>> {
        let resolved = match self {
            Self::Resolver(f) => match f(data, context).map_err(HalError::Resolver)? {
                None | Some(Value::Null) => Map::new(),
                Some(Value::Object(map)) => map,
                Some(other) => {
                    return Err(HalError::Resolver(anyhow::anyhow!(
                        "option function must return an object, got {other}"
                    )));
                }
            },
            Self::Fields(fields) => {
                let mut map = Map::new();
                for (key, value) in fields {
                    if let Some(v) = value.evaluate(data, context)? {
                        map.insert(key.clone(), v);
                    }
                }
                map
            }
        };

        Ok((!resolved.is_empty()).then_some(resolved))
    }
}

impl From<Map<String, Value>> for OptionSpec {
    fn from(map: Map<String, Value>) -> Self {
        Self::literal(map)
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            Self::Resolver(_) => f.write_str("Resolver(<fn>)"),
        }
    }
}
