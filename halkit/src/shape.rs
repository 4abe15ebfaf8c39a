use serde_json::{Map, Value};

/// The closed set of payload shapes the mapper distinguishes.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// `null`, `{}`, `[]` or `""`.
    Empty { array: bool },
    Array(&'a [Value]),
    /// A non-empty object: a populated resource body.
    Composite(&'a Map<String, Value>),
    /// A string, number or boolean standing in for a related resource.
    Identifier(&'a Value),
}

impl<'a> Shape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Empty { array: false },
            Value::Array(items) if items.is_empty() => Self::Empty { array: true },
            Value::Array(items) => Self::Array(items),
            Value::Object(map) if map.is_empty() => Self::Empty { array: false },
            Value::Object(map) => Self::Composite(map),
            Value::String(s) if s.is_empty() => Self::Empty { array: false },
            scalar => Self::Identifier(scalar),
        }
    }

    /// The value an empty payload maps to: `[]` for arrays, `null` otherwise.
    pub fn empty_value(array: bool) -> Value {
        if array {
            Value::Array(Vec::new())
        } else {
            Value::Null
        }
    }
}

/// Lodash-style emptiness used to decide whether a result is kept.
pub(crate) fn is_blank(value: &Value) -> bool {
    matches!(Shape::of(value), Shape::Empty { .. })
}
