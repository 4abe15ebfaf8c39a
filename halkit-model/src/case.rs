//! Key case conversion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Target casing for serialized attribute keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStyle {
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "camelCase")]
    CamelCase,
}

/// Rewrites `name` into `style`.
///
/// Words are split on `_`, `-` and spaces, and on lower-to-upper case
/// boundaries (`createdAt` -> `created`, `At`). A run of capitals followed by
/// a lowercase letter starts a new word at its last capital
/// (`HTMLParser` -> `HTML`, `Parser`). Leading underscores are kept so that
/// keys such as `_id` survive conversion.
pub fn convert_case(name: &str, style: CaseStyle) -> String {
    let body = name.trim_start_matches('_');
    let prefix = &name[..name.len() - body.len()];

    let words = split_words(body);
    let joined = match style {
        CaseStyle::SnakeCase => join_lower(&words, "_"),
        CaseStyle::KebabCase => join_lower(&words, "-"),
        CaseStyle::CamelCase => {
            let mut out = String::with_capacity(body.len());
            for (i, word) in words.iter().enumerate() {
                let lower = word.to_lowercase();
                if i == 0 {
                    out.push_str(&lower);
                } else {
                    let mut chars = lower.chars();
                    if let Some(first) = chars.next() {
                        out.extend(first.to_uppercase());
                        out.push_str(chars.as_str());
                    }
                }
            }
            out
        }
    };

    format!("{prefix}{joined}")
}

/// Recursively rewrites the keys of every object inside `value`.
/// Values themselves are never touched.
pub fn convert_keys(value: Value, style: CaseStyle) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (convert_case(&k, style), convert_keys(v, style)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| convert_keys(v, style)).collect())
        }
        other => other,
    }
}

fn join_lower(words: &[String], separator: &str) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
