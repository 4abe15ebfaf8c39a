//! Cooperative serialization of large collections.
//!
//! [`serialize_async`] produces the same document as
//! [`serialize`](crate::serializer::serialize), but hands control back to the
//! scheduler between collection elements so a long collection does not hold
//! the thread for its whole duration.

use crate::embedded::{EmbeddedResolver, collection};
use crate::serializer::{close_envelope, open_envelope, serialize};
use halkit_model::{Result, SchemaRegistry};
use serde_json::Value;
use tracing::debug;

/// A point at which the serializer gives up the thread for one tick.
pub trait YieldPoint {
    fn yield_now(&self) -> impl Future<Output = ()> + Send;
}

/// Yields to the tokio scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioYield;

impl YieldPoint for TokioYield {
    fn yield_now(&self) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}

/// Serializes `data`, yielding once between consecutive collection elements.
///
/// Non-collection payloads complete without yielding. Elements are processed
/// strictly in input order and every element is processed; the first error
/// ends the future with `Err`.
pub async fn serialize_async<Y: YieldPoint>(
    registry: &SchemaRegistry,
    type_name: &str,
    data: &Value,
    schema_name: &str,
    extra: &Value,
    yielder: &Y,
) -> Result<Value> {
    let schema = registry.get(type_name, schema_name)?;

    let items = match data {
        Value::Array(items) if !items.is_empty() => items,
        _ => return serialize(registry, type_name, data, schema_name, extra),
    };
    debug!(
        "Serializing {} items of {} with schema {} cooperatively",
        items.len(),
        type_name,
        schema_name
    );

    let envelope = open_envelope(schema, data, extra)?;
    let resolver = EmbeddedResolver::new(registry, extra);

    let mut docs = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            yielder.yield_now().await;
        }
        docs.push(resolver.serialize_data(type_name, item, schema)?);
    }

    Ok(close_envelope(envelope, type_name, collection(type_name, docs)))
}
