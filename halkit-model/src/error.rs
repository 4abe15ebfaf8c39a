//! Error types shared by the model and the mapping engine.

use thiserror::Error;

/// Result type alias using [`HalError`].
pub type Result<T> = std::result::Result<T, HalError>;

#[derive(Debug, Error)]
pub enum HalError {
    /// Schema options violate the recognized option grammar.
    #[error("invalid schema options: {0}")]
    ConfigValidation(String),

    #[error("no type registered for {0}")]
    UnregisteredType(String),

    #[error("no schema {schema} registered for {type_name}")]
    UnregisteredSchema { type_name: String, schema: String },

    /// A user-supplied option function failed. The original error is kept
    /// as the source without rewording.
    #[error(transparent)]
    Resolver(anyhow::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
