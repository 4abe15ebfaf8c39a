//! Schema model for the halkit HAL mapper.
//!
//! Defines the configuration vocabulary shared by serialization and
//! deserialization:
//! - [`Schema`] and [`EmbeddedSpec`]: how a resource type and its
//!   relationships map onto `_links` and `_embedded`
//! - [`OptionSpec`]: literal-or-function link and meta options, evaluated
//!   through [`OptionSpec::resolve`]
//! - [`SchemaOptions`] and [`SchemaCatalog`]: declarative, validated
//!   configuration readable from JSON or TOML
//! - [`SchemaRegistry`]: caller-owned store of schemas by type and name
//! - [`CaseStyle`]: key casing applied to serialized attributes

mod case;
mod catalog;
mod config;
mod error;
mod option;
mod registry;
mod schema;

pub use case::{CaseStyle, convert_case, convert_keys};
pub use catalog::SchemaCatalog;
pub use config::{EmbeddedOptions, SchemaOptions, StringList};
pub use error::{HalError, Result};
pub use option::{FieldResolver, MappingResolver, OptionSpec, OptionValue};
pub use registry::SchemaRegistry;
pub use schema::{DEFAULT_SCHEMA, EmbeddedSpec, Schema};
