//! Dashcard Schema - declarative card field descriptions
//!
//! One [`Schema`] per card kind declares the configurable fields, their
//! types, defaults and editor hints. The registry is the single source
//! of truth for the closed set of kinds: the parser uses it to split
//! declared fields from passthrough data, the validator checks configs
//! against it, and editors generate forms from it.
//!
//! Schemas are static: built once, never mutated at runtime.

#![warn(unreachable_pub)]

pub mod field;
pub mod registry;
pub mod schema;
pub mod validate;

pub use field::{FieldSpec, FieldType, SelectOption};
pub use registry::{registry, SchemaRegistry};
pub use schema::Schema;
pub use validate::{validate, ValidationReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
