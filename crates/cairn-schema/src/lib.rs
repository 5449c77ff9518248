//! Record schema declaration and validation for Cairn.
//!
//! Every record type a bucket serves is declared up front with a schema,
//! and every value is checked against it on both write and read. The
//! validation capability is a single-method trait, [`RecordSchema`], so
//! any schema library can be adapted; two implementations ship here:
//!
//! - [`ObjectSchema`] -- structural JSON-object schema with field-level
//!   violation reporting
//! - [`TypedSchema`] -- serde round-trip validation against a Rust type
//!
//! [`SchemaMap`] holds the immutable record-type-to-schema mapping a
//! bucket is constructed with.

pub mod error;
pub mod map;
pub mod object_schema;
pub mod schema;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{SchemaError, SchemaResult, Violation};
pub use map::{SchemaMap, SchemaMapBuilder};
pub use object_schema::{FieldKind, ObjectSchema};
pub use schema::{RecordSchema, TypedSchema};
