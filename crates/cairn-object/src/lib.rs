//! Object-storage backend interface for Cairn.
//!
//! This crate defines the contract between the storage layer and the
//! object store that holds its records: key-addressed objects carrying
//! payload bytes, a content type, and an opaque metadata map, with
//! listing scoped by key prefix.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `BTreeMap`-based store for tests and
//!   embedding
//!
//! # Design Rules
//!
//! 1. `put` is an unconditional overwrite with per-key read-after-write
//!    consistency.
//! 2. "Not found" is a value, not an error: `get` returns `Ok(None)`,
//!    `delete` returns `Ok(false)`.
//! 3. Listing is prefix-scoped; an empty prefix lists everything.
//! 4. Metadata round-trips verbatim; the store never interprets payloads.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{ObjectMeta, StoredObject, CONTENT_TYPE_JSON};
pub use traits::ObjectStore;
