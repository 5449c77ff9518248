//! Path codec and partition-path parsing for Cairn.
//!
//! Two concerns live here, both pure string work with no I/O:
//!
//! - [`PathCodec`] -- translation between logical record keys and
//!   physical storage keys, applying and stripping a configured prefix.
//! - [`PartitionSchema`] -- parsing and validation of hierarchical
//!   partition paths (`year=2023/month=12/day=15`), and construction of
//!   glob patterns from partial partition specifications for
//!   range-style lookups.
//!
//! Both are exposed publicly: callers can construct and inspect
//! partition paths by hand, not only through the bucket facade.

pub mod codec;
pub mod error;
pub mod glob;
pub mod partition;

// Re-export primary types at crate root for ergonomic imports.
pub use codec::PathCodec;
pub use error::{PartitionError, PathResult};
pub use glob::{glob_match, literal_prefix, WILDCARD};
pub use partition::{PartitionKey, PartitionSchema, PartitionValues, ValueConstraint};
