use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content type used for every record payload Cairn writes.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A stored object: payload bytes plus the attributes the backend keeps
/// alongside them.
///
/// Metadata is an opaque string map. Cairn uses it to carry a redundant
/// copy of the record-type name and partition values for out-of-band
/// inspection; backends must round-trip it verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
    /// MIME content type recorded at write time.
    pub content_type: String,
    /// Opaque user metadata attached to the object.
    pub metadata: BTreeMap<String, String>,
    /// When the object was last written.
    pub last_modified: DateTime<Utc>,
}

impl StoredObject {
    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Listing entry for one object under a prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Full physical key of the object.
    pub key: String,
    /// When the object was last written.
    pub last_modified: DateTime<Utc>,
    /// Payload size in bytes.
    pub size: u64,
}
