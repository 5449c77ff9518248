//! The schema map: record-type name to validation capability.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::schema::RecordSchema;

/// Immutable mapping from record-type name to its schema.
///
/// Built once via [`SchemaMap::builder`] and then shared read-only
/// across all concurrent operations of a bucket. The set of declared
/// record types is the source of truth for what the bucket serves:
/// stored keys outside it are foreign objects and are filtered from
/// listings.
#[derive(Clone)]
pub struct SchemaMap {
    schemas: BTreeMap<String, Arc<dyn RecordSchema>>,
}

impl SchemaMap {
    /// Start declaring record types.
    pub fn builder() -> SchemaMapBuilder {
        SchemaMapBuilder {
            schemas: BTreeMap::new(),
        }
    }

    /// Look up the schema for a record type.
    pub fn get(&self, record_type: &str) -> Option<&Arc<dyn RecordSchema>> {
        self.schemas.get(record_type)
    }

    /// Whether `record_type` is declared.
    pub fn contains(&self, record_type: &str) -> bool {
        self.schemas.contains_key(record_type)
    }

    /// Declared record-type names in lexicographic order.
    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Number of declared record types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no record types are declared.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl std::fmt::Debug for SchemaMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaMap")
            .field("record_types", &self.schemas.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`SchemaMap`].
pub struct SchemaMapBuilder {
    schemas: BTreeMap<String, Arc<dyn RecordSchema>>,
}

impl SchemaMapBuilder {
    /// Declare a record type. A repeated name replaces the earlier
    /// schema.
    pub fn record(mut self, name: impl Into<String>, schema: impl RecordSchema + 'static) -> Self {
        self.schemas.insert(name.into(), Arc::new(schema));
        self
    }

    /// Declare a record type from an already-shared schema.
    pub fn record_arc(mut self, name: impl Into<String>, schema: Arc<dyn RecordSchema>) -> Self {
        self.schemas.insert(name.into(), schema);
        self
    }

    pub fn build(self) -> SchemaMap {
        SchemaMap {
            schemas: self.schemas,
        }
    }
}
