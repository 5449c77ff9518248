//! Partitioned operations: writes and queries over `name=value` paths.
//!
//! Each query runs the same pipeline: validate the input against the
//! partition schema, list candidate keys from storage, re-parse each
//! candidate's partition path, and collect the survivors. A bucket may
//! legitimately share its namespace with foreign objects, so candidates
//! that do not fit the partition scheme are filtered out silently; they
//! are not faults.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use cairn_path::{glob_match, literal_prefix, PartitionValues};

use crate::bucket::Bucket;
use crate::error::BucketResult;
use crate::records::{METADATA_PARTITION_PREFIX, METADATA_RECORD_TYPE};

/// A partitioned record read back from storage.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionedRecord {
    /// The validated record value.
    pub value: Value,
    /// The partition values parsed from the record's path.
    pub partitions: PartitionValues,
}

/// One match from [`Bucket::find_partitioned`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionedKey {
    /// Full logical key of the object (partition path plus filename).
    pub key: String,
    /// The partition values parsed from the path.
    pub partitions: PartitionValues,
    /// The declared record type stored at this key.
    pub record_type: String,
}

impl Bucket {
    /// Store a record under a partition path.
    ///
    /// The path must satisfy the bucket's partition schema in full; the
    /// value must satisfy the record type's schema. The stored object's
    /// metadata carries the record-type name and every partition value
    /// for out-of-band inspection.
    pub async fn set_partitioned(
        &self,
        path: &str,
        record_type: &str,
        value: Value,
    ) -> BucketResult<()> {
        let partitions = self.partition_schema()?.parse(path)?;
        let key = self.codec().partitioned_key(path, record_type);

        let mut metadata = BTreeMap::new();
        metadata.insert(METADATA_RECORD_TYPE.to_string(), record_type.to_string());
        for (name, partition_value) in &partitions {
            metadata.insert(
                format!("{METADATA_PARTITION_PREFIX}{name}"),
                partition_value.clone(),
            );
        }

        self.guarded(&key, self.records().write(record_type, &key, &value, metadata))
            .await
    }

    /// Read a record stored under a partition path.
    ///
    /// The path is validated against the partition schema before storage
    /// is consulted, so an invalid path always fails, even when no
    /// object exists there. A valid path with no object is `Ok(None)`.
    pub async fn get_partitioned(
        &self,
        path: &str,
        record_type: &str,
    ) -> BucketResult<Option<PartitionedRecord>> {
        let partitions = self.partition_schema()?.parse(path)?;
        let key = self.codec().partitioned_key(path, record_type);
        Ok(self
            .records()
            .read(record_type, &key)
            .await?
            .map(|value| PartitionedRecord { value, partitions }))
    }

    /// Delete a record stored under a partition path. Returns `false`
    /// if no object exists there.
    pub async fn delete_partitioned(&self, path: &str, record_type: &str) -> BucketResult<bool> {
        self.partition_schema()?.parse(path)?;
        if !self.records().schemas().contains(record_type) {
            return Err(crate::error::BucketError::UnknownSchema(
                record_type.to_string(),
            ));
        }
        let key = self.codec().partitioned_key(path, record_type);
        self.guarded(&key, self.records().remove(&key)).await
    }

    /// Find all partitioned records matching a partial partition
    /// specification.
    ///
    /// Every declared partition key missing from `partial` becomes a
    /// wildcard; `record_type` narrows the match to one record type,
    /// otherwise any declared type matches. Results come back in the
    /// storage listing order; callers needing a particular order sort by
    /// partition values.
    pub async fn find_partitioned(
        &self,
        partial: &PartitionValues,
        record_type: Option<&str>,
    ) -> BucketResult<Vec<PartitionedKey>> {
        let schema = self.partition_schema()?;
        let dir_pattern = schema.glob_pattern(partial)?;
        let filename = match record_type {
            Some(record_type) => format!("{record_type}.json"),
            None => "*.json".to_string(),
        };
        let pattern = self.codec().to_physical(&format!("{dir_pattern}/{filename}"));

        let listed = self.store().list(&literal_prefix(&pattern)).await?;

        let mut matches = Vec::new();
        let mut skipped = 0usize;
        for meta in listed {
            if !glob_match(&pattern, &meta.key) {
                continue;
            }
            let logical = self.codec().to_logical(&meta.key);
            let Some((partition_path, file)) = logical.rsplit_once('/') else {
                continue;
            };
            let Some(candidate_type) = file.strip_suffix(".json") else {
                continue;
            };
            if !self.records().schemas().contains(candidate_type) {
                skipped += 1;
                debug!(key = %meta.key, record_type = candidate_type, "skipping undeclared record type");
                continue;
            }
            match schema.parse(partition_path) {
                Ok(partitions) => matches.push(PartitionedKey {
                    key: logical.to_string(),
                    partitions,
                    record_type: candidate_type.to_string(),
                }),
                Err(reason) => {
                    skipped += 1;
                    debug!(key = %meta.key, %reason, "skipping unparseable partition path");
                }
            }
        }
        if skipped > 0 {
            debug!(matched = matches.len(), skipped, "partition query filtered candidates");
        }
        Ok(matches)
    }
}
