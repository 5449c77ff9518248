//! Partition schema and partition-path parsing.
//!
//! A partition path is an ordered sequence of `name=value` segments, e.g.
//! `year=2023/month=12/day=15`. The schema declares which keys exist, in
//! which order, and what values each accepts. Parsing is strict:
//! - every segment must contain `=`,
//! - every segment name must be declared by the schema,
//! - every declared key must be present, exactly once,
//! - segments must appear in declaration order (paths are canonical),
//! - values must satisfy the key's constraint.

use std::collections::BTreeMap;

use crate::error::{PartitionError, PathResult};
use crate::glob::WILDCARD;

/// Parsed partition values, keyed by partition-key name.
pub type PartitionValues = BTreeMap<String, String>;

/// Constraint on a single partition key's value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueConstraint {
    /// Any string, including empty.
    Any,
    /// Any non-empty string.
    NonEmpty,
    /// ASCII digits only, optionally of a fixed width.
    Digits { width: Option<usize> },
    /// One of a fixed set of values.
    OneOf(Vec<String>),
}

impl ValueConstraint {
    fn check(&self, value: &str) -> Result<(), String> {
        match self {
            ValueConstraint::Any => Ok(()),
            ValueConstraint::NonEmpty => {
                if value.is_empty() {
                    Err("value must not be empty".to_string())
                } else {
                    Ok(())
                }
            }
            ValueConstraint::Digits { width } => {
                if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(format!("value {value:?} must be decimal digits"));
                }
                match width {
                    Some(w) if value.len() != *w => {
                        Err(format!("value {value:?} must be exactly {w} digit(s)"))
                    }
                    _ => Ok(()),
                }
            }
            ValueConstraint::OneOf(allowed) => {
                if allowed.iter().any(|a| a == value) {
                    Ok(())
                } else {
                    Err(format!("value {value:?} is not one of the allowed values"))
                }
            }
        }
    }
}

/// One declared partition key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionKey {
    name: String,
    constraint: ValueConstraint,
}

impl PartitionKey {
    /// Declare a key accepting any non-empty value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: ValueConstraint::NonEmpty,
        }
    }

    /// Declare a key with an explicit value constraint.
    pub fn with_constraint(name: impl Into<String>, constraint: ValueConstraint) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }

    /// The key's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered set of partition keys with per-key value constraints.
///
/// Declaration order is canonical: it fixes the physical path layout and
/// the order of wildcard segments in glob patterns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionSchema {
    keys: Vec<PartitionKey>,
}

impl PartitionSchema {
    /// Build a schema from keys in declaration order.
    pub fn new(keys: Vec<PartitionKey>) -> Self {
        Self { keys }
    }

    /// Declared key names in order.
    pub fn key_names(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.name())
    }

    /// Whether `name` is a declared partition key.
    pub fn contains(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k.name() == name)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the schema declares no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parse a partition path into its values, validating against the
    /// schema.
    pub fn parse(&self, path: &str) -> PathResult<PartitionValues> {
        let invalid = |reason: String| PartitionError::InvalidPath {
            path: path.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        for segment in path.split('/') {
            let (name, value) = segment
                .split_once('=')
                .ok_or_else(|| invalid(format!("segment {segment:?} is not name=value")))?;
            segments.push((name, value));
        }

        if segments.len() != self.keys.len() {
            return Err(invalid(format!(
                "expected {} segment(s), found {}",
                self.keys.len(),
                segments.len()
            )));
        }

        let mut values = PartitionValues::new();
        for ((name, value), key) in segments.into_iter().zip(&self.keys) {
            if name != key.name() {
                let reason = if self.contains(name) {
                    format!("key {name:?} is out of order, expected {:?}", key.name())
                } else {
                    format!("unrecognized partition key {name:?}")
                };
                return Err(invalid(reason));
            }
            key.constraint
                .check(value)
                .map_err(|reason| invalid(format!("key {name:?}: {reason}")))?;
            values.insert(name.to_string(), value.to_string());
        }
        Ok(values)
    }

    /// Build a glob pattern from a partial partition specification.
    ///
    /// For each declared key in order, emits `name=value` when the
    /// partial mapping supplies a value, else a wildcard segment. A key
    /// in the partial mapping that the schema does not declare fails
    /// fast; it is never silently ignored. Supplied values are not
    /// constraint-checked: an unmatchable value yields an empty query
    /// result rather than an error.
    pub fn glob_pattern(&self, partial: &PartitionValues) -> PathResult<String> {
        for name in partial.keys() {
            if !self.contains(name) {
                return Err(PartitionError::UnknownKey { name: name.clone() });
            }
        }

        let segments: Vec<String> = self
            .keys
            .iter()
            .map(|key| match partial.get(key.name()) {
                Some(value) => format!("{}={value}", key.name()),
                None => WILDCARD.to_string(),
            })
            .collect();
        Ok(segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date_schema() -> PartitionSchema {
        PartitionSchema::new(vec![
            PartitionKey::with_constraint("year", ValueConstraint::Digits { width: Some(4) }),
            PartitionKey::with_constraint("month", ValueConstraint::Digits { width: Some(2) }),
            PartitionKey::with_constraint("day", ValueConstraint::Digits { width: Some(2) }),
        ])
    }

    fn partial(pairs: &[(&str, &str)]) -> PartitionValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ---- Parsing ----

    #[test]
    fn parse_valid_path() {
        let values = date_schema().parse("year=2023/month=12/day=15").unwrap();
        assert_eq!(values.get("year").unwrap(), "2023");
        assert_eq!(values.get("month").unwrap(), "12");
        assert_eq!(values.get("day").unwrap(), "15");
    }

    #[test]
    fn reject_segment_without_equals() {
        let err = date_schema().parse("year=2023/month12/day=15").unwrap_err();
        assert!(err.to_string().contains("name=value"));
    }

    #[test]
    fn reject_unknown_key() {
        let err = date_schema().parse("year=2023/month=12/hour=08").unwrap_err();
        assert!(err.to_string().contains("unrecognized"));
    }

    #[test]
    fn reject_missing_key() {
        let err = date_schema().parse("year=2023/month=12").unwrap_err();
        assert!(err.to_string().contains("expected 3 segment(s)"));
    }

    #[test]
    fn reject_extra_segment() {
        assert!(date_schema()
            .parse("year=2023/month=12/day=15/day=16")
            .is_err());
    }

    #[test]
    fn reject_duplicate_key() {
        let err = date_schema().parse("year=2023/year=2024/day=15").unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn reject_out_of_order_segments() {
        let err = date_schema().parse("month=12/year=2023/day=15").unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn reject_constraint_violation() {
        let err = date_schema().parse("year=20X3/month=12/day=15").unwrap_err();
        assert!(err.to_string().contains("decimal digits"));

        let err = date_schema().parse("year=2023/month=012/day=15").unwrap_err();
        assert!(err.to_string().contains("exactly 2 digit(s)"));
    }

    #[test]
    fn reject_empty_path() {
        assert!(date_schema().parse("").is_err());
    }

    #[test]
    fn one_of_constraint() {
        let schema = PartitionSchema::new(vec![PartitionKey::with_constraint(
            "region",
            ValueConstraint::OneOf(vec!["eu".into(), "us".into()]),
        )]);
        assert!(schema.parse("region=eu").is_ok());
        assert!(schema.parse("region=apac").is_err());
    }

    #[test]
    fn any_constraint_accepts_empty_value() {
        let schema = PartitionSchema::new(vec![PartitionKey::with_constraint(
            "tag",
            ValueConstraint::Any,
        )]);
        assert_eq!(schema.parse("tag=").unwrap().get("tag").unwrap(), "");
    }

    // ---- Glob patterns ----

    #[test]
    fn full_partial_emits_literal_pattern() {
        let pattern = date_schema()
            .glob_pattern(&partial(&[("year", "2023"), ("month", "12"), ("day", "15")]))
            .unwrap();
        assert_eq!(pattern, "year=2023/month=12/day=15");
    }

    #[test]
    fn missing_keys_become_wildcards() {
        let pattern = date_schema()
            .glob_pattern(&partial(&[("year", "2023"), ("month", "12")]))
            .unwrap();
        assert_eq!(pattern, "year=2023/month=12/*");

        let pattern = date_schema()
            .glob_pattern(&partial(&[("month", "12")]))
            .unwrap();
        assert_eq!(pattern, "*/month=12/*");
    }

    #[test]
    fn empty_partial_is_all_wildcards() {
        let pattern = date_schema().glob_pattern(&partial(&[])).unwrap();
        assert_eq!(pattern, "*/*/*");
    }

    #[test]
    fn unknown_key_in_partial_fails_fast() {
        let err = date_schema()
            .glob_pattern(&partial(&[("hour", "08")]))
            .unwrap_err();
        assert!(matches!(err, PartitionError::UnknownKey { name } if name == "hour"));
    }

    #[test]
    fn unmatchable_value_is_not_an_error() {
        // A value that violates the key's constraint still builds a
        // pattern; it simply matches nothing.
        assert!(date_schema()
            .glob_pattern(&partial(&[("year", "not-a-year")]))
            .is_ok());
    }

    proptest! {
        #[test]
        fn parsed_paths_match_their_own_pattern(
            year in "[0-9]{4}",
            month in "[0-9]{2}",
            day in "[0-9]{2}",
        ) {
            let schema = date_schema();
            let path = format!("year={year}/month={month}/day={day}");
            let values = schema.parse(&path).unwrap();
            let pattern = schema.glob_pattern(&values).unwrap();
            prop_assert_eq!(pattern, path);
        }
    }
}
