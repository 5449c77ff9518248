//! Translation between logical record keys and physical storage keys.
//!
//! A bucket may be configured with a key prefix so that several buckets
//! can share one physical namespace. The codec applies and strips that
//! prefix; it is a pure string transform with no failure modes.

/// Applies and removes a configured key prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathCodec {
    prefix: Option<String>,
}

impl PathCodec {
    /// Create a codec with an optional prefix. Trailing slashes on the
    /// prefix are ignored, so `"data"` and `"data/"` behave identically.
    pub fn new(prefix: Option<&str>) -> Self {
        let prefix = prefix
            .map(|p| p.trim_end_matches('/'))
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        Self { prefix }
    }

    /// The configured prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Prepend the prefix to a logical key.
    pub fn to_physical(&self, logical: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}/{logical}"),
            None => logical.to_string(),
        }
    }

    /// Strip the prefix from a physical key.
    ///
    /// A key that does not start with the expected prefix is passed
    /// through unchanged rather than rejected; callers filter afterward.
    pub fn to_logical<'a>(&self, physical: &'a str) -> &'a str {
        match &self.prefix {
            Some(prefix) => physical
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(physical),
            None => physical,
        }
    }

    /// The physical prefix under which every key of this bucket lives:
    /// `"prefix/"` when a prefix is configured, `""` otherwise. Suitable
    /// for scoping a storage listing.
    pub fn root(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}/"),
            None => String::new(),
        }
    }

    /// Build the physical key of a partitioned record:
    /// `[prefix/]partition_path/record_type.json`.
    pub fn partitioned_key(&self, partition_path: &str, record_type: &str) -> String {
        self.to_physical(&format!("{partition_path}/{record_type}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_prefix_is_identity() {
        let codec = PathCodec::new(None);
        assert_eq!(codec.to_physical("config"), "config");
        assert_eq!(codec.to_logical("config"), "config");
        assert_eq!(codec.root(), "");
    }

    #[test]
    fn prefix_applied_and_stripped() {
        let codec = PathCodec::new(Some("data"));
        assert_eq!(codec.to_physical("config"), "data/config");
        assert_eq!(codec.to_logical("data/config"), "config");
        assert_eq!(codec.root(), "data/");
    }

    #[test]
    fn trailing_slash_on_prefix_is_ignored() {
        let codec = PathCodec::new(Some("data/"));
        assert_eq!(codec.to_physical("config"), "data/config");
        assert_eq!(codec.to_logical("data/config"), "config");
    }

    #[test]
    fn empty_prefix_behaves_like_none() {
        let codec = PathCodec::new(Some(""));
        assert_eq!(codec, PathCodec::new(None));
    }

    #[test]
    fn foreign_key_passes_through() {
        let codec = PathCodec::new(Some("data"));
        assert_eq!(codec.to_logical("other/config"), "other/config");
        // A key equal to the bare prefix has no separator to strip.
        assert_eq!(codec.to_logical("data"), "data");
        // Prefix must match a whole segment, not a substring.
        assert_eq!(codec.to_logical("database/config"), "database/config");
    }

    #[test]
    fn partitioned_key_layout() {
        let codec = PathCodec::new(Some("data"));
        assert_eq!(
            codec.partitioned_key("year=2023/month=12", "user"),
            "data/year=2023/month=12/user.json"
        );

        let bare = PathCodec::new(None);
        assert_eq!(
            bare.partitioned_key("year=2023", "metrics"),
            "year=2023/metrics.json"
        );
    }

    proptest! {
        #[test]
        fn physical_then_logical_round_trips(
            logical in "[a-z0-9][a-z0-9/=._-]{0,40}",
            prefix in proptest::option::of("[a-z0-9]{1,10}"),
        ) {
            let codec = PathCodec::new(prefix.as_deref());
            let physical = codec.to_physical(&logical);
            prop_assert_eq!(codec.to_logical(&physical), logical.as_str());
        }
    }
}
