//! Segment-wise glob matching for partition patterns.
//!
//! Patterns are `/`-separated. A segment of `*` matches any whole
//! segment; a segment of `*suffix` matches any segment ending in that
//! suffix (used for `*.json` filenames). No other wildcard forms exist.

/// Single-segment wildcard.
pub const WILDCARD: &str = "*";

/// Match a glob pattern against a path, segment by segment.
///
/// Segment counts must be equal; a wildcard never spans a `/`.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (Some(p), Some(s)) => {
                if !segment_match(p, s) {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

fn segment_match(pattern: &str, segment: &str) -> bool {
    if pattern == WILDCARD {
        return true;
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return segment.ends_with(suffix);
    }
    pattern == segment
}

/// The longest run of leading literal segments in `pattern`, usable as a
/// storage listing prefix.
///
/// Returns the pattern itself when it contains no wildcard (it names an
/// exact key), `""` when the very first segment is wildcarded, and a
/// `/`-terminated directory prefix otherwise.
pub fn literal_prefix(pattern: &str) -> String {
    if !pattern.contains('*') {
        return pattern.to_string();
    }
    let literals: Vec<&str> = pattern
        .split('/')
        .take_while(|segment| !segment.contains('*'))
        .collect();
    if literals.is_empty() {
        return String::new();
    }
    let mut prefix = literals.join("/");
    prefix.push('/');
    prefix
}
