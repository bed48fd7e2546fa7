//! Segment-wise glob-like path matching for file selection.
//!
//! Patterns and paths are split on `/` and matched segment by segment; a
//! segment must match exactly unless the pattern segment contains a single
//! `*`, which matches any run of characters within that segment. `*` never
//! crosses a `/`, so `*/docs/*.md` matches `bar/docs/usage.md` but not
//! `bar/docs/deep/usage.md`.

/// Does `path` match any of `patterns`?
pub fn matches_any(patterns: &[String], path: &str) -> bool {
    patterns.iter().any(|pattern| matches(pattern, path))
}

/// Does `path` match `pattern`?
pub fn matches(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return false;
    }
    pattern_segments
        .iter()
        .zip(&path_segments)
        .all(|(pat, seg)| segment_matches(pat, seg))
}

fn segment_matches(pattern: &str, segment: &str) -> bool {
    match pattern.find('*') {
        None => pattern == segment,
        Some(star) => {
            let (prefix, suffix) = (&pattern[..star], &pattern[star + 1..]);
            segment.len() >= prefix.len() + suffix.len()
                && segment.starts_with(prefix)
                && segment.ends_with(suffix)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*/README.md", "foo/README.md", true)]
    #[case("*/README.md", "README.md", false)]
    #[case("*/README.md", "foo/bar/README.md", false)]
    #[case("*/docs/*.md", "bar/docs/usage.md", true)]
    #[case("*/docs/*.md", "bar/docs/deep/usage.md", false)]
    #[case("*/docs/*.md", "bar/docs/usage.txt", false)]
    #[case("*/package.json", "foo/package.json", true)]
    #[case("*/package.json", "foo/not-package.json", false)]
    #[case("*.md", "usage.md", true)]
    #[case("*.md", ".md", true)]
    #[case("usage.*", "usage.md", true)]
    #[case("exact", "exact", true)]
    #[case("exact", "inexact", false)]
    fn pattern_truth_table(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(matches(pattern, path), expected, "{pattern} vs {path}");
    }

    #[test]
    fn matches_any_checks_every_pattern() {
        let patterns: Vec<String> = ["*/README.md", "*/docs/*.md"]
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert!(matches_any(&patterns, "foo/README.md"));
        assert!(matches_any(&patterns, "foo/docs/guide.md"));
        assert!(!matches_any(&patterns, "foo/src/lib.rs"));
        assert!(!matches_any(&[], "foo/README.md"));
    }
}
