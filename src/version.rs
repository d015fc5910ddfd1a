//! Version ordering for release tags.
//!
//! Tags are compared as semantic versions after stripping a leading `v` and
//! padding missing minor/patch components. Tags that still do not parse are
//! compared segment by segment as plain numbers.

use std::cmp::Ordering;

/// Parses a tag into a semantic version.
#[must_use]
pub fn parse_version(tag: &str) -> Option<semver::Version> {
    let trimmed = tag.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    if let Ok(version) = semver::Version::parse(trimmed) {
        return Some(version);
    }

    // "1.3" or "2" -> pad the core before any pre-release/build suffix
    let split_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split_at);
    let dots = core.matches('.').count();
    if dots >= 2 || core.is_empty() {
        return None;
    }
    let padded = format!("{}{}{}", core, ".0".repeat(2 - dots), suffix);
    semver::Version::parse(&padded).ok()
}

/// Splits a tag into numeric segments.
///
/// Every segment keeps its position: non-numeric segments count as 0 and
/// digit runs too large for `u64` saturate to `u64::MAX`.
fn numeric_segments(tag: &str) -> Vec<u64> {
    tag.trim()
        .trim_start_matches(['v', 'V'])
        .split(['.', '-', '+', '_'])
        .map(|s| match s.parse::<u64>() {
            Ok(n) => n,
            Err(_) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => u64::MAX,
            Err(_) => 0,
        })
        .collect()
}

/// Compares two version tags.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => {
            let a = numeric_segments(a);
            let b = numeric_segments(b);
            let len = a.len().max(b.len());
            for i in 0..len {
                let x = a.get(i).copied().unwrap_or(0);
                let y = b.get(i).copied().unwrap_or(0);
                match x.cmp(&y) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            Ordering::Equal
        }
    }
}

/// Returns true if `candidate` is strictly newer than `installed`.
#[must_use]
pub fn is_newer(candidate: &str, installed: &str) -> bool {
    compare(candidate, installed) == Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("1.2.3"), Some(semver::Version::new(1, 2, 3)));
        assert_eq!(parse_version("v1.2.3"), Some(semver::Version::new(1, 2, 3)));
        assert_eq!(parse_version("1.3"), Some(semver::Version::new(1, 3, 0)));
        assert_eq!(parse_version("2"), Some(semver::Version::new(2, 0, 0)));
        assert!(parse_version("1.0-beta.1").is_some());
        assert!(parse_version("latest").is_none());
    }

    #[test]
    fn test_is_newer() {
        assert!(is_newer("1.3.0", "1.2.0"));
        assert!(!is_newer("1.3.0", "1.3.0"));
        assert!(!is_newer("1.2.9", "1.3.0"));
        assert!(is_newer("v1.10.0", "1.9.0"));
        assert!(!is_newer("v1.3.0", "1.3"));
    }

    #[test]
    fn test_prerelease_is_older_than_release() {
        assert!(is_newer("1.0.0", "1.0.0-rc.1"));
        assert!(!is_newer("1.0.0-rc.1", "1.0.0"));
    }

    #[test]
    fn test_fallback_numeric_compare() {
        assert!(is_newer("1.2.3.4", "1.2.3"));
        assert_eq!(compare("1.2.3.0", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn test_oversized_segment_keeps_its_position() {
        let huge = "1.99999999999999999999999.5";
        assert!(parse_version(huge).is_none());
        assert!(is_newer(huge, "1.6.0"));
        assert!(!is_newer("1.6.0", huge));
        assert_eq!(numeric_segments(huge), vec![1, u64::MAX, 5]);
    }

    #[test]
    fn test_word_segment_counts_as_zero() {
        assert_eq!(numeric_segments("1.x.7"), vec![1, 0, 7]);
        assert!(is_newer("1.x.7.1", "1.0.7"));
    }
}
