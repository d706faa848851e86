//! Tolerant version ordering
//!
//! Handles "v1.2.3", "1.2.3-beta", and plain garbage without ever
//! failing: non-numeric tokens degrade to 0, so "1.0.0-beta" and
//! "1.0.0-anything" compare equal. This is a deliberate approximation,
//! not a full semver parser.

/// Compare two version strings.
///
/// Returns a positive value when `a > b`, negative when `a < b`, and 0
/// when they are equal component-wise. Total over all inputs; the empty
/// string compares equal to "0.0.0".
pub fn compare_versions(a: &str, b: &str) -> i64 {
    let pa = components(a);
    let pb = components(b);
    let len = pa.len().max(pb.len());

    for i in 0..len {
        let x = pa.get(i).copied().unwrap_or(0);
        let y = pb.get(i).copied().unwrap_or(0);
        if x != y {
            return x - y;
        }
    }
    0
}

/// Split a version string into ordered numeric components.
///
/// One leading `v`/`V` is stripped, then the string is split on `.` and
/// `-`. Each token keeps only its digits; a token with no digits parses
/// as 0.
fn components(version: &str) -> Vec<i64> {
    let stripped = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version);

    stripped
        .split(['.', '-'])
        .map(|token| {
            let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<i64>().unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive() {
        for v in ["1.2.3", "v2.0.0", "", "1.0.0-beta", "garbage"] {
            assert_eq!(compare_versions(v, v), 0, "compare({v}, {v}) != 0");
        }
    }

    #[test]
    fn test_antisymmetric() {
        let pairs = [("1.2.3", "1.2.4"), ("2.0.0", "1.9.9"), ("1.0", "1.0.0.1")];
        for (a, b) in pairs {
            assert_eq!(
                compare_versions(a, b),
                -compare_versions(b, a),
                "compare({a}, {b}) not antisymmetric"
            );
        }
    }

    #[test]
    fn test_basic_ordering() {
        assert!(compare_versions("1.2.3", "1.2.4") < 0);
        assert!(compare_versions("2.0.0", "1.9.9") > 0);
        assert!(compare_versions("1.10.0", "1.9.0") > 0);
    }

    #[test]
    fn test_v_prefix_ignored() {
        assert_eq!(compare_versions("v2.0.0", "2.0.0"), 0);
        assert_eq!(compare_versions("V1.5.0", "v1.5.0"), 0);
    }

    #[test]
    fn test_prerelease_tokens_degrade_to_zero() {
        assert!(compare_versions("1.0.0-beta", "1.0.1") < 0);
        // Accepted approximation: textual pre-release tags are invisible
        assert_eq!(compare_versions("1.0.0-beta", "1.0.0-anything"), 0);
        assert_eq!(compare_versions("1.0.0-rc1", "1.0.0-1"), 0);
    }

    #[test]
    fn test_unequal_lengths_zero_padded() {
        assert_eq!(compare_versions("1.2", "1.2.0"), 0);
        assert!(compare_versions("1.2", "1.2.1") < 0);
    }

    #[test]
    fn test_empty_string_is_zero() {
        assert_eq!(compare_versions("", "0.0.0"), 0);
        assert!(compare_versions("", "0.0.1") < 0);
    }

    #[test]
    fn test_malformed_input_never_panics() {
        assert_eq!(compare_versions("not-a-version", "also.not"), 0);
        // Empty tokens between separators read as 0
        assert_eq!(compare_versions("1..2", "1.0.2"), 0);
    }
}
