//! Matching version patterns against candidate versions
//!
//! - [`find_matching_version`]: best match for a pattern (`6.7.x` -> highest 6.7 patch)
//! - [`find_matching_versions`]: every match, highest first
//! - [`roll_forward`]: highest patch in the same SDK feature line (`1.2.301` -> `1.2.3xx`)
//! - [`latest_patch`]: highest patch in the same major.minor

use semver::Version;
use tracing::debug;

use crate::version::error::ResolveError;
use crate::version::pattern::VersionPattern;

/// Find the highest candidate satisfying `pattern`.
///
/// A concrete pattern requires its exact string to be present in `candidates`.
pub fn find_matching_version(pattern: &str, candidates: &[String]) -> Result<String, ResolveError> {
    let mut matches = find_matching_versions(pattern, candidates)?;
    // find_matching_versions never returns an empty list
    Ok(matches.swap_remove(0))
}

/// Find every candidate satisfying `pattern`, ordered from highest to lowest.
pub fn find_matching_versions(
    pattern: &str,
    candidates: &[String],
) -> Result<Vec<String>, ResolveError> {
    let parsed = VersionPattern::parse(pattern)?;

    let matches: Vec<String> = if parsed.is_floating() {
        let mut matched: Vec<(Version, &String)> = candidates
            .iter()
            .filter_map(|c| Version::parse(c).ok().map(|v| (v, c)))
            .filter(|(v, _)| parsed.matches(v))
            .collect();
        // Numeric ordering: 1.10.0 sorts above 1.9.0
        matched.sort_by(|(a, _), (b, _)| b.cmp(a));
        matched.dedup_by(|(a, _), (b, _)| a == b);
        matched.into_iter().map(|(_, c)| c.clone()).collect()
    } else {
        candidates
            .iter()
            .find(|c| c.as_str() == pattern)
            .cloned()
            .into_iter()
            .collect()
    };

    if matches.is_empty() {
        debug!("No candidate matches '{}' in {:?}", pattern, candidates);
        return Err(ResolveError::NoMatch {
            pattern: pattern.to_string(),
            candidates: candidates.to_vec(),
        });
    }

    debug!("'{}' matched {:?}", pattern, matches);
    Ok(matches)
}

/// SDK feature line of a patch number: its leading digit and digit count.
///
/// `301` and `399` share a line, `3` and `301` do not.
fn feature_line(patch: u64) -> (u8, usize) {
    let digits = patch.to_string();
    (digits.as_bytes()[0], digits.len())
}

/// Select the highest patch of `version`'s feature line within the same major.minor.
pub fn roll_forward(version: &str, candidates: &[String]) -> Result<String, ResolveError> {
    let requested =
        Version::parse(version).map_err(|e| ResolveError::malformed(version, e.to_string()))?;
    let line = feature_line(requested.patch);

    candidates
        .iter()
        .filter_map(|c| Version::parse(c).ok().map(|v| (v, c)))
        .filter(|(v, _)| {
            v.pre.is_empty()
                && v.major == requested.major
                && v.minor == requested.minor
                && feature_line(v.patch) == line
        })
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, c)| c.clone())
        .ok_or_else(|| ResolveError::NoFeatureLineMatch {
            version: version.to_string(),
            candidates: candidates.to_vec(),
        })
}

/// Select the newest patch sharing `version`'s major.minor.
///
/// A floating `version` is matched as-is.
pub fn latest_patch(version: &str, candidates: &[String]) -> Result<String, ResolveError> {
    let pattern = match VersionPattern::parse(version)? {
        VersionPattern::Concrete(v) => format!("{}.{}.x", v.major, v.minor),
        VersionPattern::Floating { .. } => version.to_string(),
    };

    find_matching_version(&pattern, candidates).map_err(|e| match e {
        ResolveError::NoMatch { candidates, .. } => ResolveError::NoPatchMatch {
            version: version.to_string(),
            candidates,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("6.7.x", &["6.7.7", "6.7.8", "6.9.0"], "6.7.8")]
    #[case("6.x.x", &["6.7.7", "6.7.8", "7.0.0"], "6.7.8")]
    #[case("6.x", &["6.7.7", "6.7.8", "7.0.0"], "6.7.8")]
    #[case("1.x", &["1.9.0", "1.10.0"], "1.10.0")]
    #[case("1.2.x", &["1.2.9", "1.2.10"], "1.2.10")]
    #[case("2.0.*", &["2.0.0", "2.0.3", "2.1.0"], "2.0.3")]
    #[case("2.1.3*", &["2.1.300", "2.1.302", "2.1.400"], "2.1.302")]
    #[case("6.7.8", &["6.7.7", "6.7.8", "6.9.0"], "6.7.8")]
    #[case("3.0.100-preview-010184", &["3.0.100-preview-010184"], "3.0.100-preview-010184")]
    #[case("3.0.x", &["3.0.100", "3.0.101-preview1"], "3.0.100")]
    #[case("x", &["1.0.0", "not-a-version", "2.0.0"], "2.0.0")]
    fn find_matching_version_returns_best_match(
        #[case] pattern: &str,
        #[case] candidates: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(
            find_matching_version(pattern, &strings(candidates)).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case("1.2.x", &["1.1.1", "1.3.7"])]
    #[case("1.2.3", &["1.1.1", "1.3.7"])]
    #[case("6.x", &[])]
    #[case("3.0.x", &["3.0.100-preview1"])]
    fn find_matching_version_reports_pattern_and_candidates(
        #[case] pattern: &str,
        #[case] candidates: &[&str],
    ) {
        let err = find_matching_version(pattern, &strings(candidates)).unwrap_err();

        assert_eq!(
            err,
            ResolveError::NoMatch {
                pattern: pattern.to_string(),
                candidates: strings(candidates),
            }
        );
    }

    #[test]
    fn find_matching_version_rejects_malformed_pattern() {
        let err = find_matching_version("6.x.5", &strings(&["6.1.5"])).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedVersion { .. }));
    }

    #[test]
    fn find_matching_version_accepts_any_single_matching_candidate() {
        for (pattern, version) in [
            ("6.7.x", "6.7.0"),
            ("6.x", "6.0.1"),
            ("x", "0.0.0"),
            ("10.2.*", "10.2.42"),
            ("4.5.6", "4.5.6"),
        ] {
            assert_eq!(
                find_matching_version(pattern, &strings(&[version])).unwrap(),
                version
            );
        }
    }

    #[test]
    fn find_matching_versions_orders_descending_without_duplicates() {
        let candidates = strings(&["6.0.1", "6.0.10", "5.0.0", "6.0.2", "6.0.10"]);

        assert_eq!(
            find_matching_versions("6.x", &candidates).unwrap(),
            strings(&["6.0.10", "6.0.2", "6.0.1"])
        );
    }

    #[rstest]
    #[case("1.2.301", &["1.1.113", "1.2.303", "1.2.608", "1.3.709"], "1.2.303")]
    #[case("6.0.100", &["6.0.100", "6.0.110", "6.0.200"], "6.0.110")]
    #[case("6.0.199", &["6.0.105"], "6.0.105")]
    #[case("2.1.3", &["2.1.3", "2.1.7", "2.1.300"], "2.1.3")]
    fn roll_forward_picks_highest_in_feature_line(
        #[case] version: &str,
        #[case] candidates: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(roll_forward(version, &strings(candidates)).unwrap(), expected);
    }

    #[test]
    fn roll_forward_fails_outside_feature_line() {
        let err = roll_forward("1.2.3", &strings(&["1.1.1", "1.3.7"])).unwrap_err();

        assert!(
            err.to_string()
                .contains("could not find sdk in same feature line as '1.2.3'")
        );
    }

    #[test]
    fn roll_forward_requires_concrete_version() {
        let err = roll_forward("1.2.x", &strings(&["1.2.300"])).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedVersion { .. }));
    }

    #[rstest]
    #[case("2.1.1", &["2.1.1", "2.1.12", "2.2.0"], "2.1.12")]
    #[case("6.0.0", &["6.0.0"], "6.0.0")]
    #[case("6.0.x", &["6.0.3", "6.0.9"], "6.0.9")]
    fn latest_patch_floats_patch(
        #[case] version: &str,
        #[case] candidates: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(latest_patch(version, &strings(candidates)).unwrap(), expected);
    }

    #[test]
    fn latest_patch_keeps_original_version_in_error() {
        let err = latest_patch("2.1.1", &strings(&["2.2.0"])).unwrap_err();

        assert_eq!(
            err,
            ResolveError::NoPatchMatch {
                version: "2.1.1".to_string(),
                candidates: strings(&["2.2.0"]),
            }
        );
    }
}
