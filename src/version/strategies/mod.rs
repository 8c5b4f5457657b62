//! Per-source version hint strategies

mod explicit;
mod lock_file;
mod project_file;

pub use explicit::ExplicitStrategy;
pub use lock_file::LockFileStrategy;
pub use project_file::ProjectFileStrategy;

use crate::version::pattern::VersionPattern;
use crate::version::resolver::MatchPolicy;

/// Patterns float by themselves; concrete versions float to their latest patch
fn float_patch_policy(version: &str) -> MatchPolicy {
    match VersionPattern::parse(version) {
        Ok(pattern) if pattern.is_floating() => MatchPolicy::Exact,
        // Malformed versions surface as errors once resolved
        _ => MatchPolicy::LatestPatch,
    }
}
