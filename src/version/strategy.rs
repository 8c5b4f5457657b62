//! Hint strategy trait
//!
//! Each strategy reads one source of version hints from an already inspected
//! [`BuildEnvironment`]. Strategies perform no I/O, so the precedence policy
//! is independent of how the hints were gathered.

use tracing::debug;

use crate::project::BuildEnvironment;
use crate::version::resolver::{HintSource, ResolutionRequest, VersionSpec};
use crate::version::strategies::{ExplicitStrategy, LockFileStrategy, ProjectFileStrategy};

/// Trait for a single tier of version hints
pub trait HintStrategy: Send + Sync {
    /// Returns the tier this strategy reads
    fn source(&self) -> HintSource;

    /// The hint this tier declares for `dependency`, or None when it declares nothing
    fn hint(&self, environment: &BuildEnvironment, dependency: &str) -> Option<VersionSpec>;
}

/// Strategies in precedence order: explicit, lock file, project file
pub fn default_strategies() -> Vec<Box<dyn HintStrategy>> {
    vec![
        Box::new(ExplicitStrategy),
        Box::new(LockFileStrategy),
        Box::new(ProjectFileStrategy),
    ]
}

/// Evaluate `strategies` in order and collect every declared hint
pub fn build_request(
    strategies: &[Box<dyn HintStrategy>],
    environment: &BuildEnvironment,
    dependency: &str,
) -> ResolutionRequest {
    strategies
        .iter()
        .filter_map(|strategy| {
            let hint = strategy.hint(environment, dependency);
            debug!(
                "{}: {} hint {:?}",
                dependency,
                strategy.source().as_str(),
                hint.as_ref().map(|h| h.version.as_str())
            );
            hint
        })
        .fold(ResolutionRequest::new(dependency), ResolutionRequest::with_spec)
}
