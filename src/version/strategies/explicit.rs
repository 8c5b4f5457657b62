//! Explicit configuration (buildpack.yml)

use crate::config::{BUILDPACK_YML, DOTNET_SDK};
use crate::project::BuildEnvironment;
use crate::version::resolver::{HintSource, MatchPolicy, VersionSpec};
use crate::version::strategy::HintStrategy;

/// Pinned or floating SDK version from buildpack.yml.
///
/// An explicit request that cannot be honored fails the resolution.
pub struct ExplicitStrategy;

impl HintStrategy for ExplicitStrategy {
    fn source(&self) -> HintSource {
        HintSource::Explicit
    }

    fn hint(&self, environment: &BuildEnvironment, dependency: &str) -> Option<VersionSpec> {
        if dependency != DOTNET_SDK {
            return None;
        }

        let version = environment.buildpack_config.as_ref()?.sdk_version()?;
        Some(VersionSpec::new(
            HintSource::Explicit,
            BUILDPACK_YML,
            version,
            MatchPolicy::Exact,
        ))
    }
}
