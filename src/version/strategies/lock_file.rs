//! Lock descriptors: global.json for the SDK, runtimeconfig.json for frameworks

use crate::config::{DOTNET_SDK, GLOBAL_JSON};
use crate::project::BuildEnvironment;
use crate::project::types::Framework;
use crate::version::resolver::{HintSource, MatchPolicy, VersionSpec};
use crate::version::strategy::HintStrategy;

/// - SDK: `sdk.version` of global.json, rolled forward within its feature
///   line when the exact version is unavailable, unless `rollForward` is
///   `disable`
/// - Frameworks: runtimeconfig.json references, floated to the latest patch
///   unless `applyPatches` is false
pub struct LockFileStrategy;

impl HintStrategy for LockFileStrategy {
    fn source(&self) -> HintSource {
        HintSource::LockFile
    }

    fn hint(&self, environment: &BuildEnvironment, dependency: &str) -> Option<VersionSpec> {
        if dependency == DOTNET_SDK {
            let global_json = environment.global_json.as_ref()?;
            let version = global_json.sdk_version()?;
            let policy = if global_json.roll_forward_disabled() {
                MatchPolicy::Exact
            } else {
                MatchPolicy::RollForward
            };
            return Some(VersionSpec::new(
                HintSource::LockFile,
                GLOBAL_JSON,
                version,
                policy,
            ));
        }

        let framework: Framework = dependency.parse().ok()?;
        let runtime_config = environment.runtime_config.as_ref()?;
        let version = runtime_config.framework_version(framework)?;
        let policy = if runtime_config.apply_patches() {
            MatchPolicy::LatestPatch
        } else {
            MatchPolicy::Exact
        };

        Some(VersionSpec::new(
            HintSource::LockFile,
            runtime_config.file_name.as_str(),
            version,
            policy,
        ))
    }
}
