//! Raw version hints gathered from an application directory

use std::path::Path;

use tracing::info;

use crate::config::BuildpackConfig;
use crate::project::ProjectError;
use crate::project::buildpack_yml;
use crate::project::global_json::GlobalJson;
use crate::project::project_file::ProjectFile;
use crate::project::restored_packages::RestoredPackages;
use crate::project::runtime_config::RuntimeConfig;

/// Everything an application declares about the versions it needs.
///
/// Built once per staging by [`BuildEnvironment::inspect`]; hint strategies
/// read it without further I/O.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildEnvironment {
    pub buildpack_config: Option<BuildpackConfig>,
    pub global_json: Option<GlobalJson>,
    pub runtime_config: Option<RuntimeConfig>,
    pub project_file: Option<ProjectFile>,
    pub restored_packages: RestoredPackages,
}

impl BuildEnvironment {
    pub fn inspect(build_dir: &Path, packages_dir: &Path) -> Result<Self, ProjectError> {
        let environment = Self {
            buildpack_config: buildpack_yml::load(build_dir)?,
            global_json: GlobalJson::load(build_dir)?,
            runtime_config: RuntimeConfig::load(build_dir)?,
            project_file: ProjectFile::load(build_dir)?,
            restored_packages: RestoredPackages::scan(packages_dir)?,
        };

        info!(
            "Inspected {:?}: buildpack.yml={}, global.json={}, runtimeconfig={}, project={}",
            build_dir,
            environment.buildpack_config.is_some(),
            environment.global_json.is_some(),
            environment
                .runtime_config
                .as_ref()
                .map(|c| c.file_name.as_str())
                .unwrap_or("none"),
            environment
                .project_file
                .as_ref()
                .map(|p| p.file_name())
                .unwrap_or_else(|| "none".to_string()),
        );

        Ok(environment)
    }
}
