//! Project inspection layer
//! - error.rs: ProjectError
//! - types.rs: Framework (runtime families resolved alongside the SDK)
//! - environment.rs: BuildEnvironment, every raw version hint of an application
//! - buildpack_yml.rs: buildpack.yml (explicit configuration)
//! - global_json.rs: global.json (SDK lock)
//! - runtime_config.rs: *.runtimeconfig.json (framework lock)
//! - project_file.rs: *.csproj / *.fsproj / *.vbproj and .deployment
//! - restored_packages.rs: restored NuGet package directories

pub mod buildpack_yml;
pub mod environment;
pub mod error;
pub mod global_json;
pub mod project_file;
pub mod restored_packages;
pub mod runtime_config;
pub mod types;

pub use environment::BuildEnvironment;
pub use error::ProjectError;
pub use types::Framework;

use std::path::Path;

/// Read a file that may legitimately be absent
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, ProjectError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ProjectError::io(path, e)),
    }
}
