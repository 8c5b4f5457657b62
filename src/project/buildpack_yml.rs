//! buildpack.yml loader

use std::path::Path;

use tracing::debug;

use crate::config::{BUILDPACK_YML, BuildpackConfig};
use crate::project::ProjectError;
use crate::project::read_optional;

/// Parse buildpack.yml content; an empty document yields the defaults
pub fn parse(path: &Path, content: &str) -> Result<BuildpackConfig, ProjectError> {
    if content.trim().is_empty() {
        return Ok(BuildpackConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ProjectError::parse(path, "YAML", e.to_string()))
}

/// Load `<build_dir>/buildpack.yml` if present
pub fn load(build_dir: &Path) -> Result<Option<BuildpackConfig>, ProjectError> {
    let path = build_dir.join(BUILDPACK_YML);
    let Some(content) = read_optional(&path)? else {
        return Ok(None);
    };

    let config = parse(&path, &content)?;
    debug!("Read {:?}: sdk = {:?}", path, config.sdk_version());
    Ok(Some(config))
}
