//! *.runtimeconfig.json parser
//!
//! Published applications carry the frameworks they were built against:
//!
//! ```json
//! {
//!   "runtimeOptions": {
//!     "framework": { "name": "Microsoft.NETCore.App", "version": "6.0.0" },
//!     "applyPatches": false
//!   }
//! }
//! ```
//!
//! Newer runtimes list several frameworks under `runtimeOptions.frameworks`.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::RUNTIME_CONFIG_SUFFIX;
use crate::project::ProjectError;
use crate::project::types::Framework;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
struct RuntimeConfigFile {
    runtime_options: RuntimeOptions,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeOptions {
    pub framework: Option<FrameworkReference>,
    pub frameworks: Vec<FrameworkReference>,
    pub apply_patches: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameworkReference {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// File name, used as the hint origin
    pub file_name: String,
    pub options: RuntimeOptions,
}

impl RuntimeConfig {
    pub fn parse(path: &Path, content: &str) -> Result<Self, ProjectError> {
        let file: RuntimeConfigFile = serde_json::from_str(content)
            .map_err(|e| ProjectError::parse(path, "JSON", e.to_string()))?;

        Ok(Self {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            options: file.runtime_options,
        })
    }

    /// Load the runtimeconfig.json at the application root, if any.
    ///
    /// Development files (`*.runtimeconfig.dev.json`) are ignored. With several
    /// candidates the lexicographically first wins.
    pub fn load(build_dir: &Path) -> Result<Option<Self>, ProjectError> {
        let entries = std::fs::read_dir(build_dir).map_err(|e| ProjectError::io(build_dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ProjectError::io(build_dir, e))?;
            let path = entry.path();
            let is_runtime_config = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(RUNTIME_CONFIG_SUFFIX));
            if is_runtime_config && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let Some(path) = paths.into_iter().next() else {
            return Ok(None);
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ProjectError::io(&path, e))?;
        let config = Self::parse(&path, &content)?;
        debug!("Read {:?}: {:?}", path, config.options);
        Ok(Some(config))
    }

    /// Every referenced framework, `framework` first
    pub fn references(&self) -> impl Iterator<Item = &FrameworkReference> {
        self.options
            .framework
            .iter()
            .chain(self.options.frameworks.iter())
    }

    /// Version of the first reference belonging to `framework`
    pub fn framework_version(&self, framework: Framework) -> Option<&str> {
        self.references()
            .find(|r| framework.is_named(&r.name))
            .map(|r| r.version.trim())
            .filter(|v| !v.is_empty())
    }

    /// Roll to the latest patch unless `applyPatches` is explicitly false
    pub fn apply_patches(&self) -> bool {
        self.options.apply_patches.unwrap_or(true)
    }
}
