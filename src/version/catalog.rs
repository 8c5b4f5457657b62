//! Catalog of installable versions per dependency

use std::path::Path;

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::version::error::{ManifestError, ResolveError};
use crate::version::matcher::find_matching_version;
use crate::version::pattern::VersionPattern;

/// A named, versioned dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Lookup surface over the versions a buildpack can install
#[cfg_attr(test, automock)]
pub trait VersionCatalog: Send + Sync {
    /// Every known concrete version of `dependency`; empty if the dependency is unknown
    fn all_versions(&self, dependency: &str) -> Vec<String>;

    /// The configured default version of `dependency`
    fn default_version(&self, dependency: &str) -> Result<Dependency, ResolveError>;
}

/// Buildpack manifest (`manifest.yml`)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Manifest {
    pub default_versions: Vec<Dependency>,
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = Self::from_yaml(&content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(
            "Loaded manifest {:?} with {} dependencies",
            path,
            manifest.dependencies.len()
        );
        Ok(manifest)
    }
}

impl VersionCatalog for Manifest {
    fn all_versions(&self, dependency: &str) -> Vec<String> {
        let mut versions: Vec<String> = Vec::new();
        for dep in self.dependencies.iter().filter(|d| d.name == dependency) {
            if !versions.contains(&dep.version) {
                versions.push(dep.version.clone());
            }
        }
        versions
    }

    /// Defaults may be declared as patterns (`6.0.x`); those resolve to the
    /// highest matching dependency version.
    fn default_version(&self, dependency: &str) -> Result<Dependency, ResolveError> {
        let declared = self
            .default_versions
            .iter()
            .find(|d| d.name == dependency)
            .ok_or_else(|| ResolveError::NotFound {
                dependency: dependency.to_string(),
            })?;

        if VersionPattern::parse(&declared.version)?.is_floating() {
            let version = find_matching_version(&declared.version, &self.all_versions(dependency))?;
            return Ok(Dependency::new(dependency, version));
        }

        Ok(declared.clone())
    }
}
