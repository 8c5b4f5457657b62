//! Installer collaborator
//!
//! Downloading, verifying and unpacking dependencies lives outside this crate;
//! a supply plan only hands each resolved dependency to an [`Installer`].

use std::path::Path;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::version::catalog::Dependency;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to install {name} {version}: {message}")]
    Failed {
        name: String,
        version: String,
        message: String,
    },
}

/// Trait for materializing a dependency into a target directory
#[cfg_attr(test, automock)]
pub trait Installer: Send + Sync {
    fn install(&self, dependency: &Dependency, target: &Path) -> Result<(), InstallError>;
}
