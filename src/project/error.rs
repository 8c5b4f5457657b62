//! Error types for project inspection

use std::path::PathBuf;

/// Errors raised while gathering version hints from an application
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Several project files and nothing to pick one
    #[error("multiple paths: {paths:?} contain a project file, but no .deployment file was used")]
    AmbiguousSource { paths: Vec<PathBuf> },

    #[error("project {project} named in {deployment} does not exist")]
    MissingProject {
        deployment: PathBuf,
        project: PathBuf,
    },
}

impl ProjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(
        path: impl Into<PathBuf>,
        format: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            format: format.into(),
            message: message.into(),
        }
    }
}
