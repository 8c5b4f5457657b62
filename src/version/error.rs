use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no version matching '{pattern}' found in {candidates:?}")]
    NoMatch {
        pattern: String,
        candidates: Vec<String>,
    },

    #[error("could not find sdk in same feature line as '{version}' in {candidates:?}")]
    NoFeatureLineMatch {
        version: String,
        candidates: Vec<String>,
    },

    #[error("no patch release of '{version}' found in {candidates:?}")]
    NoPatchMatch {
        version: String,
        candidates: Vec<String>,
    },

    #[error("malformed version '{version}': {reason}")]
    MalformedVersion { version: String, reason: String },

    #[error("no default version configured for '{dependency}'")]
    NotFound { dependency: String },

    #[error("no version determinable for '{dependency}'")]
    NoVersionDeterminable { dependency: String },
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("I/O error reading manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl ResolveError {
    pub(crate) fn malformed(version: &str, reason: impl Into<String>) -> Self {
        Self::MalformedVersion {
            version: version.to_string(),
            reason: reason.into(),
        }
    }

    /// True when no candidate satisfied a pattern or feature line
    pub fn is_no_match(&self) -> bool {
        matches!(
            self,
            ResolveError::NoMatch { .. }
                | ResolveError::NoFeatureLineMatch { .. }
                | ResolveError::NoPatchMatch { .. }
        )
    }
}
