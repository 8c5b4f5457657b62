//! global.json parser
//!
//! ```json
//! { "sdk": { "version": "6.0.100", "rollForward": "latestFeature" } }
//! ```
//!
//! Only `rollForward: disable` changes resolution: the exact SDK is required.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::GLOBAL_JSON;
use crate::project::ProjectError;
use crate::project::read_optional;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobalJson {
    pub sdk: Option<SdkSection>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SdkSection {
    pub version: Option<String>,
    pub roll_forward: Option<String>,
}

impl GlobalJson {
    pub fn parse(path: &Path, content: &str) -> Result<Self, ProjectError> {
        serde_json::from_str(content).map_err(|e| ProjectError::parse(path, "JSON", e.to_string()))
    }

    /// Load `<build_dir>/global.json` if present
    pub fn load(build_dir: &Path) -> Result<Option<Self>, ProjectError> {
        let path = build_dir.join(GLOBAL_JSON);
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };

        let global_json = Self::parse(&path, &content)?;
        debug!("Read {:?}: sdk = {:?}", path, global_json.sdk_version());
        Ok(Some(global_json))
    }

    pub fn sdk_version(&self) -> Option<&str> {
        self.sdk
            .as_ref()
            .and_then(|sdk| sdk.version.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// True for `"rollForward": "disable"`
    pub fn roll_forward_disabled(&self) -> bool {
        self.sdk
            .as_ref()
            .and_then(|sdk| sdk.roll_forward.as_deref())
            .is_some_and(|policy| policy.trim().eq_ignore_ascii_case("disable"))
    }
}
