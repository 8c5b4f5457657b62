use serde::Deserialize;

// =============================================================================
// Dependency names (as listed in the buildpack manifest)
// =============================================================================

pub const DOTNET_SDK: &str = "dotnet-sdk";
pub const DOTNET_RUNTIME: &str = "dotnet-runtime";
pub const DOTNET_ASPNETCORE: &str = "dotnet-aspnetcore";

// =============================================================================
// Application files
// =============================================================================

pub const BUILDPACK_YML: &str = "buildpack.yml";
pub const GLOBAL_JSON: &str = "global.json";
/// Selects the main project when an application holds several
pub const DEPLOYMENT_FILE: &str = ".deployment";
pub const RUNTIME_CONFIG_SUFFIX: &str = ".runtimeconfig.json";
/// Restored NuGet packages, relative to the application root
pub const NUGET_PACKAGES_DIR: &str = ".nuget/packages";

/// buildpack.yml structure
///
/// ```yaml
/// dotnet-core:
///   sdk: 6.0.x
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BuildpackConfig {
    #[serde(rename = "dotnet-core")]
    pub dotnet_core: DotnetCoreConfig,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DotnetCoreConfig {
    /// Pinned or floating SDK version
    pub sdk: Option<String>,
}

impl BuildpackConfig {
    pub fn sdk_version(&self) -> Option<&str> {
        self.dotnet_core
            .sdk
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Returns the tracing filter directive for the CLI.
/// Uses $RUST_LOG if set, otherwise `debug` when $BP_DEBUG is non-empty,
/// otherwise `info`.
pub fn log_filter() -> String {
    log_filter_with_env(std::env::var("RUST_LOG").ok(), std::env::var("BP_DEBUG").ok())
}

fn log_filter_with_env(rust_log: Option<String>, bp_debug: Option<String>) -> String {
    rust_log
        .filter(|v| !v.is_empty())
        .or_else(|| bp_debug.filter(|v| !v.is_empty()).map(|_| "debug".to_string()))
        .unwrap_or_else(|| "info".to_string())
}
