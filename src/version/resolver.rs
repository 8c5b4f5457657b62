//! Resolution of version specifications to a single concrete version
//!
//! A [`ResolutionRequest`] lists the version hints declared for one dependency
//! in precedence order (explicit > lock file > project file). The first hint is
//! authoritative: if it cannot be satisfied the request fails, lower hints are
//! never consulted. With no hint at all the catalog default is used.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::version::catalog::VersionCatalog;
use crate::version::error::ResolveError;
use crate::version::matcher::{find_matching_version, latest_patch, roll_forward};

/// Where a version hint came from, highest authority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintSource {
    /// buildpack.yml
    Explicit,
    /// global.json, runtimeconfig.json
    LockFile,
    /// *.csproj, *.fsproj, *.vbproj
    ProjectFile,
    /// Manifest default
    Default,
}

impl HintSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HintSource::Explicit => "explicit",
            HintSource::LockFile => "lock-file",
            HintSource::ProjectFile => "project-file",
            HintSource::Default => "default",
        }
    }
}

/// How a hint is turned into a concrete version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Exact presence for concrete versions, highest match for patterns
    Exact,
    /// Newest patch of the same major.minor
    LatestPatch,
    /// Newest patch of the same SDK feature line
    FeatureLine,
    /// Exact if available, otherwise the newest patch of the same feature line
    RollForward,
}

/// One declared version hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    pub source: HintSource,
    /// File or setting the hint was read from
    pub origin: String,
    pub version: String,
    pub policy: MatchPolicy,
}

impl VersionSpec {
    pub fn new(
        source: HintSource,
        origin: impl Into<String>,
        version: impl Into<String>,
        policy: MatchPolicy,
    ) -> Self {
        Self {
            source,
            origin: origin.into(),
            version: version.into(),
            policy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub dependency: String,
    /// Declared hints, highest precedence first
    pub specs: Vec<VersionSpec>,
}

impl ResolutionRequest {
    pub fn new(dependency: impl Into<String>) -> Self {
        Self {
            dependency: dependency.into(),
            specs: Vec::new(),
        }
    }

    pub fn with_spec(mut self, spec: VersionSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// True when no source declared a hint
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    pub dependency: String,
    pub version: String,
    pub source: HintSource,
    pub origin: String,
}

/// Stateless resolver over a shared, read-only catalog
pub struct VersionResolver<'a, C: VersionCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: VersionCatalog + ?Sized> VersionResolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Resolve a request to exactly one concrete version
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<ResolvedVersion, ResolveError> {
        let Some((spec, shadowed)) = request.specs.split_first() else {
            return self.resolve_default(&request.dependency);
        };

        for hint in shadowed {
            debug!(
                "{}: ignoring {} hint '{}' from {}, superseded by {}",
                request.dependency,
                hint.source.as_str(),
                hint.version,
                hint.origin,
                spec.origin
            );
        }

        let candidates = self.catalog.all_versions(&request.dependency);
        let version = apply_policy(spec, &candidates).inspect_err(|e| {
            warn!(
                "{} '{}' from {} is not available: {}",
                request.dependency, spec.version, spec.origin, e
            )
        })?;

        info!(
            "{}: using {} (requested '{}' in {})",
            request.dependency, version, spec.version, spec.origin
        );

        Ok(ResolvedVersion {
            dependency: request.dependency.clone(),
            version,
            source: spec.source,
            origin: spec.origin.clone(),
        })
    }

    fn resolve_default(&self, dependency: &str) -> Result<ResolvedVersion, ResolveError> {
        match self.catalog.default_version(dependency) {
            Ok(default) => {
                info!("{}: using the default version {}", dependency, default.version);
                Ok(ResolvedVersion {
                    dependency: dependency.to_string(),
                    version: default.version,
                    source: HintSource::Default,
                    origin: "manifest".to_string(),
                })
            }
            Err(ResolveError::NotFound { .. }) => Err(ResolveError::NoVersionDeterminable {
                dependency: dependency.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Newest catalog patch sharing `version`'s major.minor
    pub fn latest_patch(&self, dependency: &str, version: &str) -> Result<String, ResolveError> {
        latest_patch(version, &self.catalog.all_versions(dependency))
    }

    /// Versions inferred from restored packages, each floated to its latest
    /// patch and deduplicated.
    ///
    /// Unlike [`resolve`](Self::resolve) this yields a set: every distinct
    /// version is installed.
    pub fn inferred_versions(
        &self,
        dependency: &str,
        restored: &[String],
    ) -> Result<BTreeSet<String>, ResolveError> {
        let candidates = self.catalog.all_versions(dependency);
        let versions = restored
            .iter()
            .map(|v| latest_patch(v, &candidates))
            .collect::<Result<BTreeSet<_>, _>>()?;

        debug!(
            "{}: restored packages {:?} map to {:?}",
            dependency, restored, versions
        );
        Ok(versions)
    }
}

fn apply_policy(spec: &VersionSpec, candidates: &[String]) -> Result<String, ResolveError> {
    match spec.policy {
        MatchPolicy::Exact => find_matching_version(&spec.version, candidates),
        MatchPolicy::LatestPatch => latest_patch(&spec.version, candidates),
        MatchPolicy::FeatureLine => roll_forward(&spec.version, candidates),
        MatchPolicy::RollForward => {
            if candidates.contains(&spec.version) {
                return Ok(spec.version.clone());
            }
            warn!(
                "'{}' from {} is not available, falling back to latest version in feature line",
                spec.version, spec.origin
            );
            roll_forward(&spec.version, candidates)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::catalog::{Dependency, MockVersionCatalog};
    use mockall::predicate::eq;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn catalog_with(dependency: &'static str, versions: &[&str]) -> MockVersionCatalog {
        let versions = strings(versions);
        let mut catalog = MockVersionCatalog::new();
        catalog
            .expect_all_versions()
            .with(eq(dependency))
            .returning(move |_| versions.clone());
        catalog
    }

    #[rstest]
    #[case(MatchPolicy::Exact, "6.0.x", "6.0.400")]
    #[case(MatchPolicy::Exact, "6.0.3", "6.0.3")]
    #[case(MatchPolicy::LatestPatch, "6.0.3", "6.0.400")]
    #[case(MatchPolicy::FeatureLine, "6.0.301", "6.0.304")]
    #[case(MatchPolicy::RollForward, "6.0.300", "6.0.300")]
    #[case(MatchPolicy::RollForward, "6.0.302", "6.0.304")]
    fn resolve_applies_policy(
        #[case] policy: MatchPolicy,
        #[case] version: &str,
        #[case] expected: &str,
    ) {
        let catalog = catalog_with(
            "dotnet-sdk",
            &["6.0.3", "6.0.9", "6.0.300", "6.0.304", "6.0.400"],
        );
        let resolver = VersionResolver::new(&catalog);
        let request = ResolutionRequest::new("dotnet-sdk").with_spec(VersionSpec::new(
            HintSource::LockFile,
            "global.json",
            version,
            policy,
        ));

        let resolved = resolver.resolve(&request).unwrap();

        assert_eq!(resolved.version, expected);
        assert_eq!(resolved.source, HintSource::LockFile);
        assert_eq!(resolved.origin, "global.json");
    }

    #[test]
    fn explicit_hint_wins_over_lock_file() {
        let catalog = catalog_with("dotnet-sdk", &["6.0.100", "6.0.401", "7.0.100"]);
        let resolver = VersionResolver::new(&catalog);
        let request = ResolutionRequest::new("dotnet-sdk")
            .with_spec(VersionSpec::new(
                HintSource::Explicit,
                "buildpack.yml",
                "7.0.x",
                MatchPolicy::Exact,
            ))
            .with_spec(VersionSpec::new(
                HintSource::LockFile,
                "global.json",
                "6.0.100",
                MatchPolicy::RollForward,
            ));

        let resolved = resolver.resolve(&request).unwrap();

        assert_eq!(resolved.version, "7.0.100");
        assert_eq!(resolved.source, HintSource::Explicit);
    }

    #[test]
    fn unmatched_explicit_hint_fails_without_consulting_lock_file() {
        let mut catalog = catalog_with("dotnet-sdk", &["6.0.100", "6.0.401"]);
        catalog.expect_default_version().never();
        let resolver = VersionResolver::new(&catalog);
        let request = ResolutionRequest::new("dotnet-sdk")
            .with_spec(VersionSpec::new(
                HintSource::Explicit,
                "buildpack.yml",
                "8.0.x",
                MatchPolicy::Exact,
            ))
            .with_spec(VersionSpec::new(
                HintSource::LockFile,
                "global.json",
                "6.0.100",
                MatchPolicy::RollForward,
            ));

        let err = resolver.resolve(&request).unwrap_err();

        assert_eq!(
            err,
            ResolveError::NoMatch {
                pattern: "8.0.x".to_string(),
                candidates: strings(&["6.0.100", "6.0.401"]),
            }
        );
    }

    #[rstest]
    #[case("6.x.5")]
    #[case("latest")]
    fn malformed_explicit_hint_fails_without_consulting_lock_file(#[case] version: &str) {
        let mut catalog = catalog_with("dotnet-sdk", &["6.0.100", "6.0.401"]);
        catalog.expect_default_version().never();
        let resolver = VersionResolver::new(&catalog);
        let request = ResolutionRequest::new("dotnet-sdk")
            .with_spec(VersionSpec::new(
                HintSource::Explicit,
                "buildpack.yml",
                version,
                MatchPolicy::Exact,
            ))
            .with_spec(VersionSpec::new(
                HintSource::LockFile,
                "global.json",
                "6.0.100",
                MatchPolicy::RollForward,
            ));

        let err = resolver.resolve(&request).unwrap_err();

        assert!(
            matches!(err, ResolveError::MalformedVersion { version: ref v, .. } if v == version)
        );
    }

    #[test]
    fn resolve_uses_default_without_hints() {
        let mut catalog = MockVersionCatalog::new();
        catalog
            .expect_default_version()
            .with(eq("dotnet-sdk"))
            .times(1)
            .returning(|name| Ok(Dependency::new(name, "6.0.401")));
        let resolver = VersionResolver::new(&catalog);

        let resolved = resolver
            .resolve(&ResolutionRequest::new("dotnet-sdk"))
            .unwrap();

        assert_eq!(
            resolved,
            ResolvedVersion {
                dependency: "dotnet-sdk".to_string(),
                version: "6.0.401".to_string(),
                source: HintSource::Default,
                origin: "manifest".to_string(),
            }
        );
    }

    #[test]
    fn resolve_fails_without_hints_or_default() {
        let mut catalog = MockVersionCatalog::new();
        catalog.expect_default_version().returning(|name| {
            Err(ResolveError::NotFound {
                dependency: name.to_string(),
            })
        });
        let resolver = VersionResolver::new(&catalog);

        let err = resolver
            .resolve(&ResolutionRequest::new("dotnet-aspnetcore"))
            .unwrap_err();

        assert_eq!(
            err,
            ResolveError::NoVersionDeterminable {
                dependency: "dotnet-aspnetcore".to_string()
            }
        );
    }

    #[test]
    fn resolve_is_idempotent() {
        let catalog = catalog_with("dotnet-runtime", &["6.0.3", "6.0.9"]);
        let resolver = VersionResolver::new(&catalog);
        let request = ResolutionRequest::new("dotnet-runtime").with_spec(VersionSpec::new(
            HintSource::LockFile,
            "app.runtimeconfig.json",
            "6.0.0",
            MatchPolicy::LatestPatch,
        ));

        let first = resolver.resolve(&request).unwrap();
        let second = resolver.resolve(&request).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn inferred_versions_deduplicates_after_floating() {
        let catalog = catalog_with("dotnet-runtime", &["2.1.0", "2.1.14", "3.1.2", "3.1.22"]);
        let resolver = VersionResolver::new(&catalog);

        let versions = resolver
            .inferred_versions("dotnet-runtime", &strings(&["2.1.0", "2.1.3", "3.1.1"]))
            .unwrap();

        assert_eq!(
            versions.into_iter().collect::<Vec<_>>(),
            strings(&["2.1.14", "3.1.22"])
        );
    }

    #[test]
    fn inferred_versions_propagates_unmatched_version() {
        let catalog = catalog_with("dotnet-runtime", &["3.1.22"]);
        let resolver = VersionResolver::new(&catalog);

        let err = resolver
            .inferred_versions("dotnet-runtime", &strings(&["2.1.3"]))
            .unwrap_err();

        assert!(err.is_no_match());
    }

    #[test]
    fn latest_patch_reads_catalog_for_dependency() {
        let catalog = catalog_with("dotnet-aspnetcore", &["6.0.1", "6.0.12"]);
        let resolver = VersionResolver::new(&catalog);

        assert_eq!(
            resolver.latest_patch("dotnet-aspnetcore", "6.0.1").unwrap(),
            "6.0.12"
        );
    }
}
