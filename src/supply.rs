//! Supply plan: the SDK and framework versions an application needs
//!
//! - SDK: always resolved, falling back to the manifest default
//! - Runtime / ASP.NET Core: resolved from declared hints; without any hint the
//!   restored package folders decide (every distinct version is installed);
//!   with neither the framework is not required

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DOTNET_SDK;
use crate::install::{InstallError, Installer};
use crate::project::{BuildEnvironment, Framework, ProjectError};
use crate::version::catalog::{Dependency, VersionCatalog};
use crate::version::error::ResolveError;
use crate::version::resolver::{ResolvedVersion, VersionResolver};
use crate::version::strategy::{HintStrategy, build_request, default_strategies};

#[derive(Debug, Error)]
pub enum SupplyError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Install(#[from] InstallError),
}

/// Versions selected for one framework family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FrameworkVersions {
    /// A declared hint (or its fallback) picked exactly one version
    Resolved(ResolvedVersion),
    /// Inferred from restored packages, one entry per distinct version
    Inferred {
        dependency: String,
        versions: BTreeSet<String>,
    },
}

impl FrameworkVersions {
    pub fn dependencies(&self) -> Vec<Dependency> {
        match self {
            FrameworkVersions::Resolved(resolved) => {
                vec![Dependency::new(&resolved.dependency, &resolved.version)]
            }
            FrameworkVersions::Inferred {
                dependency,
                versions,
            } => versions
                .iter()
                .map(|version| Dependency::new(dependency, version))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplyPlan {
    pub sdk: ResolvedVersion,
    pub frameworks: Vec<FrameworkVersions>,
}

impl SupplyPlan {
    /// Build the plan with the default strategies
    pub fn build<C: VersionCatalog + ?Sized>(
        environment: &BuildEnvironment,
        catalog: &C,
    ) -> Result<Self, ResolveError> {
        Self::build_with(&default_strategies(), environment, catalog)
    }

    pub fn build_with<C: VersionCatalog + ?Sized>(
        strategies: &[Box<dyn HintStrategy>],
        environment: &BuildEnvironment,
        catalog: &C,
    ) -> Result<Self, ResolveError> {
        let resolver = VersionResolver::new(catalog);

        let sdk = resolver.resolve(&build_request(strategies, environment, DOTNET_SDK))?;

        let mut frameworks = Vec::new();
        for framework in Framework::ALL {
            let dependency = framework.dependency_name();
            let request = build_request(strategies, environment, dependency);
            if !request.is_empty() {
                frameworks.push(FrameworkVersions::Resolved(resolver.resolve(&request)?));
                continue;
            }

            let restored = environment.restored_packages.versions(framework);
            if restored.is_empty() {
                debug!("{}: not required", dependency);
                continue;
            }

            let versions = resolver.inferred_versions(dependency, restored)?;
            info!("{}: using {:?} from restored packages", dependency, versions);
            frameworks.push(FrameworkVersions::Inferred {
                dependency: dependency.to_string(),
                versions,
            });
        }

        Ok(Self { sdk, frameworks })
    }

    /// Every dependency to install, SDK first
    pub fn dependencies(&self) -> Vec<Dependency> {
        std::iter::once(Dependency::new(&self.sdk.dependency, &self.sdk.version))
            .chain(self.frameworks.iter().flat_map(|f| f.dependencies()))
            .collect()
    }

    /// Hand every dependency to `installer`, stopping at the first failure
    pub fn install<I: Installer + ?Sized>(
        &self,
        installer: &I,
        target: &Path,
    ) -> Result<(), InstallError> {
        for dependency in self.dependencies() {
            info!("Installing {} {}", dependency.name, dependency.version);
            installer.install(&dependency, target)?;
        }
        Ok(())
    }
}

/// Inspect `build_dir` and build its supply plan
pub fn plan<C: VersionCatalog + ?Sized>(
    build_dir: &Path,
    packages_dir: &Path,
    catalog: &C,
) -> Result<SupplyPlan, SupplyError> {
    let environment = BuildEnvironment::inspect(build_dir, packages_dir)?;
    Ok(SupplyPlan::build(&environment, catalog)?)
}
