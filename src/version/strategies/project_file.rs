//! Project file hints (*.csproj, *.fsproj, *.vbproj)

use crate::config::DOTNET_SDK;
use crate::project::BuildEnvironment;
use crate::project::project_file::ProjectFile;
use crate::project::types::Framework;
use crate::version::resolver::{HintSource, MatchPolicy, VersionSpec};
use crate::version::strategies::float_patch_policy;
use crate::version::strategy::HintStrategy;

/// - SDK: newest SDK of the target framework (`net6.0` -> `6.0.x`)
/// - Runtime: `RuntimeFrameworkVersion`, then a `Microsoft.NETCore.App`
///   package reference, then the target framework
/// - ASP.NET Core: a `Microsoft.AspNetCore.App`/`.All` package reference,
///   then the target framework of a web project or of a project referencing
///   the framework without a version
pub struct ProjectFileStrategy;

impl HintStrategy for ProjectFileStrategy {
    fn source(&self) -> HintSource {
        HintSource::ProjectFile
    }

    fn hint(&self, environment: &BuildEnvironment, dependency: &str) -> Option<VersionSpec> {
        let project = environment.project_file.as_ref()?;

        let (version, policy) = if dependency == DOTNET_SDK {
            (project.target_version_pattern()?, MatchPolicy::Exact)
        } else {
            framework_hint(project, dependency.parse().ok()?)?
        };

        Some(VersionSpec::new(
            HintSource::ProjectFile,
            project.file_name(),
            version,
            policy,
        ))
    }
}

fn framework_hint(project: &ProjectFile, framework: Framework) -> Option<(String, MatchPolicy)> {
    if framework == Framework::Runtime
        && let Some(version) = &project.runtime_framework_version
    {
        return Some((version.clone(), MatchPolicy::LatestPatch));
    }

    if let Some(version) = project.package_version(framework.framework_names()) {
        return Some((version.to_string(), float_patch_policy(version)));
    }

    let implied = project.references_any(framework.framework_names())
        || match framework {
            Framework::Runtime => true,
            Framework::AspNetCore => project.is_web(),
        };
    if implied {
        return project
            .target_version_pattern()
            .map(|pattern| (pattern, MatchPolicy::Exact));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DOTNET_ASPNETCORE, DOTNET_RUNTIME};
    use crate::project::project_file::ProjectFileParser;
    use rstest::rstest;
    use std::path::Path;

    fn environment(content: &str) -> BuildEnvironment {
        BuildEnvironment {
            project_file: Some(ProjectFileParser::new().parse(Path::new("/app/App.csproj"), content)),
            ..Default::default()
        }
    }

    const LIBRARY: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup><TargetFramework>net6.0</TargetFramework></PropertyGroup>
</Project>"#;

    const PINNED_RUNTIME: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
    <TargetFramework>netcoreapp2.1</TargetFramework>
    <RuntimeFrameworkVersion>2.1.3</RuntimeFrameworkVersion>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Microsoft.AspNetCore.All" Version="2.0.*" />
  </ItemGroup>
</Project>"#;

    const WEB: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup><TargetFramework>net7.0</TargetFramework></PropertyGroup>
</Project>"#;

    const FRAMEWORK_REFERENCE: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup><TargetFramework>net6.0</TargetFramework></PropertyGroup>
  <ItemGroup><FrameworkReference Include="Microsoft.AspNetCore.App" /></ItemGroup>
</Project>"#;

    const VERSIONLESS_PACKAGE: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup><TargetFramework>netcoreapp2.1</TargetFramework></PropertyGroup>
  <ItemGroup><PackageReference Include="Microsoft.AspNetCore.App" /></ItemGroup>
</Project>"#;

    #[rstest]
    #[case(LIBRARY, DOTNET_SDK, Some(("6.0.x", MatchPolicy::Exact)))]
    #[case(LIBRARY, DOTNET_RUNTIME, Some(("6.0.x", MatchPolicy::Exact)))]
    #[case(LIBRARY, DOTNET_ASPNETCORE, None)]
    #[case(PINNED_RUNTIME, DOTNET_SDK, Some(("2.1.x", MatchPolicy::Exact)))]
    #[case(PINNED_RUNTIME, DOTNET_RUNTIME, Some(("2.1.3", MatchPolicy::LatestPatch)))]
    #[case(PINNED_RUNTIME, DOTNET_ASPNETCORE, Some(("2.0.*", MatchPolicy::Exact)))]
    #[case(WEB, DOTNET_ASPNETCORE, Some(("7.0.x", MatchPolicy::Exact)))]
    #[case(WEB, "unknown", None)]
    #[case(FRAMEWORK_REFERENCE, DOTNET_ASPNETCORE, Some(("6.0.x", MatchPolicy::Exact)))]
    #[case(VERSIONLESS_PACKAGE, DOTNET_ASPNETCORE, Some(("2.1.x", MatchPolicy::Exact)))]
    #[case(VERSIONLESS_PACKAGE, DOTNET_RUNTIME, Some(("2.1.x", MatchPolicy::Exact)))]
    fn hint_returns_expected(
        #[case] content: &str,
        #[case] dependency: &str,
        #[case] expected: Option<(&str, MatchPolicy)>,
    ) {
        let hint = ProjectFileStrategy.hint(&environment(content), dependency);

        assert_eq!(
            hint.as_ref().map(|h| (h.version.as_str(), h.policy)),
            expected
        );
        if let Some(hint) = hint {
            assert_eq!(hint.source, HintSource::ProjectFile);
            assert_eq!(hint.origin, "App.csproj");
        }
    }

    #[test]
    fn returns_none_without_project_file() {
        assert_eq!(
            ProjectFileStrategy.hint(&BuildEnvironment::default(), DOTNET_SDK),
            None
        );
    }

    #[test]
    fn unsupported_target_framework_gives_no_sdk_hint() {
        let env = environment(
            "<Project><PropertyGroup><TargetFramework>net48</TargetFramework></PropertyGroup></Project>",
        );

        assert_eq!(ProjectFileStrategy.hint(&env, DOTNET_SDK), None);
    }
}
