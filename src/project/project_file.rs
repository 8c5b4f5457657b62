//! MSBuild project file parser (*.csproj, *.fsproj, *.vbproj)
//!
//! Extracts the version-bearing properties:
//! - `<Project Sdk="Microsoft.NET.Sdk.Web">`
//! - `<TargetFramework>net6.0</TargetFramework>` / `<TargetFrameworks>`
//! - `<RuntimeFrameworkVersion>2.1.3</RuntimeFrameworkVersion>`
//! - `<PackageReference Include="Microsoft.AspNetCore.App" Version="2.1.*" />`,
//!   or with a `<Version>` child element
//! - `<FrameworkReference Include="Microsoft.AspNetCore.App" />`
//!
//! When an application holds several projects, `.deployment` picks one:
//!
//! ```text
//! [config]
//! project = src/App/App.csproj
//! ```

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::config::DEPLOYMENT_FILE;
use crate::project::ProjectError;
use crate::project::read_optional;

pub const PROJECT_EXTENSIONS: [&str; 3] = ["csproj", "fsproj", "vbproj"];

/// Directories never searched for project files
const SKIPPED_DIRS: [&str; 3] = ["bin", "obj", "node_modules"];

const WEB_SDK: &str = "Microsoft.NET.Sdk.Web";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    pub include: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub path: PathBuf,
    pub sdk: Option<String>,
    pub target_frameworks: Vec<String>,
    pub runtime_framework_version: Option<String>,
    pub package_references: Vec<PackageReference>,
    /// `Include` of every `<FrameworkReference>`
    pub framework_references: Vec<String>,
}

impl ProjectFile {
    /// File name, used as the hint origin
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `X.Y.x` for the first .NET Core target framework
    pub fn target_version_pattern(&self) -> Option<String> {
        self.target_frameworks
            .iter()
            .find_map(|moniker| moniker_version_pattern(moniker))
    }

    pub fn is_web(&self) -> bool {
        self.sdk
            .as_deref()
            .is_some_and(|sdk| sdk.eq_ignore_ascii_case(WEB_SDK))
    }

    /// Version of the first package reference whose name is in `names`
    pub fn package_version(&self, names: &[&str]) -> Option<&str> {
        self.package_references
            .iter()
            .filter(|r| names.iter().any(|n| n.eq_ignore_ascii_case(&r.include)))
            .find_map(|r| r.version.as_deref())
    }

    /// True when a package or framework reference names any of `names`,
    /// with or without a version
    pub fn references_any(&self, names: &[&str]) -> bool {
        let named = |include: &str| names.iter().any(|n| n.eq_ignore_ascii_case(include));
        self.package_references.iter().any(|r| named(&r.include))
            || self.framework_references.iter().any(|f| named(f))
    }

    /// Load the main project of `build_dir`, if it has one
    pub fn load(build_dir: &Path) -> Result<Option<Self>, ProjectError> {
        let Some(path) = find_main_project(build_dir)? else {
            return Ok(None);
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ProjectError::io(&path, e))?;
        let project = ProjectFileParser::new().parse(&path, &content);
        debug!("Read {:?}: {:?}", path, project);
        Ok(Some(project))
    }
}

/// Map a target framework moniker to a version pattern.
///
/// - `netcoreapp2.1` -> `2.1.x`
/// - `net6.0`, `net6.0-windows` -> `6.0.x`
/// - `net48`, `netstandard2.0` -> None (not .NET Core)
pub fn moniker_version_pattern(moniker: &str) -> Option<String> {
    let moniker = moniker.trim().to_ascii_lowercase();
    let version = match moniker.strip_prefix("netcoreapp") {
        Some(rest) => rest,
        None => moniker.strip_prefix("net")?,
    };
    // Platform suffix: net6.0-windows10.0.19041
    let version = version.split('-').next().unwrap_or(version);

    let (major, minor) = version.split_once('.')?;
    let major: u64 = major.parse().ok()?;
    let minor: u64 = minor.parse().ok()?;
    Some(format!("{major}.{minor}.x"))
}

/// Parser for MSBuild project XML
pub struct ProjectFileParser {
    /// `<Project Sdk="...">`
    sdk_re: Regex,
    /// `<TargetFramework>` or `<TargetFrameworks>` body
    target_framework_re: Regex,
    /// `<RuntimeFrameworkVersion>` body
    runtime_framework_re: Regex,
    /// A whole `<PackageReference ...>` start tag
    package_reference_re: Regex,
    /// `<Version>` child of a non-empty `<PackageReference>`
    version_element_re: Regex,
    /// A whole `<FrameworkReference ...>` start tag
    framework_reference_re: Regex,
    /// `name="value"` inside a tag
    attribute_re: Regex,
}

impl ProjectFileParser {
    pub fn new() -> Self {
        Self {
            sdk_re: Regex::new(r#"<Project\s[^>]*?\bSdk\s*=\s*"([^"]+)""#).unwrap(),
            target_framework_re: Regex::new(
                r"<TargetFrameworks?>\s*([^<]+?)\s*</TargetFrameworks?>",
            )
            .unwrap(),
            runtime_framework_re: Regex::new(
                r"<RuntimeFrameworkVersion>\s*([^<]+?)\s*</RuntimeFrameworkVersion>",
            )
            .unwrap(),
            package_reference_re: Regex::new(r"<PackageReference\s[^>]*>").unwrap(),
            version_element_re: Regex::new(r"<Version>\s*([^<]*?)\s*</Version>").unwrap(),
            framework_reference_re: Regex::new(r"<FrameworkReference\s[^>]*>").unwrap(),
            attribute_re: Regex::new(r#"(\w+)\s*=\s*"([^"]*)""#).unwrap(),
        }
    }

    pub fn parse(&self, path: &Path, content: &str) -> ProjectFile {
        let sdk = self
            .sdk_re
            .captures(content)
            .map(|caps| caps[1].trim().to_string());

        let target_frameworks = self
            .target_framework_re
            .captures_iter(content)
            .flat_map(|caps| {
                caps[1]
                    .split(';')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        let runtime_framework_version = self
            .runtime_framework_re
            .captures(content)
            .map(|caps| caps[1].to_string());

        let package_references = self
            .package_reference_re
            .find_iter(content)
            .filter_map(|tag| self.package_reference(tag.as_str(), &content[tag.end()..]))
            .collect();

        let framework_references = self
            .framework_reference_re
            .find_iter(content)
            .filter_map(|tag| self.include(tag.as_str()))
            .collect();

        ProjectFile {
            path: path.to_path_buf(),
            sdk,
            target_frameworks,
            runtime_framework_version,
            package_references,
            framework_references,
        }
    }

    fn include(&self, tag: &str) -> Option<String> {
        self.attribute_re
            .captures_iter(tag)
            .find(|caps| &caps[1] == "Include")
            .map(|caps| caps[2].trim().to_string())
    }

    /// `rest` is the text following the start tag
    fn package_reference(&self, tag: &str, rest: &str) -> Option<PackageReference> {
        let mut include = None;
        let mut version = None;
        for caps in self.attribute_re.captures_iter(tag) {
            let value = caps[2].trim().to_string();
            match &caps[1] {
                "Include" => include = Some(value),
                "Version" if !value.is_empty() => version = Some(value),
                _ => {}
            }
        }

        if version.is_none() && !tag.ends_with("/>") {
            let body = rest
                .find("</PackageReference>")
                .map_or("", |end| &rest[..end]);
            version = self
                .version_element_re
                .captures(body)
                .map(|caps| caps[1].to_string())
                .filter(|v| !v.is_empty());
        }

        include.map(|include| PackageReference { include, version })
    }
}

impl Default for ProjectFileParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate the project to build.
///
/// `.deployment` wins when it names a project; otherwise exactly one project
/// file may exist below `build_dir`.
pub fn find_main_project(build_dir: &Path) -> Result<Option<PathBuf>, ProjectError> {
    let deployment = build_dir.join(DEPLOYMENT_FILE);
    if let Some(content) = read_optional(&deployment)?
        && let Some(project) = deployment_project(&content)
    {
        let path = build_dir.join(project);
        if !path.is_file() {
            return Err(ProjectError::MissingProject {
                deployment,
                project: path,
            });
        }
        debug!("Main project {:?} selected by {:?}", path, deployment);
        return Ok(Some(path));
    }

    let mut paths = Vec::new();
    collect_project_files(build_dir, &mut paths)?;
    paths.sort();

    match paths.len() {
        0 => Ok(None),
        1 => Ok(paths.pop()),
        _ => Err(ProjectError::AmbiguousSource { paths }),
    }
}

/// `project` key of the `[config]` section
fn deployment_project(content: &str) -> Option<String> {
    let mut in_config = false;
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_config = line.eq_ignore_ascii_case("[config]");
            continue;
        }
        if !in_config {
            continue;
        }
        if let Some((key, value)) = line.split_once('=')
            && key.trim().eq_ignore_ascii_case("project")
        {
            let value = value.trim();
            if !value.is_empty() {
                // Windows path separators
                return Some(value.replace('\\', "/"));
            }
        }
    }
    None
}

fn collect_project_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), ProjectError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ProjectError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| ProjectError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| ProjectError::io(&path, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if file_type.is_dir() {
            if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()) {
                continue;
            }
            collect_project_files(&path, paths)?;
        } else if file_type.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| PROJECT_EXTENSIONS.contains(&e))
        {
            paths.push(path);
        }
    }

    Ok(())
}
