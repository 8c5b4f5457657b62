//! Framework versions observed in restored NuGet package directories
//!
//! `<nuget>/microsoft.netcore.app/2.1.3/` means the application was restored
//! against runtime 2.1.3. Every distinct version found is reported.

use std::collections::BTreeMap;
use std::path::Path;

use semver::Version;
use tracing::debug;

use crate::project::ProjectError;
use crate::project::types::Framework;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredPackages {
    versions: BTreeMap<Framework, Vec<String>>,
}

impl RestoredPackages {
    /// Scan the package root. A missing package folder contributes nothing;
    /// any other read failure is returned.
    pub fn scan(packages_dir: &Path) -> Result<Self, ProjectError> {
        let mut versions = BTreeMap::new();

        for framework in Framework::ALL {
            let mut found = Vec::new();
            for folder in framework.package_folders() {
                scan_folder(&packages_dir.join(folder), &mut found)?;
            }
            found.sort_by(|a, b| compare_versions(a, b));
            found.dedup();
            if !found.is_empty() {
                debug!("Restored {:?} packages: {:?}", framework, found);
                versions.insert(framework, found);
            }
        }

        Ok(Self { versions })
    }

    pub fn versions(&self, framework: Framework) -> &[String] {
        self.versions
            .get(&framework)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl FromIterator<(Framework, Vec<String>)> for RestoredPackages {
    fn from_iter<I: IntoIterator<Item = (Framework, Vec<String>)>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().filter(|(_, v)| !v.is_empty()).collect(),
        }
    }
}

fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

fn scan_folder(folder: &Path, found: &mut Vec<String>) -> Result<(), ProjectError> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ProjectError::io(folder, e)),
    };

    for entry in entries {
        let entry = entry.map_err(|e| ProjectError::io(folder, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| ProjectError::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if Version::parse(&name).is_ok() {
            found.push(name);
        } else {
            debug!("Skipping non-version package folder {:?}", entry.path());
        }
    }

    Ok(())
}
