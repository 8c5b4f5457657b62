//! Common types for project inspection

use crate::config::{DOTNET_ASPNETCORE, DOTNET_RUNTIME};

/// Shared framework family, installed next to the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Framework {
    /// Microsoft.NETCore.App
    Runtime,
    /// Microsoft.AspNetCore.App (and the older Microsoft.AspNetCore.All)
    AspNetCore,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::Runtime, Framework::AspNetCore];

    /// Returns the manifest dependency name
    pub fn dependency_name(&self) -> &'static str {
        match self {
            Framework::Runtime => DOTNET_RUNTIME,
            Framework::AspNetCore => DOTNET_ASPNETCORE,
        }
    }

    /// Framework names as written in runtimeconfig.json and PackageReference
    pub fn framework_names(&self) -> &'static [&'static str] {
        match self {
            Framework::Runtime => &["Microsoft.NETCore.App"],
            Framework::AspNetCore => &["Microsoft.AspNetCore.App", "Microsoft.AspNetCore.All"],
        }
    }

    /// Directory names under the NuGet packages root
    pub fn package_folders(&self) -> &'static [&'static str] {
        match self {
            Framework::Runtime => &["microsoft.netcore.app"],
            Framework::AspNetCore => &["microsoft.aspnetcore.app", "microsoft.aspnetcore.all"],
        }
    }

    /// Matches a framework name, ignoring case
    pub fn is_named(&self, name: &str) -> bool {
        self.framework_names()
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name))
    }
}

impl std::str::FromStr for Framework {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DOTNET_RUNTIME => Ok(Framework::Runtime),
            DOTNET_ASPNETCORE => Ok(Framework::AspNetCore),
            _ => Err(()),
        }
    }
}
