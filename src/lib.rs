//! Version resolution for a .NET Core buildpack
//!
//! Given the version hints an application carries (buildpack.yml,
//! global.json, runtimeconfig.json, project files, restored packages),
//! selects exactly one concrete SDK version and the framework versions to
//! install from the buildpack manifest.

pub mod config;
pub mod install;
pub mod project;
pub mod supply;
pub mod version;
