use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dotnet_version_resolver::config::{NUGET_PACKAGES_DIR, log_filter};
use dotnet_version_resolver::supply;
use dotnet_version_resolver::version::catalog::Manifest;

#[derive(Parser)]
#[command(name = "dotnet-version-resolver")]
#[command(version, about = "Resolve the .NET SDK and framework versions an application needs")]
struct Cli {
    /// Application directory
    #[arg(long)]
    build_dir: PathBuf,

    /// Buildpack manifest listing installable versions
    #[arg(long)]
    manifest: PathBuf,

    /// Restored NuGet packages [default: <build-dir>/.nuget/packages]
    #[arg(long)]
    nuget_packages: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter()))
        .with_writer(std::io::stderr)
        .init();

    let manifest = Manifest::load(&cli.manifest)?;
    let packages_dir = cli
        .nuget_packages
        .unwrap_or_else(|| cli.build_dir.join(NUGET_PACKAGES_DIR));

    let plan = supply::plan(&cli.build_dir, &packages_dir, &manifest)
        .with_context(|| format!("resolving versions for {}", cli.build_dir.display()))?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
