//! CLI command implementations.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use swa_config::{ConfigResolver, DescriptorLookup, Resolution, locate_descriptor, read_descriptor};
use swa_core::{FsRuntimeDetector, OverrideConfig};

/// Absolute working directory, from `--cwd` or the process.
pub fn working_dir(cwd: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = match cwd {
        Some(cwd) => cwd,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let cwd = std::path::absolute(&cwd)
        .with_context(|| format!("Failed to resolve working directory: {}", cwd.display()))?;
    Ok(swa_core::path::normalize(cwd))
}

pub fn resolve(cwd: &Path, overrides: Option<&OverrideConfig>, json: bool) -> Result<()> {
    let resolver = ConfigResolver::new(cwd, FsRuntimeDetector);
    let resolution = resolver
        .resolve(overrides)
        .context("Failed to resolve configuration")?;

    match resolution {
        Resolution::Resolved(config) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("{}", config);
            }
        }
        Resolution::Fallback(Some(overrides)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&overrides)?);
            } else {
                println!("No workflow descriptor found, using overrides only:");
                print_override("appLocation", overrides.app_location());
                print_override("apiLocation", overrides.api_location());
                print_override("appArtifactLocation", overrides.app_artifact_location());
            }
        }
        Resolution::Fallback(None) => {
            if json {
                println!("null");
            } else {
                println!("No workflow descriptor found and no overrides given");
            }
        }
    }
    Ok(())
}

fn print_override(name: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("  {:<21}{}", format!("{}:", name), value);
    }
}

pub fn locate(cwd: &Path) {
    match locate_descriptor(cwd) {
        DescriptorLookup::Found(path) => println!("{}", path.display()),
        DescriptorLookup::MissingDirectory(dir) => {
            println!("Workflows directory not found: {}", dir.display());
        }
        DescriptorLookup::MissingFile(dir) => {
            println!("No workflow descriptor in {}", dir.display());
        }
    }
}

pub fn validate(cwd: &Path, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => cwd.join(path),
        None => match locate_descriptor(cwd) {
            DescriptorLookup::Found(path) => path,
            DescriptorLookup::MissingDirectory(dir) | DescriptorLookup::MissingFile(dir) => {
                anyhow::bail!("No workflow descriptor found in {}", dir.display());
            }
        },
    };

    match read_descriptor(&path) {
        Ok(_inputs) => {
            println!("Workflow descriptor is valid: {}", path.display());
            Ok(())
        }
        Err(e) => {
            println!("Workflow descriptor error in {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
