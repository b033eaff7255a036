//! Static web apps emulator CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swa_core::OverrideConfig;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "swa-emu")]
#[command(about = "Static web apps emulator configuration", long_about = None)]
struct Cli {
    /// Working directory to resolve against
    #[arg(long, global = true, env = "SWA_CWD")]
    cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the build and location configuration
    Resolve {
        /// App source location, relative to the working directory
        #[arg(long, env = "SWA_APP_LOCATION")]
        app_location: Option<String>,
        /// API source location, relative to the working directory
        #[arg(long, env = "SWA_API_LOCATION")]
        api_location: Option<String>,
        /// Built app output location, relative to the working directory
        #[arg(long, env = "SWA_APP_ARTIFACT_LOCATION")]
        app_artifact_location: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show which workflow descriptor would be used
    Locate,
    /// Validate a workflow descriptor
    Validate {
        /// Path to the descriptor (defaults to the located one)
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cwd = commands::working_dir(cli.cwd)?;

    match cli.command {
        Commands::Resolve {
            app_location,
            api_location,
            app_artifact_location,
            json,
        } => {
            let overrides = OverrideConfig {
                app_location,
                api_location,
                app_artifact_location,
            };
            let overrides = (!overrides.is_empty()).then_some(overrides);
            commands::resolve(&cwd, overrides.as_ref(), json)?;
        }
        Commands::Locate => {
            commands::locate(&cwd);
        }
        Commands::Validate { path } => {
            commands::validate(&cwd, path)?;
        }
    }

    Ok(())
}
