//! Runtime classification of an app root.
//!
//! Different ecosystems put their build output in different conventional
//! subdirectories, so the resolver asks a [`RuntimeDetector`] what kind of
//! app lives at the resolved app location.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Technology stack of an app root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    /// .NET project (Blazor and friends).
    Dotnet,
    /// Node.js project.
    Node,
    /// Anything else.
    Unknown,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::Unknown
    }
}

impl std::fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Runtime::Dotnet => write!(f, "dotnet"),
            Runtime::Node => write!(f, "node"),
            Runtime::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classifies the app found at a given root.
pub trait RuntimeDetector {
    fn detect(&self, app_location: &Path) -> Runtime;
}

impl<F> RuntimeDetector for F
where
    F: Fn(&Path) -> Runtime,
{
    fn detect(&self, app_location: &Path) -> Runtime {
        self(app_location)
    }
}

/// Detects the runtime from the files directly inside the app root.
///
/// `.csproj` or `.sln` files mean .NET, a `package.json` means Node. .NET
/// wins when both are present. A missing or unreadable root is `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRuntimeDetector;

const DOTNET_EXTENSIONS: &[&str] = &["csproj", "sln"];

impl RuntimeDetector for FsRuntimeDetector {
    fn detect(&self, app_location: &Path) -> Runtime {
        let entries = match std::fs::read_dir(app_location) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %app_location.display(), error = %e, "App root not readable");
                return Runtime::Unknown;
            }
        };

        let mut has_package_json = false;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_dotnet = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| DOTNET_EXTENSIONS.contains(&ext));
            if is_dotnet {
                return Runtime::Dotnet;
            }
            if entry.file_name() == "package.json" {
                has_package_json = true;
            }
        }

        if has_package_json {
            Runtime::Node
        } else {
            Runtime::Unknown
        }
    }
}
