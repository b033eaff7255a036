//! Configuration resolution.
//!
//! Resolution is a single linear pipeline:
//! locate descriptor -> parse deploy inputs -> apply defaults -> resolve paths
//! -> runtime-dependent artifact path -> apply overrides.
//!
//! A missing descriptor is not an error: the caller's overrides are handed
//! back unchanged so the emulator stays usable without a workflow file.

use crate::descriptor::{DeployInputs, read_descriptor};
use crate::workflow::{DescriptorLookup, locate_descriptor};
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use swa_core::path::{join_normalized, normalize};
use swa_core::{FsRuntimeDetector, OverrideConfig, ResolvedConfig, Runtime, RuntimeDetector};
use tracing::{debug, info, warn};

/// Build command used when the descriptor does not name one.
pub const DEFAULT_BUILD_COMMAND: &str = "npm run build --if-present";

/// Where .NET projects publish, relative to the app root.
pub const DOTNET_PUBLISH_DIR: &str = "bin/Debug/netstandard2.1/publish";

const DEFAULT_APP_LOCATION: &str = "/";
const DEFAULT_APP_ARTIFACT_LOCATION: &str = "/";
const DEFAULT_API_LOCATION: &str = "api";

/// Result of a resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Configuration derived from the workflow descriptor.
    Resolved(ResolvedConfig),
    /// No descriptor was found; the overrides are returned unchanged.
    Fallback(Option<OverrideConfig>),
}

impl Resolution {
    pub fn resolved(&self) -> Option<&ResolvedConfig> {
        match self {
            Resolution::Resolved(config) => Some(config),
            Resolution::Fallback(_) => None,
        }
    }

    pub fn into_resolved(self) -> Option<ResolvedConfig> {
        match self {
            Resolution::Resolved(config) => Some(config),
            Resolution::Fallback(_) => None,
        }
    }
}

/// Resolves emulator configuration for a working directory.
#[derive(Debug, Clone)]
pub struct ConfigResolver<D = FsRuntimeDetector> {
    cwd: PathBuf,
    detector: D,
}

impl ConfigResolver<FsRuntimeDetector> {
    /// Resolver for the process working directory with filesystem runtime detection.
    pub fn from_current_dir() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Self::new(cwd, FsRuntimeDetector))
    }
}

impl<D: RuntimeDetector> ConfigResolver<D> {
    pub fn new(cwd: impl Into<PathBuf>, detector: D) -> Self {
        Self {
            cwd: cwd.into(),
            detector,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Look for the workflow descriptor under the working directory.
    pub fn locate(&self) -> DescriptorLookup {
        locate_descriptor(&self.cwd)
    }

    /// Resolve the configuration, letting `overrides` take precedence.
    ///
    /// Reads the descriptor fresh on every call.
    pub fn resolve(&self, overrides: Option<&OverrideConfig>) -> ConfigResult<Resolution> {
        let path = match self.locate() {
            DescriptorLookup::Found(path) => path,
            DescriptorLookup::MissingDirectory(dir) => {
                warn!(
                    path = %dir.display(),
                    "Workflows directory not found, falling back to overrides"
                );
                return Ok(Resolution::Fallback(overrides.cloned()));
            }
            DescriptorLookup::MissingFile(dir) => {
                warn!(
                    path = %dir.display(),
                    "No workflow descriptor found, falling back to overrides"
                );
                return Ok(Resolution::Fallback(overrides.cloned()));
            }
        };

        info!(path = %path.display(), "Using workflow descriptor");
        let inputs = read_descriptor(&path)?;

        let mut config = self.resolve_inputs(&inputs);
        if let Some(overrides) = overrides {
            config = self.apply_overrides(config, overrides);
        }

        info!(
            app_location = %config.app_location.display(),
            api_location = %config.api_location.display(),
            app_artifact_location = %config.app_artifact_location.display(),
            app_build_command = %config.app_build_command,
            api_build_command = %config.api_build_command,
            "Resolved configuration"
        );
        Ok(Resolution::Resolved(config))
    }

    /// Apply defaults to the deploy inputs and resolve them to absolute paths.
    pub fn resolve_inputs(&self, inputs: &DeployInputs) -> ResolvedConfig {
        let app_build_command = inputs
            .app_build_command
            .clone()
            .unwrap_or_else(|| DEFAULT_BUILD_COMMAND.to_string());
        let api_build_command = inputs
            .api_build_command
            .clone()
            .unwrap_or_else(|| DEFAULT_BUILD_COMMAND.to_string());

        let app_location = join_normalized(
            &self.cwd,
            inputs.app_location.as_deref().unwrap_or(DEFAULT_APP_LOCATION),
        );

        let api_location = match inputs.api_location.as_deref().unwrap_or(DEFAULT_API_LOCATION) {
            "" => "/",
            location => location,
        };
        let api_location = join_normalized(&self.cwd, api_location);

        // Stays relative until the runtime is known.
        let artifact = normalize(
            inputs
                .app_artifact_location
                .as_deref()
                .unwrap_or(DEFAULT_APP_ARTIFACT_LOCATION),
        );
        let app_artifact_location = self.artifact_location(&app_location, &artifact);

        ResolvedConfig {
            app_build_command,
            api_build_command,
            app_location,
            api_location,
            app_artifact_location,
        }
    }

    /// Replace each location the overrides define with `cwd` joined to the override.
    ///
    /// An overridden app location does not re-run runtime detection; the
    /// artifact location keeps its descriptor-derived value unless it is
    /// overridden itself.
    pub fn apply_overrides(
        &self,
        mut config: ResolvedConfig,
        overrides: &OverrideConfig,
    ) -> ResolvedConfig {
        if let Some(location) = overrides.app_location() {
            config.app_location = join_normalized(&self.cwd, location);
        }
        if let Some(location) = overrides.app_artifact_location() {
            config.app_artifact_location = join_normalized(&self.cwd, location);
        }
        if let Some(location) = overrides.api_location() {
            config.api_location = join_normalized(&self.cwd, location);
        }
        config
    }

    fn artifact_location(&self, app_location: &Path, artifact: &Path) -> PathBuf {
        let runtime = self.detector.detect(app_location);
        debug!(path = %app_location.display(), %runtime, "Detected runtime");

        let artifact = artifact.to_string_lossy();
        match runtime {
            Runtime::Dotnet => {
                join_normalized(join_normalized(app_location, DOTNET_PUBLISH_DIR), &artifact)
            }
            Runtime::Node | Runtime::Unknown => join_normalized(app_location, &artifact),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn node(_: &Path) -> Runtime {
        Runtime::Node
    }

    fn dotnet(_: &Path) -> Runtime {
        Runtime::Dotnet
    }

    fn inputs(app: Option<&str>, artifact: Option<&str>, api: Option<&str>) -> DeployInputs {
        DeployInputs {
            app_location: app.map(str::to_string),
            app_artifact_location: artifact.map(str::to_string),
            api_location: api.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let resolver = ConfigResolver::new("/proj", node);
        let config = resolver.resolve_inputs(&DeployInputs::default());

        assert_eq!(config.app_build_command, DEFAULT_BUILD_COMMAND);
        assert_eq!(config.api_build_command, DEFAULT_BUILD_COMMAND);
        assert_eq!(config.app_location, PathBuf::from("/proj"));
        assert_eq!(config.api_location, PathBuf::from("/proj/api"));
        assert_eq!(config.app_artifact_location, PathBuf::from("/proj"));
    }

    #[test]
    fn test_client_server_layout() {
        let resolver = ConfigResolver::new("/proj", node);
        let config = resolver.resolve_inputs(&inputs(Some("client"), None, Some("server")));

        assert_eq!(
            config,
            ResolvedConfig {
                app_build_command: "npm run build --if-present".to_string(),
                api_build_command: "npm run build --if-present".to_string(),
                app_location: PathBuf::from("/proj/client"),
                api_location: PathBuf::from("/proj/server"),
                app_artifact_location: PathBuf::from("/proj/client"),
            }
        );
    }

    #[test]
    fn test_empty_api_location_is_root() {
        let resolver = ConfigResolver::new("/proj", node);
        let config = resolver.resolve_inputs(&inputs(None, None, Some("")));
        assert_eq!(config.api_location, PathBuf::from("/proj"));
    }

    #[test]
    fn test_artifact_joined_to_app_location() {
        let resolver = ConfigResolver::new("/proj", node);
        let config = resolver.resolve_inputs(&inputs(Some("/app"), Some("./dist/"), None));
        assert_eq!(config.app_artifact_location, PathBuf::from("/proj/app/dist"));
    }

    #[test]
    fn test_dotnet_artifact_location() {
        let resolver = ConfigResolver::new("/proj", dotnet);
        let config = resolver.resolve_inputs(&inputs(Some("Client"), Some("wwwroot"), None));
        assert_eq!(
            config.app_artifact_location,
            PathBuf::from("/proj/Client/bin/Debug/netstandard2.1/publish/wwwroot")
        );

        let config = resolver.resolve_inputs(&inputs(Some("Client"), None, None));
        assert_eq!(
            config.app_artifact_location,
            PathBuf::from("/proj/Client/bin/Debug/netstandard2.1/publish")
        );
    }

    #[test]
    fn test_detector_sees_resolved_app_location() {
        let seen = RefCell::new(Vec::new());
        let detector = |path: &Path| {
            seen.borrow_mut().push(path.to_path_buf());
            Runtime::Unknown
        };
        let resolver = ConfigResolver::new("/proj", detector);
        resolver.resolve_inputs(&inputs(Some("./web/"), None, None));

        assert_eq!(*seen.borrow(), vec![PathBuf::from("/proj/web")]);
    }

    #[test]
    fn test_overrides_replace_fields() {
        let resolver = ConfigResolver::new("/proj", dotnet);
        let config = resolver.resolve_inputs(&inputs(Some("client"), Some("dist"), None));
        let overrides = OverrideConfig::builder()
            .with_app_location("other")
            .with_api_location("/functions")
            .build();

        let config = resolver.apply_overrides(config, &overrides);
        assert_eq!(config.app_location, PathBuf::from("/proj/other"));
        assert_eq!(config.api_location, PathBuf::from("/proj/functions"));
        // Not re-derived from the overridden app location.
        assert_eq!(
            config.app_artifact_location,
            PathBuf::from("/proj/client/bin/Debug/netstandard2.1/publish/dist")
        );
    }

    #[test]
    fn test_artifact_override_is_joined_to_cwd() {
        let resolver = ConfigResolver::new("/proj", node);
        let config = resolver.resolve_inputs(&inputs(Some("client"), Some("dist"), None));
        let overrides = OverrideConfig::builder()
            .with_app_artifact_location("build/out")
            .build();

        let config = resolver.apply_overrides(config, &overrides);
        assert_eq!(config.app_artifact_location, PathBuf::from("/proj/build/out"));
        assert_eq!(config.app_location, PathBuf::from("/proj/client"));
    }

    #[test]
    fn test_from_current_dir() {
        let resolver = ConfigResolver::from_current_dir().unwrap();
        assert_eq!(resolver.cwd(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let resolver = ConfigResolver::new("/proj", node);
        let config = resolver.resolve_inputs(&inputs(Some("client"), None, None));
        let overrides = OverrideConfig::builder().with_app_location("").build();

        let merged = resolver.apply_overrides(config.clone(), &overrides);
        assert_eq!(merged, config);
    }
}
