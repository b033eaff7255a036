//! Resolved and override configuration records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Fully resolved build and location configuration for the emulator.
///
/// All path fields are absolute and lexically normalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Command used to build the front-end app.
    pub app_build_command: String,
    /// Command used to build the API.
    pub api_build_command: String,
    /// App source root.
    pub app_location: PathBuf,
    /// API source root.
    pub api_location: PathBuf,
    /// Built app output.
    pub app_artifact_location: PathBuf,
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "appBuildCommand:     {}", self.app_build_command)?;
        writeln!(f, "apiBuildCommand:     {}", self.api_build_command)?;
        writeln!(f, "appLocation:         {}", self.app_location.display())?;
        writeln!(f, "apiLocation:         {}", self.api_location.display())?;
        write!(
            f,
            "appArtifactLocation: {}",
            self.app_artifact_location.display()
        )
    }
}

/// Caller-supplied locations that take precedence over the workflow descriptor.
///
/// Values are relative to the working directory. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_artifact_location: Option<String>,
}

impl OverrideConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> OverrideConfigBuilder {
        OverrideConfigBuilder::new()
    }

    /// App location override, if set to a non-empty value.
    pub fn app_location(&self) -> Option<&str> {
        non_empty(&self.app_location)
    }

    /// API location override, if set to a non-empty value.
    pub fn api_location(&self) -> Option<&str> {
        non_empty(&self.api_location)
    }

    /// Artifact location override, if set to a non-empty value.
    pub fn app_artifact_location(&self) -> Option<&str> {
        non_empty(&self.app_artifact_location)
    }

    /// True when no field carries a usable override.
    pub fn is_empty(&self) -> bool {
        self.app_location().is_none()
            && self.api_location().is_none()
            && self.app_artifact_location().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Builder for [`OverrideConfig`].
pub struct OverrideConfigBuilder {
    overrides: OverrideConfig,
}

impl OverrideConfigBuilder {
    pub fn new() -> Self {
        Self {
            overrides: OverrideConfig::default(),
        }
    }

    pub fn with_app_location(mut self, location: impl Into<String>) -> Self {
        self.overrides.app_location = Some(location.into());
        self
    }

    pub fn with_api_location(mut self, location: impl Into<String>) -> Self {
        self.overrides.api_location = Some(location.into());
        self
    }

    pub fn with_app_artifact_location(mut self, location: impl Into<String>) -> Self {
        self.overrides.app_artifact_location = Some(location.into());
        self
    }

    pub fn build(self) -> OverrideConfig {
        self.overrides
    }
}

impl Default for OverrideConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
