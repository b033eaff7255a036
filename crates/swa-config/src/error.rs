//! Configuration resolution errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("workflow descriptor is empty")]
    EmptyDocument,

    #[error("invalid workflow descriptor: {0}")]
    Schema(#[from] SchemaError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structural problems in a workflow descriptor.
///
/// Each message names the path the user has to fix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing 'jobs'")]
    MissingJobs,

    #[error("missing 'jobs.build_and_deploy_job'")]
    MissingJob,

    #[error("missing 'jobs.build_and_deploy_job.steps'")]
    MissingSteps,

    #[error("no matching deploy step in 'jobs.build_and_deploy_job.steps[]'")]
    NoDeployStep,

    #[error("missing 'jobs.build_and_deploy_job.steps[{index}].with'")]
    MissingWith { index: usize },

    #[error("invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
