//! Workflow descriptor parsing.
//!
//! The descriptor is a GitHub Actions workflow. Only the deploy step of
//! `jobs.build_and_deploy_job` matters here; its `with` block is validated
//! field by field into [`DeployInputs`] so nothing downstream touches raw YAML.

use crate::{ConfigError, ConfigResult, SchemaError};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Substring of the `uses` field that marks the deploy step.
pub const DEPLOY_ACTION_MARKER: &str = "static-web-apps-deploy";

const JOB_NAME: &str = "build_and_deploy_job";

/// Raw inputs of the deploy step, still relative and without defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployInputs {
    pub app_build_command: Option<String>,
    pub api_build_command: Option<String>,
    pub app_location: Option<String>,
    pub app_artifact_location: Option<String>,
    pub api_location: Option<String>,
}

/// Read and parse the descriptor at `path`.
pub fn read_descriptor(path: &Path) -> ConfigResult<DeployInputs> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_descriptor(&content)
}

/// Parse a workflow descriptor from YAML text and extract the deploy inputs.
pub fn parse_descriptor(yaml: &str) -> ConfigResult<DeployInputs> {
    let doc: Value = serde_yaml::from_str(yaml)?;
    if doc.is_null() {
        return Err(ConfigError::EmptyDocument);
    }

    let with = deploy_step_inputs(&doc)?;

    Ok(DeployInputs {
        app_build_command: string_field(with, "app_build_command")?,
        api_build_command: string_field(with, "api_build_command")?,
        app_location: string_field(with, "app_location")?,
        app_artifact_location: string_field(with, "app_artifact_location")?,
        api_location: string_field(with, "api_location")?,
    })
}

fn deploy_step_inputs(doc: &Value) -> Result<&Mapping, SchemaError> {
    let jobs = present(doc.get("jobs")).ok_or(SchemaError::MissingJobs)?;
    let job = present(jobs.get(JOB_NAME)).ok_or(SchemaError::MissingJob)?;
    let steps = job
        .get("steps")
        .and_then(Value::as_sequence)
        .ok_or(SchemaError::MissingSteps)?;

    let (index, step) = steps
        .iter()
        .enumerate()
        .find(|(_, step)| is_deploy_step(step))
        .ok_or(SchemaError::NoDeployStep)?;

    step.get("with")
        .and_then(Value::as_mapping)
        .ok_or(SchemaError::MissingWith { index })
}

fn is_deploy_step(step: &Value) -> bool {
    step.get("uses")
        .and_then(Value::as_str)
        .is_some_and(|uses| uses.contains(DEPLOY_ACTION_MARKER))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn string_field(with: &Mapping, field: &str) -> Result<Option<String>, SchemaError> {
    match with.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::InvalidField {
            field: format!("with.{}", field),
            message: format!("expected a string, found {}", value_kind(other)),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
