//! Workflow descriptor parsing and configuration resolution.
//!
//! This crate handles:
//! - Locating the CI workflow descriptor (`.github/workflows`)
//! - Extracting the deploy step's inputs from it
//! - Resolving defaults, absolute paths and runtime-dependent artifact paths
//! - Applying caller-supplied overrides

pub mod descriptor;
pub mod error;
pub mod resolver;
pub mod workflow;

pub use descriptor::{DeployInputs, parse_descriptor, read_descriptor};
pub use error::{ConfigError, ConfigResult, SchemaError};
pub use resolver::{ConfigResolver, Resolution};
pub use workflow::{DescriptorLookup, locate_descriptor};
