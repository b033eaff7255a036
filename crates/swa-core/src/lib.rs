//! Core domain types for the static web apps emulator.
//!
//! This crate contains:
//! - Resolved and override configuration records
//! - Runtime classification and the detector seam
//! - Lexical path joining and normalisation

pub mod config;
pub mod path;
pub mod runtime;

pub use config::{OverrideConfig, OverrideConfigBuilder, ResolvedConfig};
pub use runtime::{FsRuntimeDetector, Runtime, RuntimeDetector};
