//! revive-scan core library.
//!
//! Runs the revive Go linter as an external process and converts its JSON
//! findings into the normalized issue list expected by the analysis platform.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Run settings and task request loading.
//! - `error`: Error type shared by every stage.
//! - `exec`: Command execution seam and the real process runner.
//! - `models`: Task parameters, raw findings, and normalized issues.
//! - `output`: Result file writing and summaries.
//! - `platform`: Bundled executable selection.
//! - `ruleset`: Rule configuration selection and generation.
//! - `scan`: The orchestrator.
//! - `targets`: Incremental/full target selection.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod models;
pub mod output;
pub mod platform;
pub mod ruleset;
pub mod scan;
pub mod targets;
pub mod utils;

pub use error::{Result, ScanError};
