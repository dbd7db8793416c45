//! Shared data models: task parameters, raw revive findings, and the
//! normalized issue shape written to the result file.

pub mod finding;
pub mod task;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single normalized issue as consumed by the analysis platform.
pub struct Issue {
    pub path: String,
    pub rule: String,
    pub msg: String,
    pub line: u64,
    pub column: u64,
}
