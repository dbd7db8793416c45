//! Revive's JSON formatter schema.
//!
//! Revive emits either `null` or an array of failures. Only the fields the
//! platform needs are modeled; the rest (`Severity`, `Confidence`, `End`...)
//! are ignored on deserialization.

use super::Issue;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
/// A single failure reported by revive.
pub struct Finding {
    pub rule_name: String,
    pub failure: String,
    pub position: Position,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub start: Location,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub filename: String,
    pub line: u64,
    pub column: u64,
}

impl From<Finding> for Issue {
    fn from(f: Finding) -> Self {
        let Location {
            filename,
            line,
            column,
        } = f.position.start;
        Issue {
            path: filename,
            rule: f.rule_name,
            msg: f.failure,
            line,
            column,
        }
    }
}
