//! Result file writing and run summaries.
//!
//! The result file is always a 2-space indented JSON array of issues. The
//! summary printed after a run supports `human` (default) and `json`.

use crate::error::{Result, ScanError};
use crate::models::Issue;
use crate::scan::ScanReport;
use crate::utils;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Write normalized issues to `path`, replacing any previous content.
pub fn write_result(path: &Path, issues: &[Issue]) -> Result<()> {
    let body = serde_json::to_string_pretty(issues)?;
    fs::write(path, body)
        .map_err(|e| ScanError::io(format!("failed to write {}", path.display()), e))
}

/// Print a one-line summary of a completed run.
pub fn print_summary(report: &ScanReport, output: &str) {
    match output {
        "json" => println!("{}", compose_summary_json(report)),
        _ => {
            let files = distinct_files(&report.issues);
            eprintln!(
                "{} Found {} issue(s) in {} file(s); results written to {}",
                utils::info_prefix(),
                report.issues.len(),
                files,
                report.result_path.display()
            );
        }
    }
}

fn distinct_files(issues: &[Issue]) -> usize {
    issues
        .iter()
        .map(|i| i.path.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Compose the JSON summary object (pure) for testing purposes.
pub fn compose_summary_json(report: &ScanReport) -> JsonVal {
    json!({
        "issues": report.issues.len(),
        "files": distinct_files(&report.issues),
        "result": report.result_path.to_string_lossy(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn issue(path: &str, rule: &str) -> Issue {
        Issue {
            path: path.into(),
            rule: rule.into(),
            msg: "m".into(),
            line: 1,
            column: 2,
        }
    }

    #[test]
    fn test_write_empty_result() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("result.json");
        write_result(&p, &[]).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "[]");
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("result.json");
        write_result(&p, &[issue("a.go", "r"), issue("b.go", "r")]).unwrap();
        write_result(&p, &[issue("c.go", "r")]).unwrap();
        let back: Vec<Issue> = serde_json::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
        assert_eq!(back, vec![issue("c.go", "r")]);
    }

    #[test]
    fn test_compose_summary_json_counts_files() {
        let report = ScanReport {
            issues: vec![issue("a.go", "r1"), issue("a.go", "r2"), issue("b.go", "r1")],
            result_path: PathBuf::from("/work/result.json"),
        };
        let out = compose_summary_json(&report);
        assert_eq!(out["issues"], 3);
        assert_eq!(out["files"], 2);
        assert_eq!(out["result"], "/work/result.json");
    }
}
