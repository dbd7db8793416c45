//! Scan target selection.
//!
//! Full scans use revive's recursive package pattern. Incremental scans keep
//! the changed Go files, falling back to a full scan when the joined list
//! would make the command line too long.

use crate::error::{Result, ScanError};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Recursive package pattern meaning "everything under the working dir".
pub const SCAN_ALL: &str = "./...";

/// Source suffix revive understands.
pub const GO_SUFFIX: &str = ".go";

/// Longest joined file list passed on the command line.
pub const MAX_JOINED_LEN: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// What revive is asked to scan.
pub enum Targets {
    All,
    Files(Vec<String>),
}

impl Targets {
    /// Command-line arguments for this target set.
    pub fn args(&self) -> Vec<String> {
        match self {
            Targets::All => vec![SCAN_ALL.to_string()],
            Targets::Files(files) => files.clone(),
        }
    }

    /// True when there is nothing to scan.
    pub fn is_empty(&self) -> bool {
        matches!(self, Targets::Files(f) if f.is_empty())
    }
}

/// Pick targets from an already-loaded changed-file list.
pub fn select(incr_scan: bool, changed: &[String]) -> Targets {
    if !incr_scan {
        return Targets::All;
    }
    let go_files: Vec<String> = changed
        .iter()
        .filter(|f| f.ends_with(GO_SUFFIX))
        .cloned()
        .collect();
    let joined = go_files.join(" ").chars().count();
    if joined > MAX_JOINED_LEN {
        info!(
            "{} changed Go files ({} chars) exceed the command-line limit; scanning everything",
            go_files.len(),
            joined
        );
        return Targets::All;
    }
    debug!(
        "incremental scan: {} of {} changed files are Go sources",
        go_files.len(),
        changed.len()
    );
    Targets::Files(go_files)
}

/// Resolve targets for a run, reading the changed-file list only when an
/// incremental scan is requested.
pub fn resolve_targets(incr_scan: bool, scan_files: Option<&Path>) -> Result<Targets> {
    if !incr_scan {
        return Ok(Targets::All);
    }
    let path = scan_files.ok_or(ScanError::MissingSetting("SCAN_FILES"))?;
    let changed = load_changed_files(path)?;
    Ok(select(true, &changed))
}

/// Read a JSON array of file paths.
pub fn load_changed_files(path: &Path) -> Result<Vec<String>> {
    let s = fs::read_to_string(path).map_err(|e| {
        ScanError::io(format!("failed to read changed-file list {}", path.display()), e)
    })?;
    serde_json::from_str(&s).map_err(|source| ScanError::InvalidTaskRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_scan_ignores_file_list() {
        assert_eq!(select(false, &[]), Targets::All);
        assert_eq!(select(false, &strings(&["a.go", "b.go"])), Targets::All);
        assert_eq!(Targets::All.args(), vec!["./..."]);
    }

    #[test]
    fn test_incremental_keeps_go_files_in_order() {
        let changed = strings(&["cmd/main.go", "README.md", "pkg/a.go", "go.mod", "x.gox"]);
        assert_eq!(
            select(true, &changed),
            Targets::Files(strings(&["cmd/main.go", "pkg/a.go"]))
        );
    }

    #[test]
    fn test_incremental_without_go_files_is_empty() {
        let t = select(true, &strings(&["README.md", "Makefile"]));
        assert!(t.is_empty());
        assert!(t.args().is_empty());
        assert!(!Targets::All.is_empty());
    }

    #[test]
    fn test_long_list_falls_back_to_all() {
        // 9_999 entries of "abcdefg.go" (10 chars) joined by spaces: 109_988 chars
        let many: Vec<String> = (0..9_999).map(|_| "abcdefg.go".to_string()).collect();
        assert_eq!(select(true, &many), Targets::All);
    }

    #[test]
    fn test_limit_is_exclusive() {
        // One path of exactly MAX_JOINED_LEN chars stays incremental
        let mut name = "a".repeat(MAX_JOINED_LEN - GO_SUFFIX.len());
        name.push_str(GO_SUFFIX);
        assert_eq!(select(true, &[name.clone()]), Targets::Files(vec![name.clone()]));
        name.insert(0, 'b');
        assert_eq!(select(true, &[name]), Targets::All);
    }

    #[test]
    fn test_limit_counts_chars_not_bytes() {
        // 40_003 chars but 120_003 bytes
        let mut name = "文".repeat(40_000);
        name.push_str(GO_SUFFIX);
        assert_eq!(select(true, &[name.clone()]), Targets::Files(vec![name]));

        let mut wide = "文".repeat(MAX_JOINED_LEN - GO_SUFFIX.len() + 1);
        wide.push_str(GO_SUFFIX);
        assert_eq!(select(true, &[wide]), Targets::All);
    }

    #[test]
    fn test_resolve_reads_list_and_requires_path() {
        let dir = tempdir().unwrap();
        let list = dir.path().join("changed.json");
        fs::write(&list, r#"["a.go", "b.py"]"#).unwrap();
        assert_eq!(
            resolve_targets(true, Some(list.as_path())).unwrap(),
            Targets::Files(strings(&["a.go"]))
        );
        assert!(matches!(
            resolve_targets(true, None),
            Err(ScanError::MissingSetting("SCAN_FILES"))
        ));
        assert_eq!(resolve_targets(false, None).unwrap(), Targets::All);
    }

    #[test]
    fn test_bad_list_is_rejected() {
        let dir = tempdir().unwrap();
        let list = dir.path().join("changed.json");
        fs::write(&list, r#"{"files": []}"#).unwrap();
        assert!(matches!(
            load_changed_files(&list),
            Err(ScanError::InvalidTaskRequest { .. })
        ));
    }
}
