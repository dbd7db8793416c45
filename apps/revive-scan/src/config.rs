//! Run settings and task request loading.
//!
//! The platform hands everything over through environment variables; clap
//! reads those (see `cli`) and `Settings::resolve` turns the raw values into
//! the fully-resolved settings passed to the scanner. Defaults:
//! - `timeout`: 6000 seconds
//! - `tool_root`: current directory
//! - `template`: `<tool_root>/config/tca-default.toml`
//! - `output`: `human`
//!
//! Overrides precedence: CLI > environment > defaults.

use crate::error::{Result, ScanError};
use crate::models::task::{TaskParams, TaskRequest};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 6000;

/// Raw values as collected from flags/environment before defaults apply.
#[derive(Debug, Default, Clone)]
pub struct RawSettings {
    pub task_request: PathBuf,
    pub work_dir: PathBuf,
    pub source_dir: PathBuf,
    pub custom_config: Option<String>,
    pub scan_files: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub tool_root: Option<PathBuf>,
    pub tool: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings for one scan run.
pub struct Settings {
    pub task_request: PathBuf,
    pub work_dir: PathBuf,
    pub source_dir: PathBuf,
    pub custom_config: Option<String>,
    pub scan_files: Option<PathBuf>,
    pub timeout: Duration,
    pub tool_root: PathBuf,
    pub tool: Option<PathBuf>,
    pub template: PathBuf,
    pub output: String,
}

impl Settings {
    /// Apply defaults to raw values. `cwd` stands in for an unset tool root.
    pub fn resolve(raw: RawSettings, cwd: &Path) -> Self {
        let tool_root = raw.tool_root.unwrap_or_else(|| cwd.to_path_buf());
        let template = raw
            .template
            .unwrap_or_else(|| tool_root.join("config").join("tca-default.toml"));
        Settings {
            task_request: raw.task_request,
            work_dir: raw.work_dir,
            source_dir: raw.source_dir,
            custom_config: raw.custom_config.filter(|s| !s.trim().is_empty()),
            scan_files: raw.scan_files,
            timeout: Duration::from_secs(raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            tool_root,
            tool: raw.tool,
            template,
            output: raw.output.unwrap_or_else(|| "human".to_string()),
        }
    }

    /// Raw tool output written by revive.
    pub fn raw_output_path(&self) -> PathBuf {
        self.work_dir.join("revive-result.json")
    }

    /// Normalized issues consumed by the platform.
    pub fn result_path(&self) -> PathBuf {
        self.work_dir.join("result.json")
    }
}

/// Load `task_params` from the task request document.
pub fn load_task_params(path: &Path) -> Result<TaskParams> {
    let s = fs::read_to_string(path).map_err(|e| {
        ScanError::io(format!("failed to read task request {}", path.display()), e)
    })?;
    let req: TaskRequest =
        serde_json::from_str(&s).map_err(|source| ScanError::InvalidTaskRequest {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(req.task_params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_applied() {
        let raw = RawSettings {
            task_request: "req.json".into(),
            work_dir: "/work".into(),
            source_dir: "/src".into(),
            custom_config: Some("  ".into()),
            ..Default::default()
        };
        let s = Settings::resolve(raw, Path::new("/opt/revive"));
        assert_eq!(s.timeout, Duration::from_secs(6000));
        assert_eq!(s.tool_root, PathBuf::from("/opt/revive"));
        assert_eq!(s.template, PathBuf::from("/opt/revive/config/tca-default.toml"));
        assert_eq!(s.output, "human");
        assert!(s.custom_config.is_none());
        assert_eq!(s.result_path(), PathBuf::from("/work/result.json"));
        assert_eq!(s.raw_output_path(), PathBuf::from("/work/revive-result.json"));
    }

    #[test]
    fn test_explicit_values_win() {
        let raw = RawSettings {
            timeout_secs: Some(30),
            tool_root: Some("/tools".into()),
            template: Some("/etc/revive.toml".into()),
            output: Some("json".into()),
            custom_config: Some("revive.toml".into()),
            ..Default::default()
        };
        let s = Settings::resolve(raw, Path::new("/ignored"));
        assert_eq!(s.timeout, Duration::from_secs(30));
        assert_eq!(s.tool_root, PathBuf::from("/tools"));
        assert_eq!(s.template, PathBuf::from("/etc/revive.toml"));
        assert_eq!(s.output, "json");
        assert_eq!(s.custom_config.as_deref(), Some("revive.toml"));
    }

    #[test]
    fn test_load_task_params() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("task_request.json");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "{}",
            r#"{"task_params": {"incr_scan": false, "rule_list": [{"name": "rule-a"}]}}"#
        )
        .unwrap();
        let params = load_task_params(&path).unwrap();
        assert!(!params.incr_scan);
        assert_eq!(params.rule_names().collect::<Vec<_>>(), vec!["rule-a"]);
    }

    #[test]
    fn test_request_without_task_params_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("task_request.json");
        fs::write(&path, r#"{"rule_list": []}"#).unwrap();
        assert!(matches!(
            load_task_params(&path),
            Err(ScanError::InvalidTaskRequest { .. })
        ));
        assert!(matches!(
            load_task_params(&dir.path().join("missing.json")),
            Err(ScanError::Io { .. })
        ));
    }
}
