//! Scan orchestration.
//!
//! A run is linear: resolve tool, resolve rule config, resolve targets, run
//! revive, then map its findings. Any failure aborts the run and no result
//! file is written.

use crate::config::{self, Settings};
use crate::error::{Result, ScanError};
use crate::exec::{CommandRunner, Invocation};
use crate::models::finding::Finding;
use crate::models::task::TaskParams;
use crate::models::Issue;
use crate::output;
use crate::platform;
use crate::ruleset::{self, RuleConfigSource};
use crate::targets;
use log::{debug, error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of a completed run.
#[derive(Debug)]
pub struct ScanReport {
    pub issues: Vec<Issue>,
    pub result_path: PathBuf,
}

/// Drives one revive run using `runner` to execute the tool.
pub struct Scanner<'a, R: CommandRunner> {
    settings: &'a Settings,
    runner: R,
}

impl<'a, R: CommandRunner> Scanner<'a, R> {
    pub fn new(settings: &'a Settings, runner: R) -> Self {
        Scanner { settings, runner }
    }

    /// Load the task request, analyze, and write the result file.
    pub fn run(&self) -> Result<ScanReport> {
        let params = config::load_task_params(&self.settings.task_request)?;
        let issues = self.analyze(&params)?;
        let result_path = self.settings.result_path();
        output::write_result(&result_path, &issues)?;
        Ok(ScanReport {
            issues,
            result_path,
        })
    }

    /// Run revive for `params` and return normalized issues in emission order.
    pub fn analyze(&self, params: &TaskParams) -> Result<Vec<Issue>> {
        let s = self.settings;
        let tool = platform::resolve_tool(s.tool.as_deref(), &s.tool_root)?;
        info!("using tool: {}", tool.display());

        let cfg_src = RuleConfigSource {
            source_root: &s.source_dir,
            work_dir: &s.work_dir,
            custom: s.custom_config.as_deref(),
            template: Some(s.template.as_path()),
        };
        let config_path = ruleset::resolve_config(&cfg_src, params.rule_names())?;

        let targets = targets::resolve_targets(params.incr_scan, s.scan_files.as_deref())?;
        if targets.is_empty() {
            info!("no Go files to scan; skipping revive");
            return Ok(Vec::new());
        }

        let mut args: Vec<String> = vec![
            "-formatter".into(),
            "json".into(),
            "-config".into(),
            config_path.to_string_lossy().into_owned(),
        ];
        args.extend(targets.args());
        let invocation = Invocation {
            program: tool,
            args,
            cwd: s.source_dir.clone(),
            stdout_path: s.raw_output_path(),
            timeout: s.timeout,
        };
        info!(
            "running {} {}",
            invocation.program.display(),
            invocation.args.join(" ")
        );
        let out = self.runner.run(&invocation)?;
        if !out.stderr.is_empty() {
            let msg = String::from_utf8_lossy(&out.stderr).trim_end().to_string();
            error!("revive wrote to stderr (exit {:?})", out.status);
            return Err(ScanError::ToolFailed(msg));
        }
        let issues = parse_output(&invocation.stdout_path)?;
        debug!("revive reported {} issue(s)", issues.len());
        Ok(issues)
    }
}

/// Parse revive's JSON output. A missing or empty file and `null` all mean
/// no findings.
pub fn parse_output(path: &Path) -> Result<Vec<Issue>> {
    let data = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ScanError::io(format!("failed to read {}", path.display()), e)),
    };
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    let findings: Option<Vec<Finding>> =
        serde_json::from_str(&data).map_err(|source| ScanError::MalformedOutput {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(findings
        .unwrap_or_default()
        .into_iter()
        .map(Issue::from)
        .collect())
}
