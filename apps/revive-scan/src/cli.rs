//! CLI argument parsing via `clap`.
//!
//! Every input can also come from the environment variable the analysis
//! platform sets for its tool adapters.

use crate::config::RawSettings;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "revive-scan",
    version,
    about = "Run revive and normalize its findings",
    long_about = "revive-scan — runs the revive Go linter over a source tree and writes its findings as a normalized issue list.\n\nConfiguration precedence: CLI > environment > defaults.",
    after_help = "Examples:\n  revive-scan --task-request task.json --work-dir out --source-dir repo\n  TASK_REQUEST=task.json RESULT_DIR=out SOURCE_DIR=repo revive-scan -v"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(long, env = "TASK_REQUEST", help = "Task request JSON with task_params")]
    pub task_request: PathBuf,
    #[arg(long, env = "RESULT_DIR", help = "Work directory for generated config and results")]
    pub work_dir: PathBuf,
    #[arg(long, env = "SOURCE_DIR", help = "Source root revive runs in")]
    pub source_dir: PathBuf,
    #[arg(long = "config", env = "REVIVE_CONFIG", help = "Custom revive config, relative to the source root")]
    pub custom_config: Option<String>,
    #[arg(long, env = "SCAN_FILES", help = "JSON list of changed files (incremental scans)")]
    pub scan_files: Option<PathBuf>,
    #[arg(long = "timeout", env = "TCA_TASK_TIMEOUT", help = "Tool timeout in seconds (default: 6000)")]
    pub timeout_secs: Option<u64>,
    #[arg(long, env = "REVIVE_TOOL_ROOT", help = "Directory holding bin/<os>/<arch>/revive (default: current dir)")]
    pub tool_root: Option<PathBuf>,
    #[arg(long, env = "REVIVE_BIN", help = "Explicit revive executable; skips platform lookup")]
    pub tool: Option<PathBuf>,
    #[arg(long, env = "REVIVE_TEMPLATE", help = "Base config prepended to generated configs")]
    pub template: Option<PathBuf>,
    #[arg(long, value_parser = ["human", "json"], help = "Summary output: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Disable logging")]
    pub quiet: bool,
}

impl Cli {
    /// Initialize `env_logger` from the verbosity flags.
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }
        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }

    /// Raw settings to be resolved against defaults.
    pub fn raw_settings(&self) -> RawSettings {
        RawSettings {
            task_request: self.task_request.clone(),
            work_dir: self.work_dir.clone(),
            source_dir: self.source_dir.clone(),
            custom_config: self.custom_config.clone(),
            scan_files: self.scan_files.clone(),
            timeout_secs: self.timeout_secs,
            tool_root: self.tool_root.clone(),
            tool: self.tool.clone(),
            template: self.template.clone(),
            output: self.output.clone(),
        }
    }
}
