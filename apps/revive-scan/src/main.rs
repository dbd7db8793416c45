//! revive-scan binary entry point.
//! Resolves settings once, runs the scanner, and reports the outcome.

use clap::Parser;
use revive_scan::cli::Cli;
use revive_scan::config::Settings;
use revive_scan::exec::ProcessRunner;
use revive_scan::scan::Scanner;
use revive_scan::{output, utils};

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{} cannot determine current directory: {}", utils::error_prefix(), e);
            std::process::exit(1);
        }
    };
    let settings = Settings::resolve(cli.raw_settings(), &cwd);
    log::debug!("settings: {:?}", settings);

    match Scanner::new(&settings, ProcessRunner).run() {
        Ok(report) => output::print_summary(&report, &settings.output),
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(1);
        }
    }
}
