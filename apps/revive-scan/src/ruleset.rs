//! Revive rule configuration.
//!
//! A custom config under the source root is used verbatim when it exists.
//! Otherwise a config is generated into the work directory from the base
//! template plus one `[rule.<name>]` table per requested rule. The generated
//! file is rewritten from scratch on every run.

use crate::error::{Result, ScanError};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the generated config inside the work directory.
pub const GENERATED_CONFIG: &str = "tca-default.toml";

/// Inputs needed to pick or generate the rule configuration.
pub struct RuleConfigSource<'a> {
    pub source_root: &'a Path,
    pub work_dir: &'a Path,
    /// Config path relative to the source root, if the caller named one
    pub custom: Option<&'a str>,
    /// Base template prepended to generated configs
    pub template: Option<&'a Path>,
}

/// Return the config file revive should use for this run.
pub fn resolve_config<'r>(
    src: &RuleConfigSource<'_>,
    rules: impl IntoIterator<Item = &'r str>,
) -> Result<PathBuf> {
    if let Some(rel) = src.custom.filter(|s| !s.trim().is_empty()) {
        let candidate = src.source_root.join(rel);
        if candidate.is_file() {
            info!("using custom revive config: {}", candidate.display());
            check_toml(&candidate);
            return Ok(candidate);
        }
        warn!(
            "custom revive config not found at {}; generating one from the rule list",
            candidate.display()
        );
    }

    let base = match src.template {
        Some(t) if t.is_file() => fs::read_to_string(t).map_err(|e| {
            ScanError::io(format!("failed to read config template {}", t.display()), e)
        })?,
        Some(t) => {
            debug!("config template {} not present; starting empty", t.display());
            String::new()
        }
        None => String::new(),
    };
    let out = src.work_dir.join(GENERATED_CONFIG);
    let content = render_config(&base, rules);
    fs::write(&out, content)
        .map_err(|e| ScanError::io(format!("failed to write {}", out.display()), e))?;
    info!("generated revive config: {}", out.display());
    Ok(out)
}

/// Render a generated config: template, the generated-header directive, then
/// rule tables in request order. Names are written as given; blank ones are
/// skipped.
pub fn render_config<'r>(template: &str, rules: impl IntoIterator<Item = &'r str>) -> String {
    let mut out = String::from(template);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("ignoreGeneratedHeader = false\n");
    for name in rules {
        if name.trim().is_empty() {
            warn!("skipping rule with empty name");
            continue;
        }
        out.push_str(&format!("[rule.{}]\n", name));
    }
    out
}

/// Log (but do not reject) a custom config that is not valid TOML; revive
/// reports the precise problem itself.
fn check_toml(path: &Path) {
    match fs::read_to_string(path) {
        Ok(s) => {
            if let Err(e) = toml::from_str::<toml::Table>(&s) {
                warn!("custom revive config {} is not valid TOML: {}", path.display(), e);
            }
        }
        Err(e) => warn!("cannot read custom revive config {}: {}", path.display(), e),
    }
}
