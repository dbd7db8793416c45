//! Selection of the bundled revive executable for the host platform.
//!
//! Builds ship under `<tool_root>/bin/<os>/<arch>/`. Only an amd64 build is
//! bundled for macOS; Apple silicon hosts run it translated.

use crate::error::{Result, ScanError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Platforms with a bundled revive build.
pub enum Platform {
    LinuxArm64,
    LinuxAmd64,
    MacAmd64,
    WindowsAmd64,
}

impl Platform {
    /// Map an OS/arch pair (as in `std::env::consts`) to a bundled build.
    pub fn from_parts(os: &str, arch: &str) -> Result<Self> {
        match (os, arch) {
            ("linux", "aarch64") => Ok(Platform::LinuxArm64),
            ("linux", "x86_64") => Ok(Platform::LinuxAmd64),
            ("macos", "x86_64" | "aarch64") => Ok(Platform::MacAmd64),
            ("windows", "x86_64") => Ok(Platform::WindowsAmd64),
            _ => Err(ScanError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }

    /// Platform of the running process.
    pub fn current() -> Result<Self> {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Path segments of the executable relative to the tool root.
    fn segments(self) -> [&'static str; 4] {
        match self {
            Platform::LinuxArm64 => ["bin", "linux", "arm64", "revive"],
            Platform::LinuxAmd64 => ["bin", "linux", "amd64", "revive"],
            Platform::MacAmd64 => ["bin", "mac", "amd64", "revive"],
            Platform::WindowsAmd64 => ["bin", "windows", "amd64", "revive.exe"],
        }
    }

    /// Absolute (or root-relative) path of the executable under `tool_root`.
    pub fn tool_path(self, tool_root: &Path) -> PathBuf {
        self.segments()
            .iter()
            .fold(tool_root.to_path_buf(), |p, s| p.join(s))
    }
}

/// Resolve the executable to run: an explicit override wins, otherwise the
/// bundled build for the host platform.
pub fn resolve_tool(tool_override: Option<&Path>, tool_root: &Path) -> Result<PathBuf> {
    if let Some(p) = tool_override {
        return Ok(p.to_path_buf());
    }
    Ok(Platform::current()?.tool_path(tool_root))
}
