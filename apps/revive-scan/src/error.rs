//! Error types for a scan run.
//!
//! Every failure aborts the whole run; nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing, running, or collecting a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Host OS/architecture has no bundled revive build
    #[error("unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The tool did not finish within the time budget (child was killed)
    #[error("revive did not finish within {seconds}s and was terminated")]
    Timeout { seconds: u64 },

    /// The tool wrote to stderr; the text is surfaced as-is
    #[error("{0}")]
    ToolFailed(String),

    /// Raw tool output is not valid JSON
    #[error("malformed revive output in {}: {source}", path.display())]
    MalformedOutput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Task request or changed-file list has an unexpected shape
    #[error("invalid JSON input {}: {source}", path.display())]
    InvalidTaskRequest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A setting needed by this run was not provided
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ScanError {
    /// Wrap an I/O error with a short description of what was attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ScanError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failed_message_is_raw_stderr() {
        let err = ScanError::ToolFailed("open foo.go: no such file".into());
        assert_eq!(err.to_string(), "open foo.go: no such file");
    }

    #[test]
    fn test_io_context_in_message() {
        let err = ScanError::io(
            "failed to read task request",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "failed to read task request: gone");
    }
}
