//! Error types for packup
//!
//! Library code returns `PackupError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packup operations
pub type PackupResult<T> = Result<T, PackupError>;

/// Main error type for packup operations
#[derive(Error, Debug)]
pub enum PackupError {
    /// Source or build folder is missing
    #[error("the following folder does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// `project.config.json` is missing
    #[error("project config not found: {path}; run `packup init` first")]
    ConfigNotFound { path: PathBuf },

    /// `project.config.json` (or `package.json`) could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// webpack could not be started
    #[error("failed to start webpack ({program}): {message}")]
    BundlerSpawn { program: String, message: String },

    /// webpack exited without producing usable stats
    #[error("webpack exited with status {status}")]
    BundlerFailed { status: String },

    /// The stats file written by webpack is missing or malformed
    #[error("invalid webpack stats in {file}: {message}")]
    InvalidStats { file: PathBuf, message: String },

    /// Connection or upload failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Package installation failed
    #[error("package installation failed with status {status}")]
    InstallFailed { status: String },

    /// The user declined a prompt
    #[error("aborted by user")]
    Aborted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_directory_not_found() {
        let err = PackupError::DirectoryNotFound {
            path: PathBuf::from("/project/assets"),
        };
        assert_eq!(
            err.to_string(),
            "the following folder does not exist: /project/assets"
        );
    }

    #[test]
    fn test_error_display_invalid_config() {
        let err = PackupError::InvalidConfig {
            file: PathBuf::from("project.config.json"),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config in project.config.json: expected value at line 1 column 1"
        );
    }
}
