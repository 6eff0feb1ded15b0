//! Uploading build outputs to the development server
//!
//! A transport is constructed per session from explicit settings; there is
//! no shared client. Uploads run in order and stop at the first failure.

mod scp;
mod tracker;

pub use scp::ScpTransport;
pub use tracker::ChangeTracker;

use std::path::PathBuf;

use crate::error::PackupResult;

/// Connection settings for the remote server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SftpSettings {
    pub host: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    /// Remote directory mirroring the local build folder
    pub remote_root: String,
}

impl SftpSettings {
    /// `user@host`
    pub fn destination(&self) -> String {
        format!("{}@{}", self.username, self.host)
    }
}

/// Troubleshooting hints printed when the server cannot be reached
pub const CONNECTION_HINTS: [&str; 3] = [
    "Please check your config file: project.config.json",
    "If you are behind a proxy, please check that your SSH client can reach the server",
    "If it is all fine, please check your internet connection",
];

/// Outcome of one upload batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: Vec<PathBuf>,
    pub failed: Option<UploadFailure>,
}

/// The file that stopped a batch, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub path: PathBuf,
    pub message: String,
}

impl UploadReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }
}

/// A way of getting files onto the remote server
pub trait Transport {
    /// Transport name for display
    fn name(&self) -> &'static str;

    /// Open and close a session to verify the settings work
    fn check_connection(&self) -> PackupResult<()>;

    /// Upload files in order, stopping at the first failure
    fn upload(&self, files: &[PathBuf]) -> UploadReport;
}
