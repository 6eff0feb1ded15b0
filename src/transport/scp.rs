//! SCP Transfer
//!
//! Shells out to the system OpenSSH client. Files are copied one by one with
//! `scp`; the connection check opens an `sftp` session and quits.
//!
//! When a password is configured and `sshpass` is installed, commands are
//! wrapped in `sshpass -e` and the password travels in the `SSHPASS`
//! environment variable. Otherwise the user's SSH agent/keys are used and
//! scp may prompt on the terminal.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{SftpSettings, Transport, UploadFailure, UploadReport};
use crate::error::{PackupError, PackupResult};

/// Seconds before ssh gives up on an unreachable host
const CONNECT_TIMEOUT_SECS: u32 = 10;

/// Transport using the OpenSSH `scp`/`sftp` binaries
pub struct ScpTransport {
    settings: SftpSettings,
    /// Local folder mirrored to `settings.remote_root`
    local_root: PathBuf,
    /// Silence child output (NDJSON mode)
    quiet: bool,
    use_sshpass: bool,
}

impl ScpTransport {
    pub fn new(settings: SftpSettings, local_root: impl Into<PathBuf>) -> Self {
        let use_sshpass =
            !settings.password.is_empty() && crate::shell::which_exists("sshpass");
        Self {
            settings,
            local_root: local_root.into(),
            quiet: false,
            use_sshpass,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Check if scp is installed and available
    pub fn check_available() -> bool {
        // scp without args returns non-zero, but if we can spawn it, it's available
        Command::new("scp")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    pub fn settings(&self) -> &SftpSettings {
        &self.settings
    }

    /// Remote path for a local file under `local_root`
    pub fn remote_path_for(&self, local: &Path) -> Option<String> {
        let rel = local.strip_prefix(&self.local_root).ok()?;
        let rel: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if rel.is_empty() {
            return None;
        }
        Some(crate::config::join_remote(
            &self.settings.remote_root,
            &rel.join("/"),
        ))
    }

    fn base_command(&self, program: &str) -> Command {
        if self.use_sshpass {
            let mut cmd = Command::new("sshpass");
            cmd.arg("-e")
                .arg(program)
                .env("SSHPASS", &self.settings.password);
            cmd
        } else {
            Command::new(program)
        }
    }

    fn ssh_options(cmd: &mut Command) {
        cmd.arg("-o")
            .arg(format!("ConnectTimeout={}", CONNECT_TIMEOUT_SECS))
            .arg("-o")
            .arg("StrictHostKeyChecking=accept-new");
    }

    pub(crate) fn upload_command(&self, local: &Path) -> PackupResult<Command> {
        let remote = self.remote_path_for(local).ok_or_else(|| {
            PackupError::Transport(format!(
                "{} is outside of {}",
                local.display(),
                self.local_root.display()
            ))
        })?;

        let mut cmd = self.base_command("scp");
        cmd.arg("-P").arg(self.settings.port.to_string());
        Self::ssh_options(&mut cmd);
        cmd.arg(local)
            .arg(format!("{}:{}", self.settings.destination(), remote));
        Ok(cmd)
    }

    pub(crate) fn mkdir_command(&self, dirs: &BTreeSet<String>) -> Command {
        let mut cmd = self.base_command("ssh");
        cmd.arg("-p").arg(self.settings.port.to_string());
        Self::ssh_options(&mut cmd);
        cmd.arg(self.settings.destination())
            .arg(format!("mkdir -p {}", shell_quote_paths(dirs)));
        cmd
    }

    /// Remote parent directories of the files about to be uploaded
    fn collect_remote_dirs(&self, files: &[PathBuf]) -> BTreeSet<String> {
        files
            .iter()
            .filter_map(|f| self.remote_path_for(f))
            .filter_map(|r| r.rsplit_once('/').map(|(dir, _)| dir.to_string()))
            .filter(|d| !d.is_empty())
            .collect()
    }

    /// Pre-create remote directories; scp doesn't.
    ///
    /// Servers that only speak SFTP reject the shell command, so a failure
    /// here is ignored and left for scp to report.
    fn create_remote_dirs(&self, files: &[PathBuf]) {
        let dirs = self.collect_remote_dirs(files);
        if dirs.is_empty() {
            return;
        }
        let _ = self
            .mkdir_command(&dirs)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }

    fn upload_one(&self, local: &Path) -> PackupResult<()> {
        let mut cmd = self.upload_command(local)?;
        cmd.stdin(Stdio::inherit()).stdout(Stdio::null());
        if self.quiet {
            cmd.stderr(Stdio::null());
        } else {
            cmd.stderr(Stdio::inherit());
        }

        let status = cmd
            .status()
            .map_err(|e| PackupError::Transport(format!("failed to run scp: {}", e)))?;

        if !status.success() {
            return Err(PackupError::Transport(format!(
                "scp failed with exit code: {:?}",
                status.code()
            )));
        }
        Ok(())
    }
}

impl Transport for ScpTransport {
    fn name(&self) -> &'static str {
        "scp"
    }

    fn check_connection(&self) -> PackupResult<()> {
        let mut cmd = self.base_command("sftp");
        cmd.arg("-P").arg(self.settings.port.to_string());
        Self::ssh_options(&mut cmd);
        cmd.arg(self.settings.destination())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| PackupError::Transport(format!("failed to run sftp: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // The session may already be gone; the exit status tells.
            let _ = stdin.write_all(b"bye\n");
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(PackupError::Transport(if message.is_empty() {
                format!("could not connect to {}", self.settings.host)
            } else {
                message.to_string()
            }));
        }

        Ok(())
    }

    fn upload(&self, files: &[PathBuf]) -> UploadReport {
        let mut report = UploadReport::default();
        if files.is_empty() {
            return report;
        }

        self.create_remote_dirs(files);

        for file in files {
            if let Err(e) = self.upload_one(file) {
                report.failed = Some(UploadFailure {
                    path: file.clone(),
                    message: e.to_string(),
                });
                break;
            }
            report.uploaded.push(file.clone());
        }

        report
    }
}

/// Quote paths for shell command (simple escaping)
fn shell_quote_paths(paths: &BTreeSet<String>) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.replace('\'', "'\\''")))
        .collect::<Vec<_>>()
        .join(" ")
}
