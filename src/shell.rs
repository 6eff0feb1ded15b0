//! Helpers for locating and spawning external tools

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Check if a command exists on PATH.
pub fn which_exists(cmd: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// npm executable name for the current platform
pub fn npm_program() -> &'static str {
    if cfg!(windows) {
        "npm.cmd"
    } else {
        "npm"
    }
}

/// Resolve a path inside node_modules by walking up parent directories.
///
/// Mirrors Node.js module resolution: checks `<dir>/node_modules/<suffix>`
/// at each level, starting at `start`.
pub fn resolve_node_module(start: &Path, suffix: &str) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join("node_modules").join(suffix);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Render a command for verbose output
pub fn display_command(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}
