//! Shared helpers for packup CLI tests.
//!
//! `TestProject` is an isolated project directory plus a runner for the
//! packup binary with notifications and `PACKUP_*` overrides cleared.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

const OVERRIDE_VARS: [&str; 7] = [
    "PACKUP_HOST",
    "PACKUP_USERNAME",
    "PACKUP_PASSWORD",
    "PACKUP_REMOTE_PATH",
    "PACKUP_SRC",
    "PACKUP_BUILD",
    "PACKUP_PORT",
];

/// Result of running the packup binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as one JSON event
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not a JSON line: {line:?} ({e})"))
            })
            .collect()
    }
}

/// Temporary project directory
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp project"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write a file, creating parent folders
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write file");
        self
    }

    pub fn mkdir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.path(relative)).expect("create dir");
        self
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read file")
    }

    /// `project.config.json` without a server, with `src`/`build` inside the project
    pub fn write_local_config(&self, src: &str, build: &str) -> &Self {
        self.write(
            "project.config.json",
            &serde_json::json!({ "src": src, "build": build }).to_string(),
        )
    }

    /// Run packup with the project as working directory
    pub fn run(&self, args: &[&str]) -> TestResult {
        run_in(self.root.path(), args)
    }
}

pub fn run_in(cwd: &Path, args: &[&str]) -> TestResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_packup"));
    cmd.args(args)
        .current_dir(cwd)
        .env("PACKUP_NO_NOTIFY", "1")
        .env("NO_COLOR", "1")
        .env("LANG", "C")
        .env_remove("LC_ALL")
        .env_remove("LC_CTYPE");
    for var in OVERRIDE_VARS {
        cmd.env_remove(var);
    }

    let output = cmd.output().expect("run packup");
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
