//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PackupResult;
use crate::transport::SftpSettings;

use super::loader::{self, ConfigWarning};

/// Name of the per-project config file
pub const CONFIG_FILE: &str = "project.config.json";

/// Default source folder, relative to the project root
pub const DEFAULT_SRC: &str = "assets";

/// Default build folder, relative to the project root
pub const DEFAULT_BUILD: &str = "../assets";

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

/// Project configuration stored in `project.config.json`
///
/// Older setups wrote `srcDirectory`/`buildDirectory`; both are still
/// accepted on read. `port` may be a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub remote_path: String,

    #[serde(default)]
    pub remote_folder: String,

    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,

    #[serde(default = "default_src", alias = "srcDirectory")]
    pub src: String,

    #[serde(default = "default_build", alias = "buildDirectory")]
    pub build: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            password: String::new(),
            remote_path: String::new(),
            remote_folder: String::new(),
            port: DEFAULT_PORT,
            src: default_src(),
            build: default_build(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_src() -> String {
    DEFAULT_SRC.to_string()
}

fn default_build() -> String {
    DEFAULT_BUILD.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortDe {
    Number(u16),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match PortDe::deserialize(deserializer)? {
        PortDe::Number(port) => Ok(port),
        PortDe::Text(text) => parse_port(&text).map_err(serde::de::Error::custom),
    }
}

/// Parse a port typed by a user or stored as a string; empty means default.
pub fn parse_port(text: &str) -> Result<u16, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DEFAULT_PORT);
    }
    text.parse::<u16>()
        .map_err(|_| format!("invalid port '{}'", text))
}

/// Absolute source and build folders of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub src: PathBuf,
    pub build: PathBuf,
}

impl ProjectConfig {
    /// Load `project.config.json` from a project directory
    pub fn load(project_dir: &Path) -> PackupResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(&config_path(project_dir))?;
        Ok(config)
    }

    /// Load and collect unknown keys as warnings
    pub fn load_with_warnings(project_dir: &Path) -> PackupResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(&config_path(project_dir))
    }

    /// Write `project.config.json` into a project directory
    pub fn save(&self, project_dir: &Path) -> PackupResult<()> {
        loader::save(&config_path(project_dir), self)
    }

    /// Resolve `src` and `build` against the project directory
    pub fn paths(&self, project_dir: &Path) -> ProjectPaths {
        ProjectPaths {
            root: project_dir.to_path_buf(),
            src: project_dir.join(&self.src),
            build: project_dir.join(&self.build),
        }
    }

    /// Remote directory uploads land in: `remotePath` + `remoteFolder`
    pub fn remote_root(&self) -> String {
        join_remote(&self.remote_path, &self.remote_folder)
    }

    /// SFTP settings, or `None` when no server is configured
    pub fn sftp(&self) -> Option<SftpSettings> {
        if self.host.trim().is_empty() || self.username.trim().is_empty() {
            return None;
        }

        Some(SftpSettings {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            port: self.port,
            remote_root: self.remote_root(),
        })
    }
}

/// Path of `project.config.json` inside a project directory
pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE)
}

/// Join remote POSIX paths without touching the local separator
pub fn join_remote(base: &str, child: &str) -> String {
    let child = child.trim_matches('/');
    if child.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return child.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), child)
}
