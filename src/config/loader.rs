//! Configuration loading and persistence

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PackupError, PackupResult};

use super::types::{parse_port, ProjectConfig};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PackupResult<(ProjectConfig, Vec<ConfigWarning>)> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PackupError::ConfigNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(&content);

    let config: ProjectConfig = serde_ignored::deserialize(&mut deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .and_then(|config| deserializer.end().map(|()| config))
    .map_err(|e| PackupError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();

    Ok((config, warnings))
}

/// Write configuration as pretty JSON with a trailing newline
pub fn save(path: &Path, config: &ProjectConfig) -> PackupResult<()> {
    let mut content = serde_json::to_string_pretty(config)?;
    content.push('\n');
    crate::fs::atomic_write(path, content.as_bytes())
}

/// Apply environment variable overrides (PACKUP_* prefix)
pub fn with_env_overrides(config: ProjectConfig) -> ProjectConfig {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: ProjectConfig,
    get_env: impl Fn(&str) -> Option<String>,
) -> ProjectConfig {
    if let Some(host) = get_env("PACKUP_HOST") {
        config.host = host;
    }
    if let Some(username) = get_env("PACKUP_USERNAME") {
        config.username = username;
    }
    if let Some(password) = get_env("PACKUP_PASSWORD") {
        config.password = password;
    }
    if let Some(remote_path) = get_env("PACKUP_REMOTE_PATH") {
        config.remote_path = remote_path;
    }
    if let Some(src) = get_env("PACKUP_SRC") {
        config.src = src;
    }
    if let Some(build) = get_env("PACKUP_BUILD") {
        config.build = build;
    }

    // An unparseable port is ignored rather than replacing a valid one
    if let Some(Ok(port)) = get_env("PACKUP_PORT").map(|p| parse_port(&p)) {
        config.port = port;
    }

    config
}
