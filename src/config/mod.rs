//! Project configuration
//!
//! Precedence:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PACKUP_*)
//! 3. Project config (project.config.json)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_with_warnings, save, with_env_overrides, ConfigWarning};
pub use types::{
    config_path, join_remote, parse_port, ProjectConfig, ProjectPaths, CONFIG_FILE,
    DEFAULT_BUILD, DEFAULT_PORT, DEFAULT_SRC,
};
