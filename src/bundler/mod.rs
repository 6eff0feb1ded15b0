//! webpack integration
//!
//! packup never bundles anything itself. It renders a webpack config module
//! for the resolved entries, runs the webpack CLI with `--json` stats, and
//! deletes emitted files that aren't on the entry whitelist.

mod filter;
mod render;
mod runner;
mod stats;
mod webpack;

use std::fmt;
use std::str::FromStr;

pub use filter::{filter_outputs, FilterReport};
pub use render::Js;
pub use runner::Webpack;
pub use stats::{BuildStats, StatsAsset, StatsMessage};
pub use webpack::{PluginSpec, WebpackConfig, CACHE_DIR, TOOLCHAIN_PACKAGES};

use crate::error::PackupResult;

/// Build profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Watch changes, faster, no minification
    Development,
    /// One build, slower, minified with source maps
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!(
                "invalid mode '{}'. Valid options: development, production",
                other
            )),
        }
    }
}

/// Something that can compile a webpack config and report stats
pub trait Bundler {
    fn build(&self, config: &WebpackConfig) -> PackupResult<BuildStats>;
}
