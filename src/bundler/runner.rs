//! Running the webpack CLI

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::stats::BuildStats;
use super::webpack::{WebpackConfig, CACHE_DIR};
use super::{Bundler, Mode};
use crate::error::{PackupError, PackupResult};

/// The webpack CLI installed in (or above) a project
#[derive(Debug, Clone)]
pub struct Webpack {
    project_dir: PathBuf,
    program: PathBuf,
    /// Arguments placed before webpack's own (`npx` needs `webpack`)
    prefix_args: Vec<String>,
    quiet: bool,
    verbose: bool,
}

impl Webpack {
    /// Use `node_modules/.bin/webpack` when installed, `npx webpack` otherwise
    pub fn locate(project_dir: &Path) -> Self {
        let bin = if cfg!(windows) {
            ".bin/webpack.cmd"
        } else {
            ".bin/webpack"
        };

        let (program, prefix_args) = match crate::shell::resolve_node_module(project_dir, bin) {
            Some(path) => (path, Vec::new()),
            None => {
                let npx = if cfg!(windows) { "npx.cmd" } else { "npx" };
                (PathBuf::from(npx), vec!["--no-install".to_string(), "webpack".to_string()])
            }
        };

        Self {
            project_dir: project_dir.to_path_buf(),
            program,
            prefix_args,
            quiet: false,
            verbose: false,
        }
    }

    /// Silence webpack's own output (NDJSON mode)
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Print the spawned command line
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn stats_path(&self, mode: Mode) -> PathBuf {
        self.project_dir
            .join(CACHE_DIR)
            .join(format!("stats.{}.json", mode.as_str()))
    }

    pub fn command(&self, config_module: &Path, stats_file: &Path, mode: Mode) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args)
            .arg("--config")
            .arg(config_module)
            .arg(format!("--json={}", stats_file.display()))
            .current_dir(&self.project_dir)
            .env("NODE_ENV", mode.as_str())
            .env("BABEL_ENV", mode.as_str())
            .stdin(Stdio::null());

        if self.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        cmd
    }
}

impl Bundler for Webpack {
    fn build(&self, config: &WebpackConfig) -> PackupResult<BuildStats> {
        let module = config.write_module(&self.project_dir)?;
        let stats_file = self.stats_path(config.mode);
        match std::fs::remove_file(&stats_file) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }

        let mut cmd = self.command(&module, &stats_file, config.mode);
        if self.verbose && !self.quiet {
            eprintln!("$ {}", crate::shell::display_command(&cmd));
        }

        let status = cmd.status().map_err(|e| PackupError::BundlerSpawn {
            program: self.program.display().to_string(),
            message: e.to_string(),
        })?;

        // webpack exits 1 on compilation errors but still writes stats;
        // those errors are reported from the stats.
        if stats_file.exists() {
            return BuildStats::from_file(&stats_file);
        }

        if !status.success() {
            return Err(PackupError::BundlerFailed {
                status: status.to_string(),
            });
        }

        Err(PackupError::InvalidStats {
            file: stats_file,
            message: "webpack did not write a stats file".to_string(),
        })
    }
}
