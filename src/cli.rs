use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use packup::Mode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// packup - webpack builds and SFTP uploads for site asset folders
#[derive(Parser, Debug)]
#[command(name = "packup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v prints spawned commands)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable desktop notifications
    #[arg(long, global = true)]
    pub no_notify: bool,

    /// Project directory (contains project.config.json)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create project.config.json, wire up package.json and install webpack
    Init(InitArgs),

    /// Ask for the environment, then run `dev` or `build`
    Start {
        /// Skip the environment prompt
        #[arg(long, value_parser = parse_mode)]
        mode: Option<Mode>,

        /// Never upload to the server
        #[arg(long)]
        no_upload: bool,
    },

    /// Watch the source folder and rebuild on change
    Dev {
        /// Never upload to the server
        #[arg(long)]
        no_upload: bool,
    },

    /// One minified production build
    Build {
        /// Never upload to the server
        #[arg(long)]
        no_upload: bool,
    },

    /// Show which source files will be bundled
    Entries,
}

#[derive(Args, Debug, Default, Clone)]
pub struct InitArgs {
    /// Accept defaults and flag values without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Source folder, relative to the project
    #[arg(long)]
    pub src: Option<String>,

    /// Build folder, relative to the project
    #[arg(long)]
    pub build: Option<String>,

    /// SFTP host
    #[arg(long)]
    pub host: Option<String>,

    /// SFTP username
    #[arg(long)]
    pub username: Option<String>,

    /// SFTP password
    #[arg(long)]
    pub password: Option<String>,

    /// Remote path of the site
    #[arg(long)]
    pub remote_path: Option<String>,

    /// Folder under the remote path that mirrors the build folder
    #[arg(long)]
    pub remote_folder: Option<String>,

    /// SFTP port
    #[arg(long)]
    pub port: Option<u16>,

    /// Don't run npm install
    #[arg(long)]
    pub skip_install: bool,

    /// Don't test the SFTP connection
    #[arg(long)]
    pub skip_connection_test: bool,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_init_flags() {
        let cli = Cli::try_parse_from([
            "packup",
            "init",
            "--yes",
            "--host",
            "dev.example.com",
            "--port",
            "2222",
            "--skip-install",
        ])
        .unwrap();

        let Commands::Init(args) = cli.command else {
            panic!("Expected Init command");
        };
        assert!(args.yes);
        assert_eq!(args.host.as_deref(), Some("dev.example.com"));
        assert_eq!(args.port, Some(2222));
        assert!(args.skip_install);
        assert!(!args.skip_connection_test);
    }

    #[test]
    fn test_cli_parse_start_mode() {
        let cli = Cli::try_parse_from(["packup", "start", "--mode", "prod"]).unwrap();
        if let Commands::Start { mode, no_upload } = cli.command {
            assert_eq!(mode, Some(Mode::Production));
            assert!(!no_upload);
        } else {
            panic!("Expected Start command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["packup", "start", "--mode", "staging"]).is_err());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "packup",
            "dev",
            "--json",
            "-vv",
            "--no-notify",
            "-C",
            "site",
            "--color",
            "never",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_notify);
        assert_eq!(cli.project_dir, PathBuf::from("site"));
        assert_eq!(cli.color, Some(ColorWhen::Never));
        assert!(matches!(cli.command, Commands::Dev { no_upload: false }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["packup"]).is_err());
    }
}
