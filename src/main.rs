//! packup CLI - webpack builds and SFTP uploads for site asset folders
//!
//! Usage: packup <COMMAND>
//!
//! Commands:
//!   init     Set up project.config.json, package.json and the toolchain
//!   start    Pick development or production interactively
//!   dev      Watch, rebuild and upload changed files
//!   build    One production build, uploading every output
//!   entries  List the source files that will be bundled

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let ui = ui::context::UiContext::new(cli.json, cli.verbose, cli.color);
    let ctx = CommandContext::new(ui, &cli.project_dir, cli.no_notify)?;

    match cli.command {
        Commands::Init(args) => commands::init::cmd_init(&ctx, &args),
        Commands::Start { mode, no_upload } => commands::start::cmd_start(&ctx, mode, no_upload),
        Commands::Dev { no_upload } => commands::dev::cmd_dev(&ctx, no_upload),
        Commands::Build { no_upload } => commands::build::cmd_build(&ctx, no_upload),
        Commands::Entries => commands::entries::cmd_entries(&ctx),
    }
}
