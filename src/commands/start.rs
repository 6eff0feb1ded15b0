use anyhow::{bail, Result};
use dialoguer::{Confirm, Select};
use packup::Mode;

use super::CommandContext;

const MODE_CHOICES: [(Mode, &str); 2] = [
    (
        Mode::Development,
        "Development (watch changes, faster, no minification)",
    ),
    (Mode::Production, "Production (one build, slower)"),
];

pub fn cmd_start(ctx: &CommandContext, mode: Option<Mode>, no_upload: bool) -> Result<()> {
    let mode = match mode {
        Some(mode) => mode,
        None => ask_mode(ctx)?,
    };

    match mode {
        Mode::Development => {
            let upload = !no_upload && ask_auto_upload(ctx)?;
            super::dev::run_development(ctx, upload)
        }
        Mode::Production => super::build::run_production(ctx, !no_upload),
    }
}

fn ask_mode(ctx: &CommandContext) -> Result<Mode> {
    if !ctx.ui.interactive() {
        bail!("No terminal to ask for the environment; pass --mode development or --mode production");
    }

    let labels: Vec<&str> = MODE_CHOICES.iter().map(|(_, label)| *label).collect();
    let selection = Select::with_theme(&ctx.ui.theme())
        .with_prompt("Which environment are you building for?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(MODE_CHOICES[selection].0)
}

/// Defaults to yes; without a terminal uploads stay on.
fn ask_auto_upload(ctx: &CommandContext) -> Result<bool> {
    if !ctx.ui.interactive() {
        return Ok(true);
    }

    Ok(Confirm::with_theme(&ctx.ui.theme())
        .with_prompt("Upload the generated files to the server automatically?")
        .default(true)
        .interact()?)
}
