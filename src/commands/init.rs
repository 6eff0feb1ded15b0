use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Input, Password};
use packup::config::{config_path, parse_port, CONFIG_FILE};
use packup::package_json::{update_package_json, PACKAGE_JSON};
use packup::transport::Transport;
use packup::{installer, PackupError, ProjectConfig, ScpTransport};

use super::CommandContext;
use crate::cli::InitArgs;
use crate::ui::theme::PackupTheme;
use crate::ui::views::setup::{
    render_installing, render_setup_complete, render_setup_header, render_step,
};

pub fn cmd_init(ctx: &CommandContext, args: &InitArgs) -> Result<()> {
    let dir = &ctx.project_dir;
    let prompt = ctx.ui.interactive() && !args.yes;

    if !ctx.ui.json {
        print!(
            "{}",
            render_setup_header(&dir.display().to_string(), ctx.ui.color, ctx.ui.unicode)
        );
    }

    let already_set_up = config_path(dir).exists() && dir.join(PACKAGE_JSON).exists();
    if already_set_up && !args.yes {
        if !prompt {
            bail!(
                "{} already exists; pass --yes to overwrite it",
                CONFIG_FILE
            );
        }
        let overwrite = Confirm::with_theme(&ctx.ui.theme())
            .with_prompt(format!(
                "The project is already set up. Overwrite {}?",
                CONFIG_FILE
            ))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Nothing was changed.");
            return Ok(());
        }
    }

    // Existing values become the defaults offered again.
    let base = match ProjectConfig::load(dir) {
        Ok(config) => config,
        Err(PackupError::ConfigNotFound { .. }) | Err(PackupError::InvalidConfig { .. }) => {
            ProjectConfig::default()
        }
        Err(e) => return Err(e.into()),
    };
    let config = if prompt {
        ask_config(&ctx.ui.theme(), args, base)?
    } else {
        config_from_flags(args, base)
    };

    if !args.skip_connection_test {
        test_connection(ctx, &config)?;
    }

    config.save(dir)?;
    step(ctx, &format!("Wrote {}", CONFIG_FILE));

    update_package_json(dir)?;
    step(ctx, &format!("Added the start script to {}", PACKAGE_JSON));

    let installed = !args.skip_install;
    if installed {
        if !ctx.ui.json {
            print!("{}", render_installing(ctx.ui.color));
        }
        installer::install_toolchain(dir, ctx.ui.verbose > 0, ctx.ui.json)
            .context("Failed to install the webpack toolchain")?;
        step(ctx, "Installed the webpack toolchain");
    }

    if ctx.ui.json {
        crate::ui::json::emit(&serde_json::json!({
            "event": "init_complete",
            "config": config_path(dir).display().to_string(),
            "installed": installed,
        }))?;
    } else {
        print!("{}", render_setup_complete(installed, ctx.ui.color));
    }
    Ok(())
}

/// Flag values win over whatever the project already had
fn config_from_flags(args: &InitArgs, base: ProjectConfig) -> ProjectConfig {
    ProjectConfig {
        host: args.host.clone().unwrap_or(base.host),
        username: args.username.clone().unwrap_or(base.username),
        password: args.password.clone().unwrap_or(base.password),
        remote_path: args.remote_path.clone().unwrap_or(base.remote_path),
        remote_folder: args.remote_folder.clone().unwrap_or(base.remote_folder),
        port: args.port.unwrap_or(base.port),
        src: args.src.clone().unwrap_or(base.src),
        build: args.build.clone().unwrap_or(base.build),
    }
}

fn ask_config(
    theme: &PackupTheme,
    args: &InitArgs,
    base: ProjectConfig,
) -> Result<ProjectConfig> {
    let defaults = config_from_flags(args, base);

    let host = ask_required(theme, "SFTP host", &defaults.host)?;
    let username = ask_required(theme, "SFTP username", &defaults.username)?;

    let password = if defaults.password.is_empty() {
        Password::with_theme(theme)
            .with_prompt("SFTP password (leave empty to use your SSH keys)")
            .allow_empty_password(true)
            .interact()?
    } else {
        defaults.password.clone()
    };

    let port: String = Input::with_theme(theme)
        .with_prompt("SFTP port")
        .default(defaults.port.to_string())
        .validate_with(|input: &String| parse_port(input).map(|_| ()))
        .interact_text()?;
    let port = parse_port(&port).map_err(anyhow::Error::msg)?;

    let remote_path = ask_optional(theme, "Remote path of the site", &defaults.remote_path)?;
    let remote_folder = ask_optional(
        theme,
        "Remote folder for the generated files",
        &defaults.remote_folder,
    )?;
    let src = ask_required(theme, "Source folder", &defaults.src)?;
    let build = ask_required(theme, "Build folder", &defaults.build)?;

    Ok(ProjectConfig {
        host,
        username,
        password,
        remote_path,
        remote_folder,
        port,
        src,
        build,
    })
}

fn ask_required(theme: &PackupTheme, prompt: &str, default: &str) -> Result<String> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("This value is required")
            } else {
                Ok(())
            }
        });
    if !default.is_empty() {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?.trim().to_string())
}

fn ask_optional(theme: &PackupTheme, prompt: &str, default: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()?
        .trim()
        .to_string())
}

/// Nothing is written when the server cannot be reached
fn test_connection(ctx: &CommandContext, config: &ProjectConfig) -> Result<()> {
    let Some(settings) = config.sftp() else {
        ctx.warn("No server configured, skipping the connection test");
        return Ok(());
    };

    if !ScpTransport::check_available() {
        return Err(PackupError::Transport("scp was not found on PATH".to_string()).into());
    }

    ScpTransport::new(settings, &ctx.project_dir)
        .quiet(ctx.ui.json)
        .check_connection()?;
    step(ctx, "Connected to the server");
    Ok(())
}

fn step(ctx: &CommandContext, message: &str) {
    if ctx.ui.json {
        let _ = crate::ui::json::emit(&serde_json::json!({
            "event": "step",
            "message": message,
        }));
    } else {
        print!("{}", render_step(message, ctx.ui.color, ctx.ui.unicode));
    }
}
