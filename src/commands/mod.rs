use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use packup::config::with_env_overrides;
use packup::notifier::{self, Notifier};
use packup::transport::Transport;
use packup::{
    BuildSession, Mode, PackupError, ProjectConfig, ProjectPaths, ScpTransport, WatchEvent,
    Webpack,
};

use crate::ui::blocks::warning::WarningBlock;
use crate::ui::context::UiContext;

pub mod build;
pub mod dev;
pub mod entries;
pub mod init;
pub mod start;

/// Everything a subcommand needs from the global flags
pub struct CommandContext {
    pub ui: UiContext,
    pub project_dir: PathBuf,
    pub notifier: Notifier,
}

impl CommandContext {
    pub fn new(ui: UiContext, project_dir: &Path, no_notify: bool) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .map_err(|_| PackupError::DirectoryNotFound {
                path: project_dir.to_path_buf(),
            })?;

        // Desktop popups have no place in machine-readable runs.
        let notifier = if ui.json {
            Notifier::disabled()
        } else {
            Notifier::from_env(no_notify)
        };

        Ok(Self {
            ui,
            project_dir,
            notifier,
        })
    }

    /// Print a warning on stderr, or emit it as an event in JSON mode
    pub fn warn(&self, message: &str) {
        if self.ui.json {
            let _ = crate::ui::json::emit(&serde_json::json!({
                "event": "warning",
                "message": message,
            }));
        } else {
            eprint!(
                "{}",
                WarningBlock::new(message).render(self.ui.color, self.ui.unicode)
            );
        }
    }
}

/// Load `project.config.json`.
///
/// A missing file is fatal: `src` and `build` must never fall back to
/// folders the user didn't configure.
pub(crate) fn load_config(ctx: &CommandContext) -> Result<ProjectConfig> {
    let (config, warnings) = ProjectConfig::load_with_warnings(&ctx.project_dir)?;

    for warning in warnings {
        ctx.warn(&format!(
            "Unknown key '{}' in {} is ignored",
            warning.key,
            warning.file.display()
        ));
    }

    Ok(with_env_overrides(config))
}

/// Clock shown in front of watch/build log lines
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Check that the configured server is reachable before the first build
pub(crate) fn connect_transport(
    ctx: &CommandContext,
    config: &ProjectConfig,
    paths: &ProjectPaths,
) -> Option<Box<dyn Transport>> {
    let Some(settings) = config.sftp() else {
        ctx.warn("No server configured in project.config.json, uploads are disabled");
        return None;
    };

    if !ScpTransport::check_available() {
        ctx.warn("scp was not found on PATH, uploads are disabled");
        return None;
    }

    let transport = ScpTransport::new(settings, &paths.build).quiet(ctx.ui.json);
    if let Err(e) = transport.check_connection() {
        if ctx.ui.json {
            ctx.warn(&format!(
                "Uploads to the server are not possible right now: {}",
                e
            ));
        } else {
            eprint!(
                "{}",
                crate::ui::views::build::render_uploads_disabled(
                    "Uploads to the server are not possible right now",
                    true,
                    ctx.ui.color,
                    ctx.ui.unicode
                )
            );
        }
        return None;
    }

    Some(Box::new(transport))
}

/// Resolve entries and wire up uploads for one run.
///
/// `None` means there is nothing to bundle; the caller exits cleanly.
pub(crate) fn prepare_session(
    ctx: &CommandContext,
    mode: Mode,
    upload: bool,
) -> Result<Option<BuildSession<Webpack>>> {
    let config = load_config(ctx)?;
    let paths = config.paths(&ctx.project_dir);

    let bundler = Webpack::locate(&ctx.project_dir)
        .quiet(ctx.ui.json)
        .verbose(ctx.ui.verbose > 0);
    let session = BuildSession::new(bundler, paths, mode)
        .with_context(|| format!("Failed to resolve entries for a {} build", mode))?;

    if session.entries().is_empty() {
        report_no_entries(ctx);
        return Ok(None);
    }

    if !upload {
        return Ok(Some(session));
    }

    Ok(Some(
        match connect_transport(ctx, &config, session.paths()) {
            Some(transport) => session.with_transport(transport),
            None => session,
        },
    ))
}

pub(crate) fn report_no_entries(ctx: &CommandContext) {
    if ctx.ui.json {
        let _ = crate::ui::json::emit(&serde_json::json!({ "event": "no_entries" }));
    } else {
        print!(
            "{}",
            crate::ui::views::build::render_no_entries(ctx.ui.color)
        );
    }
}

/// Print one build/watch event, or emit it as NDJSON
pub(crate) fn report_event(ctx: &CommandContext, event: &WatchEvent) {
    if ctx.ui.json {
        let _ = crate::ui::json::emit(event);
        return;
    }

    let rendered = crate::ui::views::watch::render_watch_event(
        &timestamp(),
        event,
        ctx.ui.color,
        ctx.ui.unicode,
    );
    match event {
        WatchEvent::Error { .. } | WatchEvent::UploadFailed { .. } => eprint!("{rendered}"),
        WatchEvent::BuildFailed { message, .. } => {
            eprint!("{rendered}");
            eprint!(
                "{}",
                crate::ui::views::build::render_build_error(message, ctx.ui.color)
            );
        }
        _ => print!("{rendered}"),
    }

    if let WatchEvent::BuildFailed { .. } = event {
        ctx.notifier.notify(&notifier::BUILD_ERROR);
    }
}

/// Display form of a path relative to the project
pub(crate) fn display_relative(ctx: &CommandContext, path: &Path) -> String {
    path.strip_prefix(&ctx.project_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
