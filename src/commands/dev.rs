use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use packup::notifier;
use packup::{watch, Mode, WatchEvent, WatchExit};

use super::{display_relative, prepare_session, report_event, CommandContext};
use crate::ui::views::watch::render_watch_header;

pub fn cmd_dev(ctx: &CommandContext, no_upload: bool) -> Result<()> {
    run_development(ctx, !no_upload)
}

/// Watch and rebuild; changed outputs are uploaded after each build.
pub(crate) fn run_development(ctx: &CommandContext, upload: bool) -> Result<()> {
    let Some(mut session) = prepare_session(ctx, Mode::Development, upload)? else {
        return Ok(());
    };

    if !ctx.ui.json {
        print!(
            "{}",
            render_watch_header(
                &display_relative(ctx, &session.paths().src),
                &display_relative(ctx, &session.paths().build),
                session.uploads_enabled(),
                ctx.ui.color,
                ctx.ui.unicode
            )
        );
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("Error setting Ctrl+C handler")?;

    let first_build = Cell::new(true);
    let exit = watch(&mut session, running, |event: WatchEvent| {
        report_event(ctx, &event);
        if let WatchEvent::BuildComplete { uploaded, .. } = event {
            if first_build.replace(false) {
                ctx.notifier.notify(&notifier::WEBPACK_READY);
            } else if uploaded > 0 {
                ctx.notifier.notify(&notifier::REFRESH_BROWSER);
            }
        }
    })?;

    match exit {
        WatchExit::BuildFailed => std::process::exit(1),
        WatchExit::Interrupted => {
            if !ctx.ui.interactive() {
                return Ok(());
            }
            let build_now = Confirm::with_theme(&ctx.ui.theme())
                .with_prompt("Would you like to create a build for production before leaving?")
                .default(false)
                .interact()
                .unwrap_or(false);
            if build_now {
                super::build::run_production(ctx, session.uploads_enabled())?;
            }
            Ok(())
        }
    }
}
