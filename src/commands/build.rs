use std::cell::Cell;

use anyhow::Result;
use packup::notifier;
use packup::{build_once, Mode, WatchEvent};

use super::{display_relative, prepare_session, report_event, CommandContext};
use crate::ui::views::build::{render_build_header, render_build_success};

pub fn cmd_build(ctx: &CommandContext, no_upload: bool) -> Result<()> {
    run_production(ctx, !no_upload)
}

/// One minified build; every kept output is uploaded.
pub(crate) fn run_production(ctx: &CommandContext, upload: bool) -> Result<()> {
    let Some(mut session) = prepare_session(ctx, Mode::Production, upload)? else {
        return Ok(());
    };

    if !ctx.ui.json {
        print!(
            "{}",
            render_build_header(
                &display_relative(ctx, &session.paths().src),
                &display_relative(ctx, &session.paths().build),
                session.uploads_enabled(),
                ctx.ui.color,
                ctx.ui.unicode
            )
        );
    }

    let uploaded = Cell::new(0usize);
    let succeeded = build_once(&mut session, &|event: WatchEvent| {
        if let WatchEvent::BuildComplete { uploaded: count, .. } = event {
            uploaded.set(count);
        }
        report_event(ctx, &event);
    })?;

    if !succeeded {
        std::process::exit(1);
    }

    ctx.notifier.notify(&notifier::BUILD_SUCCESS);
    if !ctx.ui.json {
        print!(
            "{}",
            render_build_success(uploaded.get(), ctx.ui.color, ctx.ui.unicode)
        );
    }
    Ok(())
}
