use anyhow::Result;
use packup::resolve_entries;

use super::{display_relative, load_config, report_no_entries, CommandContext};
use crate::ui::views::entries::render_entries;

pub fn cmd_entries(ctx: &CommandContext) -> Result<()> {
    let config = load_config(ctx)?;
    let paths = config.paths(&ctx.project_dir);
    let entries = resolve_entries(&paths.src, &paths.build)?;

    if entries.is_empty() {
        report_no_entries(ctx);
        return Ok(());
    }

    if ctx.ui.json {
        crate::ui::json::emit(&serde_json::json!({
            "event": "entries",
            "source": paths.src.display().to_string(),
            "build": paths.build.display().to_string(),
            "entries": entries.entries,
            "whitelist": entries.whitelist,
        }))?;
        return Ok(());
    }

    print!(
        "{}",
        render_entries(
            &paths.src.display().to_string(),
            &display_relative(ctx, &paths.build),
            &entries,
            ctx.ui.color,
            ctx.ui.unicode
        )
    );
    Ok(())
}
