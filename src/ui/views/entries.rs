use std::path::Path;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use packup::EntrySet;

pub fn render_entries(
    source: &str,
    build: &str,
    entries: &EntrySet,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Entries, "packup entries");
    header.add("Source", source);
    header.add("Build", build);
    let mut out = header.render(supports_color, supports_unicode);

    out.push_str(&format!("\nEntries ({}):\n", entries.len()));
    let width = entries.entries.keys().map(|k| k.len()).max().unwrap_or(0);
    let src_root = Path::new(source);
    for (name, path) in &entries.entries {
        let shown = path.strip_prefix(src_root).unwrap_or(path);
        out.push_str(&format!(
            "  {:<width$}  {} {}\n",
            name,
            ColoredText::dim(Icon::Arrow.render(supports_unicode)).render(supports_color),
            shown.display(),
            width = width
        ));
    }

    out.push_str(&format!("\nKept outputs ({}):\n", entries.whitelist.len()));
    for output in &entries.whitelist {
        out.push_str(&format!("  {}\n", output));
    }
    out
}
