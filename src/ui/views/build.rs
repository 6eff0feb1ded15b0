use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::warning::WarningBlock;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use packup::transport::CONNECTION_HINTS;

pub fn render_build_header(
    source: &str,
    build: &str,
    uploads: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Build, "packup build");
    header.add("Source", source);
    header.add("Build", build);
    header.add("Upload", if uploads { "on" } else { "off" });
    header.render(supports_color, supports_unicode)
}

/// Only the first webpack error is shown
pub fn render_build_error(first_error: &str, supports_color: bool) -> String {
    format!(
        "\n{}\n\n{}\n",
        ColoredText::error("  There was an error during the build.")
            .bold()
            .render(supports_color),
        first_error
    )
}

pub fn render_build_success(uploaded: usize, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "\n{} {}\n",
        Icon::Success.colored(supports_color, supports_unicode),
        ColoredText::success("Build was successful").render(supports_color)
    );
    if uploaded == 0 {
        out.push_str(&format!(
            "  {}\n",
            ColoredText::dim("The generated files have not been uploaded").render(supports_color)
        ));
    } else {
        out.push_str(&format!(
            "{} Uploaded {} file{}\n",
            Icon::Upload.colored(supports_color, supports_unicode),
            uploaded,
            if uploaded == 1 { "" } else { "s" }
        ));
    }
    out
}

pub fn render_uploads_disabled(
    reason: &str,
    with_hints: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut block = WarningBlock::new(reason);
    if with_hints {
        for hint in CONNECTION_HINTS {
            block.add_line(hint);
        }
    }
    block.render(supports_color, supports_unicode)
}

pub fn render_no_entries(supports_color: bool) -> String {
    format!(
        "{}\n",
        ColoredText::warning("No files to watch").render(supports_color)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_shows_the_message() {
        let rendered = render_build_error("Module not found: ./missing", false);
        assert!(rendered.contains("There was an error during the build."));
        assert!(rendered.contains("Module not found: ./missing"));
    }

    #[test]
    fn success_notes_missing_uploads() {
        assert!(render_build_success(0, false, false).contains("have not been uploaded"));
        let uploaded = render_build_success(2, false, false);
        assert!(!uploaded.contains("have not been uploaded"));
        assert!(uploaded.contains("[UPLOAD] Uploaded 2 files"));
    }

    #[test]
    fn disabled_uploads_can_list_hints() {
        let rendered =
            render_uploads_disabled("Uploads to the server are not possible right now", true, false, false);
        assert!(rendered.contains(CONNECTION_HINTS[0]));
    }
}
