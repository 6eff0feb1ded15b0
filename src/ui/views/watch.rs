use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use packup::WatchEvent;

pub fn render_watch_header(
    source: &str,
    build: &str,
    uploads: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "packup dev");
    header.add("Source", source);
    header.add("Build", build);
    header.add("Upload", if uploads { "on" } else { "off" });
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

/// One log line per event; build errors are rendered separately
pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let icon = |i: Icon| i.colored(supports_color, supports_unicode);

    match event {
        WatchEvent::WatchStarted { source } => {
            format!("{} {} Watching: {}\n", prefix, icon(Icon::Watch), source)
        }
        WatchEvent::FileChanged { path } => {
            format!("{} {} Changed: {}\n", prefix, icon(Icon::Arrow), path)
        }
        WatchEvent::BuildStarted => format!("{} {} Building...\n", prefix, icon(Icon::Progress)),
        WatchEvent::BuildComplete {
            kept,
            removed,
            uploaded,
        } => {
            let mut line = format!(
                "{} {} Built {} file{}",
                prefix,
                icon(Icon::Success),
                kept,
                plural(*kept)
            );
            if *removed > 0 {
                line.push_str(&format!(", removed {}", removed));
            }
            if *uploaded > 0 {
                line.push_str(&format!(", uploaded {}", uploaded));
            }
            line.push('\n');
            line
        }
        WatchEvent::UploadFailed { path, message } => format!(
            "{} {} Upload failed: {}\n    {}\n",
            prefix,
            icon(Icon::Warning),
            path,
            message
        ),
        WatchEvent::BuildFailed { errors, .. } => format!(
            "{} {} Build failed with {} error{}\n",
            prefix,
            icon(Icon::Error),
            errors,
            plural(*errors)
        ),
        WatchEvent::Error { message } => {
            format!("{} {} Error: {}\n", prefix, icon(Icon::Error), message)
        }
        WatchEvent::Shutdown => format!("\n{} {} Watch stopped.\n", prefix, icon(Icon::Watch)),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_started_event_with_watch_icon() {
        let event = WatchEvent::WatchStarted {
            source: "assets".to_string(),
        };
        let rendered = render_watch_event("10:00:00", &event, false, false);
        assert_eq!(rendered, "[10:00:00] [~] Watching: assets\n");
    }

    #[test]
    fn build_complete_mentions_uploads_only_when_present() {
        let quiet = WatchEvent::BuildComplete {
            kept: 1,
            removed: 0,
            uploaded: 0,
        };
        assert_eq!(
            render_watch_event("t", &quiet, false, false),
            "[t] [OK] Built 1 file\n"
        );

        let busy = WatchEvent::BuildComplete {
            kept: 3,
            removed: 1,
            uploaded: 2,
        };
        assert!(render_watch_event("t", &busy, false, true)
            .contains("Built 3 files, removed 1, uploaded 2"));
    }

    #[test]
    fn header_shows_upload_state() {
        let rendered = render_watch_header("assets", "../assets", false, false, false);
        assert!(rendered.contains("Upload: off"));
    }
}
