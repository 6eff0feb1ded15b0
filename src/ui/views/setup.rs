use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_setup_header(project: &str, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Setup, "packup init");
    header.add("Project", project);
    header.render(supports_color, supports_unicode)
}

pub fn render_step(message: &str, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} {}\n",
        Icon::Success.colored(supports_color, supports_unicode),
        message
    )
}

pub fn render_installing(supports_color: bool) -> String {
    format!(
        "\nSetting up the project...\n{}\n\n",
        ColoredText::dim("(This might take a while so you might want to grab a cuppa...)")
            .render(supports_color)
    )
}

pub fn render_setup_complete(installed: bool, supports_color: bool) -> String {
    let mut out = format!(
        "\n{}\n",
        ColoredText::success("Alright, the project is all set up for you!").render(supports_color)
    );
    if !installed {
        out.push_str("Install the toolchain with `npm install` when you are ready.\n");
    }
    out.push_str(&format!(
        "Please run {} and enjoy the ride.\n",
        ColoredText::info("npm start").bold().render(supports_color)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_points_at_npm_start() {
        let rendered = render_setup_complete(true, false);
        assert!(rendered.contains("Please run npm start"));
        assert!(!rendered.contains("npm install"));
    }

    #[test]
    fn skipped_install_is_mentioned() {
        assert!(render_setup_complete(false, false).contains("npm install"));
    }
}
