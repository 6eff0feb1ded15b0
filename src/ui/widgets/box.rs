use std::borrow::Cow;

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::border::BorderChar;
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    #[default]
    Info,
    Warning,
    Error,
}

/// A bordered panel sized to its widest line
#[derive(Debug, Default, Clone)]
pub struct Box {
    title: Option<String>,
    content: Vec<String>,
    style: BoxStyle,
}

impl Box {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Multi-line text becomes one row per line
    pub fn add_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() {
            self.content.push(line);
            return;
        }
        self.content.extend(line.lines().map(str::to_string));
    }

    pub fn add_empty(&mut self) {
        self.content.push(String::new());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let rows: Vec<&str> = self
            .title
            .iter()
            .chain(self.content.iter())
            .map(String::as_str)
            .collect();

        let inner = rows.iter().map(|r| visible_width(r)).max().unwrap_or(0) + 2;
        let border = |c: BorderChar| c.render(supports_unicode);
        let paint = |s: &str| color_border(s, supports_color, self.style);

        let h = border(BorderChar::Horizontal).repeat(inner);
        let mut out = String::new();

        out.push_str(&paint(&format!(
            "{}{}{}",
            border(BorderChar::TopLeft),
            h,
            border(BorderChar::TopRight)
        )));
        out.push('\n');

        let v = paint(border(BorderChar::Vertical));
        for row in rows {
            let pad = inner - 1 - visible_width(row);
            out.push_str(&format!("{v} {row}{}{v}\n", " ".repeat(pad)));
        }

        out.push_str(&paint(&format!(
            "{}{}{}",
            border(BorderChar::BottomLeft),
            h,
            border(BorderChar::BottomRight)
        )));
        out.push('\n');
        out
    }
}

fn color_border(s: &str, supports_color: bool, style: BoxStyle) -> String {
    if !supports_color {
        return s.to_string();
    }

    let color = match style {
        BoxStyle::Info => theme::colors::INFO,
        BoxStyle::Warning => theme::colors::WARNING,
        BoxStyle::Error => theme::colors::ERROR,
    };
    format!("{}", s.with(color))
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

/// Remove CSI escape sequences (`ESC [ ... <letter>`)
fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        for next in chars.by_ref() {
            if next.is_ascii_alphabetic() {
                break;
            }
        }
    }
    Cow::Owned(out)
}
