use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Watch,
    Build,
    Upload,
    Setup,
    Entries,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{icons as u, icons_ascii as a};
        let (unicode, ascii) = match self {
            Icon::Success => (u::SUCCESS, a::SUCCESS),
            Icon::Error => (u::ERROR, a::ERROR),
            Icon::Warning => (u::WARNING, a::WARNING),
            Icon::Progress => (u::PROGRESS, a::PROGRESS),
            Icon::Arrow => (u::ARROW, a::ARROW),
            Icon::Watch => (u::WATCH, a::WATCH),
            Icon::Build => (u::BUILD, a::BUILD),
            Icon::Upload => (u::UPLOAD, a::UPLOAD),
            Icon::Setup => (u::SETUP, a::SETUP),
            Icon::Entries => (u::ENTRIES, a::ENTRIES),
        };
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Watch | Icon::Build | Icon::Upload | Icon::Setup | Icon::Entries => {
                theme::colors::INFO
            }
        };
        format!("{}", s.with(color))
    }
}
