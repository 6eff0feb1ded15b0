use crate::ui::primitives::icon::Icon;
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// Boxed error with an optional subject line and follow-up hints
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    subject: Option<String>,
    message: String,
    hints: Vec<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            subject: None,
            message: message.into(),
            hints: Vec::new(),
        }
    }

    /// File or folder the error is about
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let title = format!(
            "{} ERROR",
            Icon::Error.colored(supports_color, supports_unicode)
        );
        let mut b = Box::with_title(title).style(BoxStyle::Error);

        if let Some(subject) = &self.subject {
            b.add_line(subject.clone());
        }
        b.add_empty();
        b.add_line(self.message.clone());

        if !self.hints.is_empty() {
            b.add_empty();
            let arrow = Icon::Arrow.render(supports_unicode);
            for hint in &self.hints {
                b.add_line(format!("{} {}", arrow, hint));
            }
        }

        b.render(supports_color, supports_unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_subject_message_and_hints() {
        let rendered = ErrorBlock::new("the following folder does not exist")
            .with_subject("/site/assets")
            .with_hint("Check `src` in project.config.json")
            .render(false, false);

        assert!(rendered.contains("[FAIL] ERROR"));
        assert!(rendered.contains("/site/assets"));
        assert!(rendered.contains("[>] Check `src` in project.config.json"));
    }
}
