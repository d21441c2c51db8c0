use crate::application::HeaderState;
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub struct HeaderBarStyle {
    pub background: Style,
    pub title: Style,
    pub close: Style,
    pub submit: Style,
    pub loading: Style,
}

impl HeaderBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            background: theme.base_style,
            title: theme.title_style,
            close: theme.auxiliary_style,
            submit: theme.selection_style.add_modifier(Modifier::BOLD),
            loading: theme
                .auxiliary_style
                .add_modifier(Modifier::ITALIC),
        }
    }
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Top bar of the screen: close hint, title and the submit action.
pub struct HeaderBar<'a> {
    title: &'a str,
    close_label: &'a str,
    submit_label: &'a str,
    loading_label: &'a str,
    state: HeaderState,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(title: &'a str, state: HeaderState) -> Self {
        Self {
            title,
            close_label: "Close",
            submit_label: "Create",
            loading_label: "Loading",
            state,
            style: HeaderBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn labels(mut self, close: &'a str, submit: &'a str, loading: &'a str) -> Self {
        self.close_label = close;
        self.submit_label = submit;
        self.loading_label = loading;
        self
    }

    #[must_use]
    pub fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    fn action_span(&self) -> Option<Span<'static>> {
        if self.state.loading {
            Some(Span::styled(
                format!(" {}... ", self.loading_label),
                self.style.loading,
            ))
        } else if self.state.show_submit {
            Some(Span::styled(
                format!(" ^S {} ", self.submit_label),
                self.style.submit,
            ))
        } else {
            None
        }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let left_line = Line::from(vec![
            Span::styled(format!(" Esc {} ", self.close_label), self.style.close),
            Span::raw(" "),
            Span::styled(self.title.to_string(), self.style.title),
        ]);
        Paragraph::new(left_line).render(area, buf);

        if let Some(action) = self.action_span() {
            let width = u16::try_from(action.content.width()).unwrap_or(u16::MAX);
            if width < area.width {
                let right_area = Rect::new(area.right() - width, area.y, width, 1);
                Paragraph::new(Line::from(action)).render(right_area, buf);
            }
        }
    }
}
