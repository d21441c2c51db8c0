use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::presentation::theme::Theme;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Spinner drawn over the form while a submission is in flight.
#[derive(Debug, Default)]
pub struct LoadingOverlay {
    frame: usize,
}

impl LoadingOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER.len();
    }

    #[must_use]
    pub fn symbol(&self) -> &'static str {
        SPINNER[self.frame]
    }
}

pub struct LoadingOverlayWidget<'a> {
    overlay: &'a LoadingOverlay,
    label: &'a str,
    theme: &'a Theme,
}

impl<'a> LoadingOverlayWidget<'a> {
    #[must_use]
    pub const fn new(overlay: &'a LoadingOverlay, label: &'a str, theme: &'a Theme) -> Self {
        Self {
            overlay,
            label,
            theme,
        }
    }
}

impl Widget for LoadingOverlayWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(20),
            Constraint::Fill(1),
        ])
        .areas(middle);

        Clear.render(center, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .style(self.theme.base_style);
        let inner = block.inner(center);
        block.render(center, buf);

        Paragraph::new(Line::from(format!("{} {}", self.overlay.symbol(), self.label)).centered())
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        let mut overlay = LoadingOverlay::new();
        let first = overlay.symbol();
        for _ in 0..SPINNER.len() {
            overlay.tick();
        }
        assert_eq!(overlay.symbol(), first);
    }
}
