//! Text input widget.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::theme::Theme;

/// Text input field widget.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    placeholder: String,
    label: String,
    theme: Theme,
}

impl TextInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            placeholder: String::new(),
            label: label.into(),
            theme: Theme::default(),
        }
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets value and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Inserts character at cursor.
    pub fn input_char(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.value.insert(index, c);
        self.cursor += 1;
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index(self.cursor);
            self.value.remove(index);
        }
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let index = self.byte_index(self.cursor);
            self.value.remove(index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Applies an editing key. Returns whether the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let before = self.value.len();
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input_char(c);
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.backspace();
                return true;
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_count() {
                    return false;
                }
                self.delete();
                return true;
            }
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            _ => {}
        }
        self.value.len() != before
    }

    /// Display width of the text before the cursor.
    fn cursor_offset(&self) -> usize {
        self.value[..self.byte_index(self.cursor)].width()
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };

        let text_style = if self.value.is_empty() {
            self.theme.field_style.patch(self.theme.auxiliary_style)
        } else {
            self.theme.field_style
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());

        let inner = block.inner(area);

        let display = if self.value.is_empty() {
            self.placeholder.as_str()
        } else {
            self.value.as_str()
        };
        let paragraph = Paragraph::new(display).style(text_style);

        block.render(area, buf);
        paragraph.render(inner, buf);

        if self.focused && inner.width > 0 && inner.height > 0 {
            let cursor_x = u16::try_from(self.cursor_offset())
                .map_or(u16::MAX, |c| inner.x.saturating_add(c));
            if cursor_x < inner.right() {
                buf[(cursor_x, inner.y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_input_basic() {
        let mut input = TextInput::new("Test");
        assert!(input.value().is_empty());

        input.input_char('a');
        input.input_char('b');
        assert_eq!(input.value(), "ab");

        input.backspace();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("Name");
        input.set_value("héllo");
        input.move_left();
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "hllo");

        input.input_char('é');
        input.move_end();
        input.input_char('🙂');
        assert_eq!(input.value(), "héllo🙂");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "éllo🙂");
    }

    #[test]
    fn test_enter_is_ignored() {
        let mut input = TextInput::new("Name");
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_handle_key_reports_changes() {
        let mut input = TextInput::new("Name");
        assert!(!input.handle_key(key(KeyCode::Backspace)));
        assert!(input.handle_key(key(KeyCode::Char('x'))));
        assert!(!input.handle_key(key(KeyCode::Left)));
        assert!(!input.handle_key(KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL
        )));
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn test_cursor_uses_display_width() {
        let mut input = TextInput::new("Name");
        input.set_value("日本");
        assert_eq!(input.cursor_offset(), 4);
    }
}
