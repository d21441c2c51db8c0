//! Multiline message field backed by `tui-textarea`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthChar;

use crate::presentation::theme::Theme;

const MIN_ROWS: usize = 3;
const MAX_ROWS: usize = 6;

/// Editor for the discussion's first message. Enter breaks lines.
#[derive(Debug, Clone)]
pub struct MessageField {
    textarea: TextArea<'static>,
    focused: bool,
    placeholder: String,
    label: String,
    theme: Theme,
}

impl MessageField {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            textarea: TextArea::default(),
            focused: false,
            placeholder: String::new(),
            label: label.into(),
            theme: Theme::default(),
        }
    }

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
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textarea.is_empty()
    }

    /// Replaces the content, leaving the cursor at its end.
    pub fn set_value(&mut self, content: &str) {
        self.textarea.select_all();
        self.textarea.cut();
        self.textarea.insert_str(content);
    }

    /// Cursor as (row, char column).
    #[must_use]
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    /// Applies an editing key. Returns whether the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let by_word = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Char('w' | 'h') if key.modifiers == KeyModifiers::CONTROL => {
                self.textarea.delete_word()
            }
            KeyCode::Enter => {
                self.textarea.insert_newline();
                true
            }
            KeyCode::Backspace if by_word => self.textarea.delete_word(),
            KeyCode::Backspace => self.textarea.delete_char(),
            KeyCode::Delete if by_word => self.textarea.delete_next_word(),
            KeyCode::Delete => self.textarea.delete_next_char(),
            code => {
                let movement = match code {
                    KeyCode::Left if by_word => CursorMove::WordBack,
                    KeyCode::Left => CursorMove::Back,
                    KeyCode::Right if by_word => CursorMove::WordForward,
                    KeyCode::Right => CursorMove::Forward,
                    KeyCode::Up => CursorMove::Up,
                    KeyCode::Down => CursorMove::Down,
                    KeyCode::Home => CursorMove::Head,
                    KeyCode::End => CursorMove::End,
                    _ => return false,
                };
                self.textarea.move_cursor(movement);
                false
            }
        }
    }

    /// Rows the field needs, borders included.
    #[must_use]
    pub fn height(&self) -> u16 {
        let rows = self.textarea.lines().len().clamp(MIN_ROWS, MAX_ROWS);
        u16::try_from(rows).unwrap_or(6) + 2
    }

    /// Soft-wraps the lines to `width`, returning them with the cursor's
    /// visual row and column.
    fn visual_lines(&self, width: usize) -> (Vec<String>, usize, usize) {
        let (cursor_row, cursor_col) = self.textarea.cursor();
        let mut visual = Vec::new();
        let mut visual_row = 0;
        let mut visual_col = 0;

        for (i, line) in self.textarea.lines().iter().enumerate() {
            let is_cursor_line = i == cursor_row;
            let mut current = String::new();
            let mut current_width = 0;

            for (j, ch) in line.chars().enumerate() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width {
                    visual.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                if is_cursor_line && j == cursor_col {
                    visual_row = visual.len();
                    visual_col = current_width;
                }
                current.push(ch);
                current_width += ch_width;
            }

            if is_cursor_line && cursor_col >= line.chars().count() {
                if current_width >= width {
                    visual.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                visual_row = visual.len();
                visual_col = current_width;
            }

            visual.push(current);
        }

        (visual, visual_row, visual_col)
    }
}

impl Widget for &MessageField {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());
        let inner = block.inner(area);
        block.render(area, buf);

        let width = usize::from(inner.width);
        let height = usize::from(inner.height);
        if width == 0 || height == 0 {
            return;
        }

        buf.set_style(inner, self.theme.field_style);

        if self.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                &self.placeholder,
                width,
                self.theme.field_style.patch(self.theme.auxiliary_style),
            );
        }

        let (lines, cursor_row, cursor_col) = self.visual_lines(width);
        let scroll = (cursor_row + 1).saturating_sub(height);

        for (offset, line) in lines.iter().skip(scroll).take(height).enumerate() {
            let y = inner.y + u16::try_from(offset).unwrap_or(0);
            buf.set_stringn(inner.x, y, line, width, self.theme.field_style);
        }

        if self.focused {
            let row = cursor_row - scroll;
            let x = inner.x + u16::try_from(cursor_col).unwrap_or(u16::MAX - inner.x);
            let y = inner.y + u16::try_from(row).unwrap_or(0);
            if x < inner.right()
                && let Some(cell) = buf.cell_mut((x, y))
            {
                cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}
