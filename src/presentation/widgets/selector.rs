//! Searchable picker for channels and users.
//!
//! Typing while the picker is open schedules a debounced directory search.
//! Outcomes arrive later through the app's action channel and are applied
//! with [`Selector::apply_outcome`], which drops anything but the latest
//! request and keeps the current options when a search failed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use tracing::{debug, trace};

use crate::application::{DebouncedSearch, SearchOutcome};
use crate::domain::search::{SearchResultItem, SearchTarget, Selection};
use crate::presentation::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorAction {
    None,
    Opened,
    Closed,
    Searching(u64),
    Selected(Selection),
}

pub struct Selector {
    target: SearchTarget,
    label: String,
    placeholder: String,
    search: DebouncedSearch<SearchResultItem>,
    query: String,
    options: Vec<SearchResultItem>,
    list_state: ListState,
    selected: Vec<SearchResultItem>,
    open: bool,
    focused: bool,
    theme: Theme,
}

impl Selector {
    /// Channel pickers select one room, user pickers build a list.
    #[must_use]
    pub fn new(
        target: SearchTarget,
        label: impl Into<String>,
        search: DebouncedSearch<SearchResultItem>,
    ) -> Self {
        Self {
            target,
            label: label.into(),
            placeholder: String::new(),
            search,
            query: String::new(),
            options: Vec::new(),
            list_state: ListState::default(),
            selected: Vec::new(),
            open: false,
            focused: false,
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

    /// Shows `item` as already chosen.
    #[must_use]
    pub fn with_selected(mut self, item: SearchResultItem) -> Self {
        self.selected.push(item);
        self
    }

    #[must_use]
    pub const fn target(&self) -> SearchTarget {
        self.target
    }

    const fn is_multi(&self) -> bool {
        matches!(self.target, SearchTarget::Users)
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn options(&self) -> &[SearchResultItem] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> &[SearchResultItem] {
        &self.selected
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<&SearchResultItem> {
        self.list_state.selected().and_then(|i| self.options.get(i))
    }

    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
    }

    /// Schedules a search for `keyword`.
    pub fn on_search(&mut self, keyword: impl Into<String>) -> u64 {
        self.query = keyword.into();
        self.search.call(self.query.clone())
    }

    /// Applies a settled search. Returns whether the options changed.
    pub fn apply_outcome(&mut self, outcome: SearchOutcome<SearchResultItem>) -> bool {
        if !self.search.is_current(outcome.request_id) {
            trace!(
                picker = %self.target,
                request_id = outcome.request_id,
                "Ignoring stale search outcome"
            );
            return false;
        }

        match outcome.result {
            Ok(items) => {
                self.list_state
                    .select(if items.is_empty() { None } else { Some(0) });
                self.options = items;
                true
            }
            Err(error) => {
                debug!(picker = %self.target, %error, "Directory search failed");
                false
            }
        }
    }

    /// Confirms the highlighted option.
    ///
    /// A channel picker replaces its value and closes. A user picker toggles
    /// the user in or out of the selection and stays open.
    pub fn on_change(&mut self) -> Option<Selection> {
        let item = self.highlighted()?.clone();

        if self.is_multi() {
            if let Some(position) = self.selected.iter().position(|s| s.value() == item.value()) {
                self.selected.remove(position);
            } else {
                self.selected.push(item);
            }
            Some(Selection::Multiple(self.values()))
        } else {
            let value = item.value().to_string();
            self.selected = vec![item];
            self.on_close();
            Some(Selection::Single(value))
        }
    }

    /// Closes the picker, dropping its options and any pending search.
    pub fn on_close(&mut self) {
        self.open = false;
        self.query.clear();
        self.options.clear();
        self.list_state.select(None);
        self.search.cancel();
    }

    fn values(&self) -> Vec<String> {
        self.selected
            .iter()
            .map(|item| item.value().to_string())
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SelectorAction {
        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Down | KeyCode::Char(' ') => {
                    self.open();
                    SelectorAction::Opened
                }
                KeyCode::Backspace if self.is_multi() && !self.selected.is_empty() => {
                    self.selected.pop();
                    SelectorAction::Selected(Selection::Multiple(self.values()))
                }
                _ => SelectorAction::None,
            };
        }

        match key.code {
            KeyCode::Esc => {
                self.on_close();
                SelectorAction::Closed
            }
            KeyCode::Enter => self
                .on_change()
                .map_or(SelectorAction::None, SelectorAction::Selected),
            KeyCode::Up => {
                self.select_previous();
                SelectorAction::None
            }
            KeyCode::Down => {
                self.select_next();
                SelectorAction::None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut keyword = self.query.clone();
                keyword.push(c);
                SelectorAction::Searching(self.on_search(keyword))
            }
            KeyCode::Backspace => {
                let mut keyword = self.query.clone();
                keyword.pop();
                SelectorAction::Searching(self.on_search(keyword))
            }
            _ => SelectorAction::None,
        }
    }

    pub fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.options.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.options.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn summary(&self) -> String {
        self.selected
            .iter()
            .map(SearchResultItem::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Renders the closed field.
impl Widget for &Selector {
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

        let summary = self.summary();
        let paragraph = if summary.is_empty() {
            Paragraph::new(format!("{}...", self.placeholder))
                .style(self.theme.field_style.patch(self.theme.auxiliary_style))
        } else {
            Paragraph::new(summary).style(self.theme.field_style)
        };
        paragraph.render(inner, buf);
    }
}

/// Renders the open picker as a popup over `area`.
pub struct SelectorPopup<'a> {
    selector: &'a Selector,
}

impl<'a> SelectorPopup<'a> {
    #[must_use]
    pub const fn new(selector: &'a Selector) -> Self {
        Self { selector }
    }
}

impl Widget for SelectorPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let selector = self.selector;
        let theme = &selector.theme;
        let area = centered_rect(60, 50, area);

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.focused_border_style)
            .style(theme.base_style)
            .title(format!(" {} ", selector.placeholder));
        let inner = block.inner(area);
        block.render(area, buf);

        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

        Paragraph::new(Line::from(vec![
            Span::styled(" / ", theme.selection_style),
            Span::raw(" "),
            Span::styled(selector.query.as_str(), theme.field_style),
        ]))
        .render(search_area, buf);

        let items: Vec<ListItem> = selector
            .options
            .iter()
            .map(|item| {
                let mark = if !selector.is_multi() {
                    ""
                } else if selector.selected.iter().any(|s| s.value() == item.value()) {
                    "[x] "
                } else {
                    "[ ] "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, theme.auxiliary_style),
                    Span::raw(item.label().to_string()),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(theme.selection_style);
        let mut state = selector.list_state;
        StatefulWidget::render(list, list_area, buf, &mut state);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}
