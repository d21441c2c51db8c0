//! Create discussion screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Paragraph, Widget, Wrap},
};
use tracing::debug;

use crate::application::{DebouncedSearch, DiscussionFormController, HeaderHandle, SearchOutcome};
use crate::domain::discussion::{CreateDiscussionRequest, NavigationParams};
use crate::domain::errors::ClientError;
use crate::domain::search::{SearchResultItem, SearchTarget};
use crate::presentation::events::EventHandler;
use crate::presentation::i18n::{I18nKey, Translator};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    LoadingOverlay, LoadingOverlayWidget, MessageField, Selector, SelectorAction, SelectorPopup,
    TextInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Channel,
    Name,
    Users,
    Reply,
}

impl FormFocus {
    const ORDER: [Self; 4] = [Self::Channel, Self::Name, Self::Users, Self::Reply];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, PartialEq)]
pub enum ScreenAction {
    None,
    Close,
    Submit(CreateDiscussionRequest),
}

/// Pickers' search handles, one per target.
pub struct ScreenSearches {
    pub channels: DebouncedSearch<SearchResultItem>,
    pub users: DebouncedSearch<SearchResultItem>,
}

pub struct CreateDiscussionScreen {
    controller: DiscussionFormController,
    channel_selector: Selector,
    name_input: TextInput,
    users_selector: Selector,
    reply_input: MessageField,
    focus: FormFocus,
    description: String,
    loading_label: String,
    overlay: LoadingOverlay,
    theme: Theme,
}

impl CreateDiscussionScreen {
    /// Builds the form pre-filled from `params`, along with the header handle
    /// the host renders its submit action from.
    #[must_use]
    pub fn new(
        params: &NavigationParams,
        searches: ScreenSearches,
        translator: &Translator,
        theme: Theme,
    ) -> (Self, HeaderHandle) {
        let (controller, header) = DiscussionFormController::new(params);
        let state = controller.state();

        let mut channel_selector = Selector::new(
            SearchTarget::Channels,
            translator.t(I18nKey::ParentChannelOrGroup),
            searches.channels,
        )
        .placeholder(translator.t(I18nKey::SelectAChannel))
        .theme(theme);
        if let Some(rid) = &state.channel {
            let display_title = params
                .channel
                .as_ref()
                .and_then(|channel| channel.title.clone())
                .unwrap_or_else(|| format!("{}: {rid}", translator.t(I18nKey::RoomId)));
            channel_selector = channel_selector.with_selected(SearchResultItem::Channel {
                room_id: rid.clone(),
                display_title,
            });
        }

        let mut name_input = TextInput::new(translator.t(I18nKey::DiscussionName))
            .placeholder(translator.t(I18nKey::MeaningfulNameHint))
            .theme(theme);
        name_input.set_value(state.name.clone());

        let users_selector = Selector::new(
            SearchTarget::Users,
            translator.t(I18nKey::InviteUsers),
            searches.users,
        )
        .placeholder(translator.t(I18nKey::SelectUsers))
        .theme(theme);

        let reply_input = MessageField::new(translator.t(I18nKey::YourMessage))
            .placeholder(translator.t(I18nKey::FirstMessageHint))
            .theme(theme);

        let mut screen = Self {
            controller,
            channel_selector,
            name_input,
            users_selector,
            reply_input,
            focus: FormFocus::Channel,
            description: translator.t(I18nKey::DiscussionDesc).to_string(),
            loading_label: translator.t(I18nKey::Loading).to_string(),
            overlay: LoadingOverlay::new(),
            theme,
        };
        screen.apply_focus();

        (screen, header)
    }

    #[must_use]
    pub const fn focus(&self) -> FormFocus {
        self.focus
    }

    #[must_use]
    pub const fn controller(&self) -> &DiscussionFormController {
        &self.controller
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    fn open_selector(&mut self) -> Option<&mut Selector> {
        if self.channel_selector.is_open() {
            Some(&mut self.channel_selector)
        } else if self.users_selector.is_open() {
            Some(&mut self.users_selector)
        } else {
            None
        }
    }

    fn selector_mut(&mut self, target: SearchTarget) -> &mut Selector {
        match target {
            SearchTarget::Channels => &mut self.channel_selector,
            SearchTarget::Users => &mut self.users_selector,
        }
    }

    fn set_focus(&mut self, focus: FormFocus) {
        self.focus = focus;
        self.apply_focus();
    }

    fn apply_focus(&mut self) {
        self.channel_selector
            .set_focused(self.focus == FormFocus::Channel);
        self.name_input.set_focused(self.focus == FormFocus::Name);
        self.users_selector
            .set_focused(self.focus == FormFocus::Users);
        self.reply_input.set_focused(self.focus == FormFocus::Reply);
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ScreenAction::Close;
        }

        if let Some(selector) = self.open_selector() {
            let target = selector.target();
            let action = selector.handle_key(key);
            self.apply_selector_action(target, action);
            return ScreenAction::None;
        }

        if EventHandler::is_close_event(&key) {
            return ScreenAction::Close;
        }

        if EventHandler::is_submit_event(&key) {
            return self.submit();
        }

        if EventHandler::is_focus_next(&key) {
            self.set_focus(self.focus.next());
            return ScreenAction::None;
        }

        if EventHandler::is_focus_previous(&key) {
            self.set_focus(self.focus.previous());
            return ScreenAction::None;
        }

        match self.focus {
            FormFocus::Channel => {
                let action = self.channel_selector.handle_key(key);
                self.apply_selector_action(SearchTarget::Channels, action);
            }
            FormFocus::Users => {
                let action = self.users_selector.handle_key(key);
                self.apply_selector_action(SearchTarget::Users, action);
            }
            FormFocus::Name => {
                if self.name_input.handle_key(key) {
                    self.controller.set_name(self.name_input.value());
                }
            }
            FormFocus::Reply => {
                if self.reply_input.handle_key(key) {
                    self.controller.set_reply(self.reply_input.value());
                }
            }
        }

        ScreenAction::None
    }

    fn apply_selector_action(&mut self, target: SearchTarget, action: SelectorAction) {
        if let SelectorAction::Selected(selection) = action {
            self.controller.apply_selection(target, selection);
        }
    }

    /// Header submit action. Only offered while the form is valid and idle.
    pub fn submit(&mut self) -> ScreenAction {
        self.controller
            .begin_submission()
            .map_or(ScreenAction::None, ScreenAction::Submit)
    }

    /// Routes a settled search to its picker.
    pub fn apply_search_outcome(
        &mut self,
        target: SearchTarget,
        outcome: SearchOutcome<SearchResultItem>,
    ) {
        self.selector_mut(target).apply_outcome(outcome);
    }

    pub fn settle_submission(&mut self, result: Result<(), ClientError>) {
        debug!(ok = result.is_ok(), "Submission settled");
        self.controller.settle_submission(result);
    }

    pub fn tick(&mut self) {
        if self.is_submitting() {
            self.overlay.tick();
        }
    }
}

impl Widget for &CreateDiscussionScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.base_style);

        let [_, content, _] = Layout::horizontal([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let [description, _, channel, name, users, reply, _] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(self.reply_input.height()),
            Constraint::Fill(1),
        ])
        .areas(content);

        Paragraph::new(self.description.as_str())
            .style(self.theme.auxiliary_style)
            .wrap(Wrap { trim: true })
            .render(description, buf);

        (&self.channel_selector).render(channel, buf);
        (&self.name_input).render(name, buf);
        (&self.users_selector).render(users, buf);
        (&self.reply_input).render(reply, buf);

        if self.channel_selector.is_open() {
            SelectorPopup::new(&self.channel_selector).render(area, buf);
        } else if self.users_selector.is_open() {
            SelectorPopup::new(&self.users_selector).render(area, buf);
        }

        if self.is_submitting() {
            LoadingOverlayWidget::new(&self.overlay, &self.loading_label, &self.theme)
                .render(area, buf);
        }
    }
}
