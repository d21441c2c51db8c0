//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::application::services::directory_search::search_fn;
use crate::application::{
    CreateDiscussionUseCase, DebouncedSearch, HeaderHandle, SearchOutcome,
};
use crate::domain::discussion::NavigationParams;
use crate::domain::entities::TitleSettings;
use crate::domain::errors::ClientError;
use crate::domain::ports::{DirectoryPort, DiscussionPort};
use crate::domain::search::{SearchResultItem, SearchTarget};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::i18n::{I18nKey, Translator};
use crate::presentation::theme::Theme;
use crate::presentation::ui::{CreateDiscussionScreen, ScreenAction, ScreenSearches};
use crate::presentation::widgets::{HeaderBar, HeaderBarStyle};

const ANIMATION_TICK_RATE: Duration = Duration::from_millis(80);

#[derive(Debug)]
enum Action {
    SearchSettled {
        target: SearchTarget,
        outcome: SearchOutcome<SearchResultItem>,
    },
    SubmissionSettled(Result<(), ClientError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

/// Presentation settings resolved from the configuration.
pub struct AppOptions {
    pub title_settings: TitleSettings,
    pub quiet_period: Duration,
    pub translator: Translator,
    pub theme: Theme,
}

pub struct App {
    state: AppState,
    screen: CreateDiscussionScreen,
    header: HeaderHandle,
    use_case: Arc<CreateDiscussionUseCase>,
    translator: Translator,
    theme: Theme,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(
        params: &NavigationParams,
        directory: Arc<dyn DirectoryPort>,
        discussions: Arc<dyn DiscussionPort>,
        options: AppOptions,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let searches = ScreenSearches {
            channels: Self::debounced(
                SearchTarget::Channels,
                &directory,
                &options,
                &action_tx,
            ),
            users: Self::debounced(SearchTarget::Users, &directory, &options, &action_tx),
        };

        let (screen, header) =
            CreateDiscussionScreen::new(params, searches, &options.translator, options.theme);

        Self {
            state: AppState::Running,
            screen,
            header,
            use_case: Arc::new(CreateDiscussionUseCase::new(discussions)),
            translator: options.translator,
            theme: options.theme,
            action_tx,
            action_rx,
        }
    }

    fn debounced(
        target: SearchTarget,
        directory: &Arc<dyn DirectoryPort>,
        options: &AppOptions,
        action_tx: &mpsc::UnboundedSender<Action>,
    ) -> DebouncedSearch<SearchResultItem> {
        let tx = action_tx.clone();
        DebouncedSearch::new(
            search_fn(
                target,
                Arc::clone(directory),
                options.title_settings.clone(),
            ),
            Arc::new(move |outcome: SearchOutcome<SearchResultItem>| {
                let _ = tx.send(Action::SearchSettled { target, outcome });
            }),
            options.quiet_period,
        )
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut animation_interval = interval(ANIMATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let terminal_event = terminal_events.next();

            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = animation_interval.tick() => {
                    if self.screen.is_submitting() {
                        self.screen.tick();
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                Some(Ok(event)) = terminal_event => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.state = AppState::Exiting;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        match self.screen.handle_key(key) {
            ScreenAction::Close => {
                if self.screen.is_submitting() {
                    debug!("Closing with a submission in flight");
                }
                EventResult::Exit
            }
            ScreenAction::Submit(request) => {
                let use_case = Arc::clone(&self.use_case);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    // A panicking request still settles the form.
                    let result = tokio::spawn(async move { use_case.execute(request).await })
                        .await
                        .unwrap_or_else(|e| {
                            Err(ClientError::unexpected(format!("submission task failed: {e}")))
                        });
                    if tx.send(Action::SubmissionSettled(result)).is_err() {
                        debug!("Submission settled after the screen closed");
                    }
                });
                EventResult::Continue
            }
            ScreenAction::None => EventResult::Continue,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::SearchSettled { target, outcome } => {
                self.screen.apply_search_outcome(target, outcome);
            }
            Action::SubmissionSettled(result) => {
                self.screen.settle_submission(result);
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

        let header_state = *self.header.borrow();
        let header = HeaderBar::new(self.translator.t(I18nKey::CreateDiscussion), header_state)
            .labels(
                self.translator.t(I18nKey::Close),
                self.translator.t(I18nKey::Create),
                self.translator.t(I18nKey::Loading),
            )
            .style(HeaderBarStyle::from_theme(&self.theme));

        frame.render_widget(header, header_area);
        frame.render_widget(&self.screen, body_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    use crate::domain::discussion::CreateDiscussionRequest;
    use crate::domain::entities::{SourceChannel, SourceMessage, UserRecord};
    use crate::domain::ports::mocks::{MockDirectoryPort, MockDiscussionPort};
    use crate::domain::search::SearchRecord;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(discussions: Arc<MockDiscussionPort>) -> App {
        let mut directory = MockDirectoryPort::new();
        directory.expect_search().returning(|query| {
            Ok(vec![SearchRecord::User(UserRecord::new(
                "u1",
                query.text.clone(),
            ))])
        });

        let params = NavigationParams::default()
            .with_channel(SourceChannel::new("c1"))
            .with_message(SourceMessage::new("m1", "hello"));

        App::new(
            &params,
            Arc::new(directory),
            discussions,
            AppOptions {
                title_settings: TitleSettings::default(),
                quiet_period: Duration::from_millis(300),
                translator: Translator::new(),
                theme: Theme::default(),
            },
        )
    }

    async fn next_action(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);
    }

    /// Invites "bob" and types a reply.
    async fn fill_form(app: &mut App) {
        // Channel -> Name -> Users
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('b')));
        app.handle_key(key(KeyCode::Char('o')));
        app.handle_key(key(KeyCode::Char('b')));

        next_action(app).await;
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc));

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Char('i')));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_outcome_reaches_picker_and_submission_settles() {
        let discussions = Arc::new(MockDiscussionPort::new(true));
        let mut app = app(discussions.clone());

        fill_form(&mut app).await;
        assert!(app.header.borrow().show_submit);

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_s), EventResult::Continue);
        assert!(app.header.borrow().loading);

        next_action(&mut app).await;
        assert!(!app.header.borrow().loading);

        let requests = discussions.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].users, vec!["bob"]);
        assert_eq!(requests[0].t_name, "hello");
    }

    struct PanickingPort;

    #[async_trait::async_trait]
    impl DiscussionPort for PanickingPort {
        async fn create_discussion(
            &self,
            _request: CreateDiscussionRequest,
        ) -> Result<(), ClientError> {
            panic!("attempt to multiply with overflow");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_submission_still_settles() {
        let mut app = app(Arc::new(MockDiscussionPort::new(true)));
        app.use_case = Arc::new(CreateDiscussionUseCase::new(Arc::new(PanickingPort)));

        fill_form(&mut app).await;
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        app.handle_key(ctrl_s);
        assert!(app.header.borrow().loading);

        next_action(&mut app).await;
        assert!(!app.header.borrow().loading);
        assert!(!app.screen.is_submitting());
    }

    #[tokio::test]
    async fn test_escape_exits() {
        let mut app = app(Arc::new(MockDiscussionPort::new(true)));
        assert_eq!(app.handle_key(key(KeyCode::Esc)), EventResult::Exit);
    }
}
