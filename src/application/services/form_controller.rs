//! Create discussion form controller.
//!
//! Owns the [`FormState`] and publishes a [`HeaderState`] that the host
//! renders its submit action from. The header is republished after every
//! transition that actually changed the state.

use tokio::sync::watch;
use tracing::debug;

use crate::application::use_cases::CreateDiscussionUseCase;
use crate::domain::discussion::{CreateDiscussionRequest, FormState, NavigationParams};
use crate::domain::errors::ClientError;
use crate::domain::search::{SearchTarget, Selection};

/// What the host header needs to know about the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderState {
    /// Whether the submit action is offered.
    pub show_submit: bool,
    /// Whether a submission is in flight.
    pub loading: bool,
}

impl HeaderState {
    fn from_form(state: &FormState) -> Self {
        Self {
            show_submit: state.is_valid(),
            loading: state.loading,
        }
    }
}

/// Read side of the header channel, held by the host.
pub type HeaderHandle = watch::Receiver<HeaderState>;

pub struct DiscussionFormController {
    state: FormState,
    header: watch::Sender<HeaderState>,
}

impl DiscussionFormController {
    /// Creates the controller pre-filled from `params` together with the
    /// handle the host reads the header from.
    #[must_use]
    pub fn new(params: &NavigationParams) -> (Self, HeaderHandle) {
        let state = FormState::from_params(params);
        let (header, handle) = watch::channel(HeaderState::from_form(&state));

        debug!(
            channel = ?state.channel,
            message = ?state.message,
            "Discussion form opened"
        );

        (Self { state, header }, handle)
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.state.loading
    }

    /// Returns another handle on the header.
    #[must_use]
    pub fn subscribe(&self) -> HeaderHandle {
        self.header.subscribe()
    }

    pub fn select_channel(&mut self, channel: impl Into<String>) {
        let channel = channel.into();
        self.update(|state| state.channel = Some(channel));
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.update(|state| state.name = name);
    }

    pub fn select_users(&mut self, users: Vec<String>) {
        self.update(|state| state.users = users);
    }

    pub fn set_reply(&mut self, reply: impl Into<String>) {
        let reply = reply.into();
        self.update(|state| state.reply = reply);
    }

    /// Routes a picker selection to the matching field.
    pub fn apply_selection(&mut self, target: SearchTarget, selection: Selection) {
        match (target, selection) {
            (SearchTarget::Channels, Selection::Single(channel)) => self.select_channel(channel),
            (SearchTarget::Channels, Selection::Multiple(channels)) => {
                if let Some(channel) = channels.into_iter().next() {
                    self.select_channel(channel);
                }
            }
            (SearchTarget::Users, Selection::Single(user)) => self.select_users(vec![user]),
            (SearchTarget::Users, Selection::Multiple(users)) => self.select_users(users),
        }
    }

    /// Moves to the submitting state and returns the request to send.
    ///
    /// Returns `None` when the form is invalid or a submission is already in
    /// flight.
    pub fn begin_submission(&mut self) -> Option<CreateDiscussionRequest> {
        if self.state.loading {
            debug!("Submission already in flight");
            return None;
        }
        if !self.state.is_valid() {
            debug!("Ignoring submit on incomplete form");
            return None;
        }

        let request = self.state.to_request();
        self.update(|state| state.loading = true);
        Some(request)
    }

    /// Returns to idle once the create call settled. Failures are not
    /// surfaced.
    pub fn settle_submission(&mut self, result: Result<(), ClientError>) {
        if let Err(error) = result {
            debug!(%error, "Discussion creation failed");
        }
        self.update(|state| state.loading = false);
    }

    /// Runs a full submission against `use_case`.
    pub async fn submit(&mut self, use_case: &CreateDiscussionUseCase) {
        let Some(request) = self.begin_submission() else {
            return;
        };
        let result = use_case.execute(request).await;
        self.settle_submission(result);
    }

    fn update(&mut self, apply: impl FnOnce(&mut FormState)) {
        let previous = self.state.clone();
        apply(&mut self.state);

        if self.state != previous {
            let next = HeaderState::from_form(&self.state);
            self.header.send_if_modified(|current| {
                if *current == next {
                    false
                } else {
                    *current = next;
                    true
                }
            });
        }
    }
}
