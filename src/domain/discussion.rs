//! Discussion form state and the request it produces.

use serde::{Deserialize, Serialize};

use super::entities::{SourceChannel, SourceMessage};

/// Parameters the screen is opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    /// Channel the screen was opened from.
    pub channel: Option<SourceChannel>,
    /// Message the discussion should be anchored to.
    pub message: Option<SourceMessage>,
}

impl NavigationParams {
    #[must_use]
    pub fn with_channel(mut self, channel: SourceChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: SourceMessage) -> Self {
        self.message = Some(message);
        self
    }
}

/// Everything the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Parent channel id.
    pub channel: Option<String>,
    /// Originating message id.
    pub message: Option<String>,
    /// Discussion name.
    pub name: String,
    /// Usernames to invite, in selection order.
    pub users: Vec<String>,
    /// First message of the discussion.
    pub reply: String,
    /// True while a create request is in flight.
    pub loading: bool,
}

impl FormState {
    /// Builds the initial state, pre-filling the name with the message text.
    #[must_use]
    pub fn from_params(params: &NavigationParams) -> Self {
        Self {
            channel: params.channel.as_ref().map(|c| c.rid.clone()),
            message: params.message.as_ref().map(|m| m.id.clone()),
            name: params
                .message
                .as_ref()
                .map(|m| m.msg.clone())
                .unwrap_or_default(),
            users: Vec::new(),
            reply: String::new(),
            loading: false,
        }
    }

    /// Returns whether the form can be submitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.channel.as_deref().is_some_and(|c| !c.trim().is_empty())
            && !self.name.trim().is_empty()
            && !self.users.is_empty()
            && !self.reply.trim().is_empty()
    }

    /// Maps the collected fields to the server's parameter names.
    #[must_use]
    pub fn to_request(&self) -> CreateDiscussionRequest {
        CreateDiscussionRequest {
            prid: self.channel.clone().unwrap_or_default(),
            pmid: self.message.clone(),
            t_name: self.name.clone(),
            reply: self.reply.clone(),
            users: self.users.clone(),
        }
    }
}

/// Body of `rooms.createDiscussion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDiscussionRequest {
    pub prid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    pub t_name: String,
    pub reply: String,
    pub users: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn valid_state() -> FormState {
        FormState {
            channel: Some("c1".to_string()),
            message: None,
            name: "Foo".to_string(),
            users: vec!["bob".to_string()],
            reply: "hi".to_string(),
            loading: false,
        }
    }

    #[test]
    fn test_prefill_from_params() {
        let params = NavigationParams::default()
            .with_channel(SourceChannel::new("c1"))
            .with_message(SourceMessage::new("m1", "hello"));

        let state = FormState::from_params(&params);

        assert_eq!(state.channel.as_deref(), Some("c1"));
        assert_eq!(state.message.as_deref(), Some("m1"));
        assert_eq!(state.name, "hello");
        assert!(state.users.is_empty());
        assert_eq!(state.reply, "");
        assert!(!state.loading);
    }

    #[test]
    fn test_prefill_without_params() {
        let state = FormState::from_params(&NavigationParams::default());
        assert_eq!(state, FormState::default());
        assert!(!state.is_valid());
    }

    #[test]
    fn test_valid_state() {
        assert!(valid_state().is_valid());
    }

    #[test_case(|s: &mut FormState| s.channel = Some(String::new()) ; "empty_channel")]
    #[test_case(|s: &mut FormState| s.channel = None ; "missing_channel")]
    #[test_case(|s: &mut FormState| s.channel = Some("  ".to_string()) ; "blank_channel")]
    #[test_case(|s: &mut FormState| s.name = "   ".to_string() ; "blank_name")]
    #[test_case(|s: &mut FormState| s.users.clear() ; "no_users")]
    #[test_case(|s: &mut FormState| s.reply = "\n\t".to_string() ; "blank_reply")]
    fn test_invalid_when_field_empty(mutate: fn(&mut FormState)) {
        let mut state = valid_state();
        mutate(&mut state);
        assert!(!state.is_valid());
    }

    #[test]
    fn test_loading_does_not_affect_validity() {
        let mut state = valid_state();
        state.loading = true;
        assert!(state.is_valid());
    }

    #[test]
    fn test_request_field_mapping() {
        let mut state = valid_state();
        state.message = Some("m1".to_string());

        let request = state.to_request();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "prid": "c1",
                "pmid": "m1",
                "t_name": "Foo",
                "reply": "hi",
                "users": ["bob"],
            })
        );
    }

    #[test]
    fn test_request_omits_missing_message() {
        let json = serde_json::to_value(valid_state().to_request()).unwrap();
        assert!(json.get("pmid").is_none());
    }
}
