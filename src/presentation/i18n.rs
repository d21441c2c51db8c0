//! Localized strings.
//!
//! The screen only ever asks for the keys in [`I18nKey`]. Built-in English
//! strings can be overridden from a TOML table keyed by the string ids:
//!
//! ```toml
//! Create_Discussion = "Nueva discusión"
//! Create = "Crear"
//! ```

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

/// Every string the create discussion screen displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum I18nKey {
    CreateDiscussion,
    Create,
    DiscussionDesc,
    ParentChannelOrGroup,
    SelectAChannel,
    InviteUsers,
    SelectUsers,
    DiscussionName,
    YourMessage,
    MeaningfulNameHint,
    FirstMessageHint,
    Close,
    Loading,
    RoomId,
}

impl I18nKey {
    pub const ALL: [Self; 14] = [
        Self::CreateDiscussion,
        Self::Create,
        Self::DiscussionDesc,
        Self::ParentChannelOrGroup,
        Self::SelectAChannel,
        Self::InviteUsers,
        Self::SelectUsers,
        Self::DiscussionName,
        Self::YourMessage,
        Self::MeaningfulNameHint,
        Self::FirstMessageHint,
        Self::Close,
        Self::Loading,
        Self::RoomId,
    ];

    /// String id used in translation files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CreateDiscussion => "Create_Discussion",
            Self::Create => "Create",
            Self::DiscussionDesc => "Discussion_Desc",
            Self::ParentChannelOrGroup => "Parent_channel_or_group",
            Self::SelectAChannel => "Select_a_Channel",
            Self::InviteUsers => "Invite_users",
            Self::SelectUsers => "Select_Users",
            Self::DiscussionName => "Discussion_name",
            Self::YourMessage => "Your_message",
            Self::MeaningfulNameHint => "A_meaningful_name_for_the_discussion_room",
            Self::FirstMessageHint => {
                "Usually_a_discussion_starts_with_a_question_like_How_do_I_upload_a_picture"
            }
            Self::Close => "Close",
            Self::Loading => "Loading",
            Self::RoomId => "Room_ID",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.id() == id)
    }

    const fn english(self) -> &'static str {
        match self {
            Self::CreateDiscussion => "Create Discussion",
            Self::Create => "Create",
            Self::DiscussionDesc => {
                "Help keeping an overview about what's going on! By creating a discussion, a \
                 sub-channel of the one you selected is created and both are linked."
            }
            Self::ParentChannelOrGroup => "Parent channel or group",
            Self::SelectAChannel => "Select a Channel",
            Self::InviteUsers => "Invite users",
            Self::SelectUsers => "Select Users",
            Self::DiscussionName => "Discussion name",
            Self::YourMessage => "Your message",
            Self::MeaningfulNameHint => "A meaningful name for the discussion room",
            Self::FirstMessageHint => {
                "Usually, a discussion starts with a question, like \"How do I upload a picture?\""
            }
            Self::Close => "Close",
            Self::Loading => "Loading",
            Self::RoomId => "Room ID",
        }
    }
}

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("failed to read translations: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid translations file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Resolves [`I18nKey`]s to display strings.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    overrides: HashMap<I18nKey, String>,
}

impl Translator {
    /// Built-in English strings only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses overrides from TOML text. Ids outside the vocabulary are
    /// dropped with a warning.
    ///
    /// # Errors
    /// Returns error if `content` is not a table of strings.
    pub fn from_toml(content: &str) -> Result<Self, I18nError> {
        let table: HashMap<String, String> = toml::from_str(content)?;
        let mut overrides = HashMap::with_capacity(table.len());

        for (id, text) in table {
            match I18nKey::from_id(&id) {
                Some(key) => {
                    overrides.insert(key, text);
                }
                None => warn!(id = %id, "Ignoring unknown translation key"),
            }
        }

        debug!(count = overrides.len(), "Loaded translation overrides");
        Ok(Self { overrides })
    }

    /// Loads overrides from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, I18nError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[must_use]
    pub fn t(&self, key: I18nKey) -> &str {
        self.overrides
            .get(&key)
            .map_or_else(|| key.english(), String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_strings() {
        let translator = Translator::new();
        assert_eq!(translator.t(I18nKey::CreateDiscussion), "Create Discussion");
        assert_eq!(translator.t(I18nKey::SelectUsers), "Select Users");
    }

    #[test]
    fn test_ids_round_trip() {
        for key in I18nKey::ALL {
            assert_eq!(I18nKey::from_id(key.id()), Some(key));
        }
        assert_eq!(I18nKey::from_id("Not_a_key"), None);
    }

    #[test]
    fn test_overrides_and_unknown_keys() {
        let translator = Translator::from_toml(
            r#"
            Create = "Crear"
            Something_else = "ignored"
            "#,
        )
        .unwrap();

        assert_eq!(translator.t(I18nKey::Create), "Crear");
        assert_eq!(translator.t(I18nKey::Close), "Close");
        assert_eq!(translator.overrides.len(), 1);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(matches!(
            Translator::from_toml("Create = 3"),
            Err(I18nError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("es.toml");
        std::fs::write(&path, "Loading = \"Cargando\"\n").unwrap();

        let translator = Translator::from_file(&path).unwrap();
        assert_eq!(translator.t(I18nKey::Loading), "Cargando");
    }
}
