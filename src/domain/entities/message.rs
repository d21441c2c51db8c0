//! Source channel and message a discussion is started from.

use serde::{Deserialize, Serialize};

/// Channel the discussion screen was opened from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceChannel {
    /// Room identifier.
    pub rid: String,
    /// Display title, when the caller knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SourceChannel {
    #[must_use]
    pub fn new(rid: impl Into<String>) -> Self {
        Self {
            rid: rid.into(),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into()).filter(|t: &String| !t.trim().is_empty());
        self
    }
}

/// Message the discussion is anchored to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMessage {
    /// Message identifier.
    pub id: String,
    /// Message text, used to pre-fill the discussion name.
    pub msg: String,
}

impl SourceMessage {
    #[must_use]
    pub fn new(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            msg: msg.into(),
        }
    }
}
