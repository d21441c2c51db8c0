//! Room entity and title formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rocket.Chat room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Public channel (`c`).
    #[serde(rename = "c")]
    Channel,
    /// Private group (`p`).
    #[serde(rename = "p")]
    Private,
    /// Direct message, possibly with several participants (`d`).
    #[serde(rename = "d")]
    Direct,
    /// Omnichannel room (`l`).
    #[serde(rename = "l")]
    Livechat,
}

impl RoomType {
    /// Returns the wire code for this room type.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Channel => 'c',
            Self::Private => 'p',
            Self::Direct => 'd',
            Self::Livechat => 'l',
        }
    }

    /// Parses a wire code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "c" => Some(Self::Channel),
            "p" => Some(Self::Private),
            "d" => Some(Self::Direct),
            "l" => Some(Self::Livechat),
            _ => None,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Room record as returned by the directory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    /// Room identifier.
    pub rid: String,
    /// Slug name, may be empty for group DMs.
    pub name: String,
    /// Human friendly name.
    pub fname: Option<String>,
    /// Room type.
    pub t: RoomType,
    /// Parent room id when this room is itself a discussion.
    pub prid: Option<String>,
    /// Participants, only populated for direct rooms.
    pub usernames: Vec<String>,
}

impl RoomRecord {
    /// Creates a record with only the mandatory fields.
    #[must_use]
    pub fn new(rid: impl Into<String>, name: impl Into<String>, t: RoomType) -> Self {
        Self {
            rid: rid.into(),
            name: name.into(),
            fname: None,
            t,
            prid: None,
            usernames: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fname(mut self, fname: impl Into<String>) -> Self {
        self.fname = Some(fname.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, prid: impl Into<String>) -> Self {
        self.prid = Some(prid.into());
        self
    }

    #[must_use]
    pub fn with_usernames(mut self, usernames: Vec<String>) -> Self {
        self.usernames = usernames;
        self
    }

    /// Returns whether this is a direct room with more than two participants.
    #[must_use]
    pub fn is_group_chat(&self) -> bool {
        self.t == RoomType::Direct && self.usernames.len() > 2
    }

    fn fname(&self) -> Option<&str> {
        self.fname.as_deref().filter(|f| !f.is_empty())
    }
}

/// Server settings that influence how room titles are displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleSettings {
    /// `UI_Use_Real_Name`.
    pub use_real_name: bool,
    /// `UI_Allow_room_names_with_special_chars`.
    pub allow_special_chars: bool,
    /// Username of the logged in user, excluded from group DM titles.
    pub own_username: Option<String>,
}

/// Resolves the display title of a room.
#[must_use]
pub fn room_title(room: &RoomRecord, settings: &TitleSettings) -> String {
    if room.is_group_chat() && room.name.is_empty() {
        let mut others: Vec<&str> = room
            .usernames
            .iter()
            .map(String::as_str)
            .filter(|u| Some(*u) != settings.own_username.as_deref())
            .collect();
        others.sort_unstable();
        return others.join(", ");
    }

    if settings.allow_special_chars && room.t != RoomType::Direct {
        return room.fname().unwrap_or(&room.name).to_string();
    }

    if (room.prid.is_some() || settings.use_real_name)
        && let Some(fname) = room.fname()
    {
        return fname.to_string();
    }

    room.name.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(use_real_name: bool, allow_special_chars: bool) -> TitleSettings {
        TitleSettings {
            use_real_name,
            allow_special_chars,
            own_username: Some("me".to_string()),
        }
    }

    #[test]
    fn test_plain_name_by_default() {
        let room = RoomRecord::new("r1", "general", RoomType::Channel).with_fname("General");
        assert_eq!(room_title(&room, &settings(false, false)), "general");
    }

    #[test]
    fn test_special_chars_prefers_fname() {
        let room = RoomRecord::new("r1", "cafe", RoomType::Channel).with_fname("Café");
        assert_eq!(room_title(&room, &settings(false, true)), "Café");

        let bare = RoomRecord::new("r2", "cafe", RoomType::Private);
        assert_eq!(room_title(&bare, &settings(false, true)), "cafe");
    }

    #[test]
    fn test_special_chars_ignored_for_direct() {
        let dm = RoomRecord::new("d1", "alice", RoomType::Direct).with_fname("Alice Liddell");
        assert_eq!(room_title(&dm, &settings(false, true)), "alice");
        assert_eq!(room_title(&dm, &settings(true, true)), "Alice Liddell");
    }

    #[test]
    fn test_discussion_uses_fname() {
        let room = RoomRecord::new("r1", "f3a9", RoomType::Private)
            .with_fname("Release planning")
            .with_parent("p1");
        assert_eq!(room_title(&room, &settings(false, false)), "Release planning");
    }

    #[test]
    fn test_group_chat_lists_other_participants() {
        let room = RoomRecord::new("g1", "", RoomType::Direct).with_usernames(vec![
            "me".to_string(),
            "zoe".to_string(),
            "bob".to_string(),
        ]);
        assert!(room.is_group_chat());
        assert_eq!(room_title(&room, &settings(false, false)), "bob, zoe");
    }

    #[test]
    fn test_room_type_codes() {
        assert_eq!(RoomType::from_code("p"), Some(RoomType::Private));
        assert_eq!(RoomType::from_code("x"), None);
        assert_eq!(RoomType::Direct.to_string(), "d");
    }
}
