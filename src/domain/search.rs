use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{RoomRecord, TitleSettings, UserRecord, room_title};

/// Directory search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub filter_users: bool,
    pub filter_rooms: bool,
}

impl SearchQuery {
    /// Searches both users and rooms.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filter_users: true,
            filter_rooms: true,
        }
    }

    #[must_use]
    pub const fn without_users(mut self) -> Self {
        self.filter_users = false;
        self
    }

    #[must_use]
    pub const fn without_rooms(mut self) -> Self {
        self.filter_rooms = false;
        self
    }
}

/// Raw record returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRecord {
    Room(RoomRecord),
    User(UserRecord),
}

/// What a picker searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchTarget {
    Channels,
    Users,
}

impl SearchTarget {
    #[must_use]
    pub fn query(self, keyword: &str) -> SearchQuery {
        match self {
            Self::Channels => SearchQuery::new(keyword).without_users(),
            Self::Users => SearchQuery::new(keyword).without_rooms(),
        }
    }

    /// Turns directory records into display items, dropping records of the
    /// other kind.
    #[must_use]
    pub fn project(
        self,
        records: Vec<SearchRecord>,
        settings: &TitleSettings,
    ) -> Vec<SearchResultItem> {
        records
            .into_iter()
            .filter_map(|record| match (self, record) {
                (Self::Channels, SearchRecord::Room(room)) => Some(SearchResultItem::Channel {
                    display_title: room_title(&room, settings),
                    room_id: room.rid,
                }),
                (Self::Users, SearchRecord::User(user)) => Some(SearchResultItem::User {
                    user_name: user.username,
                }),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channels => write!(f, "channels"),
            Self::Users => write!(f, "users"),
        }
    }
}

/// Display ready projection of a search record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResultItem {
    Channel {
        room_id: String,
        display_title: String,
    },
    User {
        user_name: String,
    },
}

impl SearchResultItem {
    /// Value reported on selection.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Channel { room_id, .. } => room_id,
            Self::User { user_name } => user_name,
        }
    }

    /// Text shown in the picker.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Channel { display_title, .. } => display_title,
            Self::User { user_name } => user_name,
        }
    }
}

/// Value confirmed in a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(String),
    Multiple(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RoomType;

    fn records() -> Vec<SearchRecord> {
        vec![
            SearchRecord::Room(
                RoomRecord::new("r1", "general", RoomType::Channel).with_fname("General"),
            ),
            SearchRecord::User(UserRecord::new("u1", "bob").with_name("Bob Smith")),
            SearchRecord::Room(RoomRecord::new("r2", "dev", RoomType::Private)),
        ]
    }

    #[test]
    fn test_channel_query_excludes_users() {
        let query = SearchTarget::Channels.query("gen");
        assert_eq!(query.text, "gen");
        assert!(!query.filter_users);
        assert!(query.filter_rooms);
    }

    #[test]
    fn test_user_query_excludes_rooms() {
        let query = SearchTarget::Users.query("bo");
        assert!(query.filter_users);
        assert!(!query.filter_rooms);
    }

    #[test]
    fn test_project_channels() {
        let items = SearchTarget::Channels.project(records(), &TitleSettings::default());
        assert_eq!(
            items,
            vec![
                SearchResultItem::Channel {
                    room_id: "r1".to_string(),
                    display_title: "general".to_string(),
                },
                SearchResultItem::Channel {
                    room_id: "r2".to_string(),
                    display_title: "dev".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_project_users_uses_username() {
        let items = SearchTarget::Users.project(records(), &TitleSettings::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value(), "bob");
        assert_eq!(items[0].label(), "bob");
    }

    #[test]
    fn test_channel_item_value_and_label() {
        let item = SearchResultItem::Channel {
            room_id: "r1".to_string(),
            display_title: "General".to_string(),
        };
        assert_eq!(item.value(), "r1");
        assert_eq!(item.label(), "General");
    }
}
