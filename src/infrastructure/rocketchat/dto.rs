use serde::Deserialize;

use crate::domain::entities::{RoomRecord, RoomType, UserRecord};
use crate::domain::search::SearchRecord;

/// `GET /api/v1/spotlight` response.
#[derive(Debug, Deserialize)]
pub struct SpotlightResponse {
    #[serde(default)]
    pub users: Vec<SpotlightUser>,
    #[serde(default)]
    pub rooms: Vec<SpotlightRoom>,
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct SpotlightUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpotlightRoom {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub fname: Option<String>,
    pub t: String,
    pub prid: Option<String>,
    #[serde(default)]
    pub usernames: Vec<String>,
}

impl SpotlightResponse {
    /// Converts into domain records, users first. Rooms with an unknown type
    /// are skipped.
    #[must_use]
    pub fn into_records(self) -> Vec<SearchRecord> {
        let users = self.users.into_iter().map(|user| {
            let mut record = UserRecord::new(user.id, user.username);
            record.name = user.name;
            SearchRecord::User(record)
        });

        let rooms = self.rooms.into_iter().filter_map(|room| {
            let t = RoomType::from_code(&room.t)?;
            Some(SearchRecord::Room(RoomRecord {
                rid: room.id,
                name: room.name,
                fname: room.fname,
                t,
                prid: room.prid,
                usernames: room.usernames,
            }))
        });

        users.chain(rooms).collect()
    }
}

/// `POST /api/v1/rooms.createDiscussion` response.
#[derive(Debug, Deserialize)]
pub struct CreateDiscussionResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
}

/// Error body returned by the REST API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "errorType")]
    pub error_type: Option<String>,
}

impl ErrorResponse {
    /// Picks the most specific message available.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.error_type.or(self.error).or(self.message)
    }
}
