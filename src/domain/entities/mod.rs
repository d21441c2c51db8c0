//! Domain entity definitions.

mod message;
mod room;
mod token;
mod user;

pub use message::{SourceChannel, SourceMessage};
pub use room::{RoomRecord, RoomType, TitleSettings, room_title};
pub use token::{AuthToken, Credentials};
pub use user::UserRecord;
