//! UI screens.

mod app;
mod create_discussion_screen;

pub use app::{App, AppOptions};
pub use create_discussion_screen::{
    CreateDiscussionScreen, FormFocus, ScreenAction, ScreenSearches,
};
