//! Presentation layer with UI components and event handling.

/// Event handling.
pub mod events;
/// Localized strings.
pub mod i18n;
/// Colour themes.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::{App, AppOptions};
