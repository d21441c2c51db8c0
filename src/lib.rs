//! rcdiscuss - start Rocket.Chat discussions from the terminal.
//!
//! This crate provides the "Create Discussion" form of a Rocket.Chat client:
//! debounced channel and user pickers backed by the server directory, a form
//! controller that publishes whether the form can be submitted, and a TUI
//! built on ratatui.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the form controller, debounced search and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the REST client and configuration.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "rcdiscuss";
