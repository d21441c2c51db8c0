//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Rocket.Chat REST client.
pub mod rocketchat;

pub use config::{AppConfig, CliArgs, LogLevel, ConfigStore, ThemeName};
pub use rocketchat::RocketChatClient;
