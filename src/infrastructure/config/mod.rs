//! Application configuration.

pub mod app_config;
pub mod args;
pub mod store;

pub use app_config::{
    AppConfig, DisplayConfig, LogLevel, NetworkConfig, SearchConfig, ServerConfig, ThemeName,
};
pub use args::CliArgs;
pub use store::{ConfigError, ConfigStore};
