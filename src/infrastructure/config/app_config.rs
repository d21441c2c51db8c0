//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::args::CliArgs;
use crate::domain::entities::TitleSettings;

const APP_NAME: &str = "rcdiscuss";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Named colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
    /// Black (OLED) theme.
    Black,
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Colour theme.
    #[serde(default)]
    pub theme: ThemeName,

    /// TOML file overriding the built-in strings.
    #[serde(default)]
    pub translations: Option<PathBuf>,

    /// Server connection.
    #[serde(default)]
    pub server: ServerConfig,

    /// Search behaviour.
    #[serde(default)]
    pub search: SearchConfig,

    /// Room title display settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Network settings.
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Server connection configuration.
///
/// The auth token is only taken from the CLI or environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server base URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Id of the user the token belongs to.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Username of that user, excluded from group DM titles.
    #[serde(default)]
    pub username: Option<String>,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a picker search runs, in milliseconds.
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
}

impl SearchConfig {
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
        }
    }
}

/// Mirrors the server's room naming settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `UI_Use_Real_Name`.
    #[serde(default)]
    pub use_real_name: bool,

    /// `UI_Allow_room_names_with_special_chars`.
    #[serde(default)]
    pub allow_special_chars: bool,
}

/// Network configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl NetworkConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_quiet_period_ms() -> u64 {
    300
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(theme) = args.theme {
            self.theme = theme;
        }
        if let Some(url) = &args.server {
            self.server.url = Some(url.clone());
        }
        if let Some(user_id) = &args.user_id {
            self.server.user_id = Some(user_id.clone());
        }
    }

    /// Builds the room title settings.
    #[must_use]
    pub fn title_settings(&self) -> TitleSettings {
        TitleSettings {
            use_real_name: self.display.use_real_name,
            allow_special_chars: self.display.allow_special_chars,
            own_username: self.server.username.clone(),
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join("rcdiscuss.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Anchors relative file paths written in the config file to `base`,
    /// the directory holding that file.
    pub fn resolve_relative_paths(&mut self, base: &Path) {
        for path in [&mut self.log_path, &mut self.translations]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            theme: ThemeName::default(),
            translations: None,
            server: ServerConfig::default(),
            search: SearchConfig::default(),
            display: DisplayConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}
