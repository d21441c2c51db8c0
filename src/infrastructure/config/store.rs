//! Locating and loading `config.toml`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Config file location, rooted at the platform config directory unless
/// another directory is given.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Opens the store at the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigDirNotFound` when the platform has no
    /// home directory to derive it from.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::at)
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    #[must_use]
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn default_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Loads the config at `path_override`, or at the default file.
    ///
    /// A missing file is created with defaults. A malformed one yields
    /// defaults and is left untouched. Relative paths inside the file are
    /// anchored to the directory holding it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or created.
    pub fn load(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.map_or_else(|| self.default_file(), Path::to_path_buf);

        let mut config = if path.exists() {
            Self::read(&path)?
        } else {
            info!(path = %path.display(), "Config file not found, writing defaults");
            let config = AppConfig::default();
            Self::write_atomically(&path, &config)?;
            config
        };

        let base = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(self.dir.as_path());
        config.resolve_relative_paths(base);
        config.config = Some(path);

        Ok(config)
    }

    fn read(path: &Path) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "Config loaded");
                Ok(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed config file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    fn write_atomically(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;

        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
