//! Unified path management for StudyPulse files.
//!
//! ```text
//! ~/.config/studypulse/        # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/studypulse/   # Data directory
//! ├── storage.json             # Durable key-value store (session, preferences)
//! └── logs/                    # Shell logs
//!     └── studypulse.log.YYYY-MM-DD
//! ```
//!
//! `STUDYPULSE_CONFIG_DIR` overrides the config directory.

use std::path::PathBuf;
use studypulse_core::ConfigError;

const APP_DIR: &str = "studypulse";
pub const CONFIG_DIR_ENV: &str = "STUDYPULSE_CONFIG_DIR";

pub struct StudyPulsePaths;

impl StudyPulsePaths {
    /// Returns the configuration directory.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(ConfigError::DirectoryNotFound("config"))
    }

    /// Returns the data directory.
    pub fn data_dir() -> Result<PathBuf, ConfigError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(ConfigError::DirectoryNotFound("data"))
    }

    pub fn config_file() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Key-value store file inside `dir`, or inside the data directory.
    pub fn storage_file(dir: Option<&PathBuf>) -> Result<PathBuf, ConfigError> {
        let dir = match dir {
            Some(dir) => dir.clone(),
            None => Self::data_dir()?,
        };
        Ok(dir.join("storage.json"))
    }

    pub fn logs_dir() -> Result<PathBuf, ConfigError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
