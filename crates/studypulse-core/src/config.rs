//! Client configuration model.
//!
//! Every section has defaults, so an empty or missing `config.toml` yields a
//! working configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::notification::DEFAULT_DISPLAY_SECS;

pub const DEFAULT_API_BASE_URL: &str = "https://study-pulse-beta.vercel.app/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub notifications: NotificationSettings,
    pub storage: StorageSettings,
    pub dev: DevSettings,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            notifications: NotificationSettings::default(),
            storage: StorageSettings::default(),
            dev: DevSettings::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationSettings {
    pub display_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            display_secs: DEFAULT_DISPLAY_SECS,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the directory holding `storage.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DevSettings {
    /// Accepts the hard-coded test account without contacting the server.
    /// Insecure: the client grants itself admin rights. Keep off outside local testing.
    pub test_account_bypass: bool,
}
