//! Configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, `config.toml`,
//! environment variables. Command-line flags are applied by the shell.

use std::fs;
use std::path::Path;
use studypulse_core::ConfigError;
use studypulse_core::config::ClientConfig;

use crate::paths::StudyPulsePaths;

pub const BASE_URL_ENV: &str = "STUDYPULSE_API_BASE_URL";

pub struct ConfigService;

impl ConfigService {
    /// Loads the configuration from the default location and the process environment.
    pub fn load() -> Result<ClientConfig, ConfigError> {
        let path = StudyPulsePaths::config_file()?;
        Self::load_from(&path, |name| std::env::var(name).ok())
    }

    /// Loads the configuration from `path`, reading overrides through `env`.
    ///
    /// A missing file yields the defaults; an unparsable file is an error.
    pub fn load_from<F>(path: &Path, env: F) -> Result<ClientConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<ClientConfig>(&content)?
        } else {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
            ClientConfig::default()
        };

        if let Some(base_url) = env(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.api.base_url = base_url;
        }

        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studypulse_core::config::DEFAULT_API_BASE_URL;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigService::load_from(&dir.path().join("config.toml"), no_env).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:8000/api/\"\n\n[dev]\ntest_account_bypass = true\n",
        )
        .unwrap();

        let config = ConfigService::load_from(&path, no_env).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert!(config.dev.test_account_bypass);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"http://file\"\n").unwrap();

        let config = ConfigService::load_from(&path, |name| {
            (name == BASE_URL_ENV).then(|| "http://env".to_string())
        })
        .unwrap();
        assert_eq!(config.api.base_url, "http://env");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let result = ConfigService::load_from(&path, no_env);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
