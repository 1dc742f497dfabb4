//! Configuration management for dropcast
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use dropcast::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Item store: {}", config.store.dir.display());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `DROPCAST__<section>__<key>`
//!
//! Examples:
//! - `DROPCAST__STORE__DIR=drops`
//! - `DROPCAST__RETENTION__RETENTION_DAYS=30`
//! - `DROPCAST__GENERATION__TIMEOUT_SECS=10`
//!
//! Credentials are environment-only and never read from the TOML file:
//! `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`, `WEBHOOK_URL`.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/dropcast.toml`.
//! This can be overridden using the `DROPCAST_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

// Re-export public types
pub use models::{
    Config, GenerationConfig, LedgerConfig, LinksConfig, RetentionConfig, StoreConfig,
    TelegramConfig, WebhookConfig,
};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`DROPCAST__*`, plus credential variables)
    /// 2. TOML file (default: `config/dropcast.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails (bad URLs, partial credentials, etc.)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[store]
dir = "drops"

[retention]
retention_days = 10
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.store.dir.to_str(), Some("drops"));
        assert_eq!(config.retention.retention_days, 10);
    }

    #[test]
    fn test_validation_catches_bad_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[generation]
endpoint = "not a url at all"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidUrl { .. })
        ));
    }
}
