use reqwest::Url;
use thiserror::Error;

use super::models::Config;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("store.dir must not be empty")]
    EmptyStoreDir,

    #[error("ledger.path must not be empty")]
    EmptyLedgerPath,

    #[error("generation.timeout_secs must be nonzero")]
    ZeroGenerationTimeout,

    #[error("invalid URL in {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set together")]
    PartialChannelCredentials,

    #[error("links.public_base_url is required when WEBHOOK_URL is set")]
    MissingPublicBaseUrl,
}

/// Reject inconsistent configurations before any run starts
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.store.dir.as_os_str().is_empty() {
        return Err(ValidationError::EmptyStoreDir);
    }
    if config.ledger.path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyLedgerPath);
    }
    if config.generation.timeout_secs == 0 {
        return Err(ValidationError::ZeroGenerationTimeout);
    }

    check_url("generation.endpoint", &config.generation.endpoint)?;

    if !config.links.public_base_url.is_empty() {
        check_url("links.public_base_url", &config.links.public_base_url)?;
    }

    if config.telegram.bot_token.is_some() != config.telegram.chat_id.is_some() {
        return Err(ValidationError::PartialChannelCredentials);
    }

    if let Some(url) = &config.webhook.url {
        check_url("WEBHOOK_URL", url)?;
        if config.links.public_base_url.is_empty() {
            return Err(ValidationError::MissingPublicBaseUrl);
        }
    }

    Ok(())
}

fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    Url::parse(value).map_err(|_| ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::Config;

    fn base_config() -> Config {
        serde_json::from_str("{}").unwrap()
    }

    #[test]
    fn test_defaults_validate() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn test_empty_store_dir_rejected() {
        let mut config = base_config();
        config.store.dir = "".into();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::EmptyStoreDir)
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = base_config();
        config.generation.timeout_secs = 0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::ZeroGenerationTimeout)
        ));
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let mut config = base_config();
        config.generation.endpoint = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_partial_channel_credentials_rejected() {
        let mut config = base_config();
        config.telegram.bot_token = Some("123:abc".to_string());
        assert!(matches!(
            validate(&config),
            Err(ValidationError::PartialChannelCredentials)
        ));

        config.telegram.chat_id = Some("@channel".to_string());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_webhook_requires_public_base_url() {
        let mut config = base_config();
        config.webhook.url = Some("https://hooks.example.com/x".to_string());
        assert!(matches!(
            validate(&config),
            Err(ValidationError::MissingPublicBaseUrl)
        ));

        config.links.public_base_url = "https://cdn.example.com/media".to_string();
        assert!(validate(&config).is_ok());
    }
}
