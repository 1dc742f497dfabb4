use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// Item store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory of candidate media files
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("videos")
}

/// Publication ledger configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Location of the durable publication record
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("data/sent_history.txt")
}

/// Retention configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetentionConfig {
    /// Whole days an item stays in the store after publication
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
        }
    }
}

fn default_retention_days() -> u32 {
    15
}

/// Caption generation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,
    /// Bounded wait for the generation call; fallback on expiry
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_generation_endpoint(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

fn default_generation_endpoint() -> String {
    "https://text.pollinations.ai".to_string()
}

fn default_generation_timeout_secs() -> u64 {
    20
}

/// Public link configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LinksConfig {
    /// Base URL under which published items are reachable; used for the
    /// webhook item link. Empty means unset.
    #[serde(default)]
    pub public_base_url: String,
}

/// Telegram channel credentials (loaded from environment, not from config file)
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TelegramConfig {
    #[serde(skip)]
    pub bot_token: Option<String>,
    #[serde(skip)]
    pub chat_id: Option<String>,
}

/// Webhook endpoint (loaded from environment, not from config file)
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WebhookConfig {
    #[serde(skip)]
    pub url: Option<String>,
}
