//! Caption generation collaborator
//!
//! Asks a text-generation endpoint for a `TITLE | CAPTION` pair. Any
//! failure (transport error, timeout, bad status, missing separator) is a
//! typed error; the orchestrator degrades to the fixed fallback pair and
//! never lets generation failures escape.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Fallback content used whenever generation fails
pub const DEFAULT_TITLE: &str = "Khamosh Raatein aur Bikhri Yaadein";
pub const DEFAULT_CAPTION: &str = "Headphones lagayein aur kho jayein in yaadon mein.";

const PROMPT_TEMPLATE: &str = "Write a deep, poetic, and emotional title and a 1-sentence caption for a Hindi Lofi Music video. \
Theme: Sadness, Night, Rain, Lost Love, Silence. \
Style: Aesthetic, Heart touching. \
Language: Hinglish (Hindi + English mix). \
Format: TITLE | CAPTION \
IMPORTANT RULES: \
1. Do NOT use hashtags (#). \
2. Do NOT use asterisks (*) or bold formatting. \
3. Do NOT use the word 'AI' or 'Generated'. \
4. Keep it very clean and minimal.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status: {0}")]
    BadStatus(u16),

    #[error("response missing title/caption separator")]
    MissingSeparator,
}

/// Title/caption pair for one publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    pub body: String,
}

impl Caption {
    pub fn fallback() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_CAPTION.to_string(),
        }
    }

    /// Message text for the primary channel
    pub fn message(&self) -> String {
        format!("{}\n\n{}", self.title, self.body)
    }
}

/// External text-generation collaborator
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Generate one title/caption pair. `seed` varies the prompt between
    /// runs; the same seed does not guarantee the same output.
    async fn generate(&self, seed: u64) -> Result<Caption, GenerationError>;
}

/// Strip formatting symbols the prompt forbids but models still emit
fn scrub_symbols(text: &str) -> String {
    text.replace(['*', '#', '"'], "")
}

/// Parse a scrubbed response body into a caption
fn parse_response(text: &str) -> Result<Caption, GenerationError> {
    let (title, body) = text.split_once('|').ok_or(GenerationError::MissingSeparator)?;
    Ok(Caption {
        title: title.trim().to_string(),
        body: body.trim().to_string(),
    })
}

/// Client for the pollinations.ai text endpoint (prompt in the URL path)
pub struct PollinationsClient {
    client: Client,
    endpoint: String,
}

impl PollinationsClient {
    /// Create a client with a bounded request timeout. The timeout is the
    /// fallback trigger: an expired wait becomes `GenerationError::Timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn prompt_url(&self, seed: u64) -> String {
        let prompt = format!("{} Variation seed: {}.", PROMPT_TEMPLATE, seed);
        format!("{}/{}", self.endpoint, urlencoding::encode(&prompt))
    }
}

#[async_trait]
impl CaptionGenerator for PollinationsClient {
    async fn generate(&self, seed: u64) -> Result<Caption, GenerationError> {
        let url = self.prompt_url(seed);
        debug!(seed, "Requesting generated caption");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::BadStatus(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        let caption = parse_response(&scrub_symbols(text.trim()))?;
        debug!(title = %caption.title, "Generated caption");
        Ok(caption)
    }
}
