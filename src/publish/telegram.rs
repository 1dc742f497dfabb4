//! Primary channel collaborator: Telegram `sendVideo`

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::debug;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("channel returned status {0}")]
    BadStatus(u16),
}

/// The primary publish side effect. Ok(()) means confirmed success and is
/// the only thing that authorizes a ledger commit.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    async fn send(&self, caption: &str, file_name: &str, video: Bytes)
    -> Result<(), DeliveryError>;
}

/// Telegram bot API sender
pub struct TelegramSender {
    client: Client,
    bot_token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramSender {
    /// The upload is fully blocking with no client-side timeout; large
    /// videos on slow links take as long as they take.
    pub fn new(bot_token: &str, chat_id: &str) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .build()
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
            api_base: TELEGRAM_API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn send_video_url(&self) -> String {
        format!("{}/bot{}/sendVideo", self.api_base, self.bot_token)
    }
}

#[async_trait]
impl ChannelSender for TelegramSender {
    async fn send(
        &self,
        caption: &str,
        file_name: &str,
        video: Bytes,
    ) -> Result<(), DeliveryError> {
        debug!(file_name, size = video.len(), "Uploading to Telegram");

        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .part(
                "video",
                Part::bytes(video.to_vec()).file_name(file_name.to_string()),
            );

        let response = self
            .client
            .post(self.send_video_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::BadStatus(status.as_u16()));
        }

        debug!(file_name, "Telegram upload confirmed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_video_url() {
        let sender = TelegramSender::new("123:abc", "@channel")
            .unwrap()
            .with_api_base("https://example.test/");
        assert_eq!(
            sender.send_video_url(),
            "https://example.test/bot123:abc/sendVideo"
        );
    }
}
