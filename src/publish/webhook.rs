//! Notification collaborator: fire-and-forget webhook POST

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("webhook returned status {0}")]
    BadStatus(u16),
}

/// Best-effort notification of a new publish. Failures are logged by the
/// orchestrator and never affect the run outcome or the ledger.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, caption: &str, link: &str) -> Result<(), NotifyError>;
}

/// JSON webhook notifier (Discord-style `content` payload)
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
}

impl WebhookNotifier {
    pub fn new(endpoint: &str) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .build()
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

fn payload_content(title: &str, caption: &str, link: &str) -> String {
    format!(
        "🎵 **New Upload**\nTitle: {}\nCaption: {}\nLink: {}",
        title, caption, link
    )
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, title: &str, caption: &str, link: &str) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "content": payload_content(title, caption, link),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::BadStatus(status.as_u16()));
        }

        debug!(title, "Webhook notified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_content() {
        let content = payload_content("Raat", "Kho jao.", "https://x.test/a%20b.mp4");
        assert!(content.starts_with("🎵 **New Upload**\n"));
        assert!(content.contains("Title: Raat\n"));
        assert!(content.contains("Caption: Kho jao.\n"));
        assert!(content.ends_with("Link: https://x.test/a%20b.mp4"));
    }
}
