//! Publish orchestrator: caption, primary send, best-effort notify

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::observability::Metrics;
use crate::store::{ItemStore, public_link};

use super::caption::{Caption, CaptionGenerator};
use super::telegram::ChannelSender;
use super::webhook::Notifier;

/// Composes the external collaborators for one item.
///
/// Only the primary channel outcome decides success. The webhook is
/// attempted regardless when configured, and its outcome is logged only.
/// The caller commits the ledger entry iff `publish` returns true.
pub struct Publisher {
    store: Arc<dyn ItemStore>,
    generator: Arc<dyn CaptionGenerator>,
    channel: Arc<dyn ChannelSender>,
    notifier: Option<Arc<dyn Notifier>>,
    public_base_url: String,
    metrics: Arc<Metrics>,
}

impl Publisher {
    pub fn new(
        store: Arc<dyn ItemStore>,
        generator: Arc<dyn CaptionGenerator>,
        channel: Arc<dyn ChannelSender>,
        notifier: Option<Arc<dyn Notifier>>,
        public_base_url: String,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            store,
            generator,
            channel,
            notifier,
            public_base_url,
            metrics,
        }
    }

    /// Publish one item. Returns true only on confirmed primary-channel
    /// success. Never panics or propagates collaborator failures.
    pub async fn publish(&self, item: &str, seed: u64) -> bool {
        let caption = match self.generator.generate(seed).await {
            Ok(caption) => caption,
            Err(e) => {
                warn!(item, error = %e, "Caption generation failed, using fallback");
                self.metrics.caption_fallback();
                Caption::fallback()
            }
        };

        let video = match self.store.read(item) {
            Ok(video) => video,
            Err(e) => {
                error!(item, error = %e, "Failed to read item from store");
                self.metrics.delivery_failed();
                return false;
            }
        };

        let sent = match self.channel.send(&caption.message(), item, video).await {
            Ok(()) => {
                info!(item, title = %caption.title, "Published to primary channel");
                self.metrics.item_published();
                true
            }
            Err(e) => {
                warn!(item, error = %e, "Primary channel delivery failed");
                self.metrics.delivery_failed();
                false
            }
        };

        if let Some(notifier) = &self.notifier {
            let link = public_link(&self.public_base_url, item);
            if let Err(e) = notifier.notify(&caption.title, &caption.body, &link).await {
                // Fire-and-forget: never affects the reported outcome
                warn!(item, error = %e, "Webhook notification failed");
            }
        }

        sent
    }
}
