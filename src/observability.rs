//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    items_published: AtomicU64,
    items_expired: AtomicU64,
    delivery_failures: AtomicU64,
    caption_fallbacks: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_published(&self) {
        self.items_published.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "items_published", "Metric incremented");
    }

    pub fn items_expired(&self, count: u64) {
        self.items_expired.fetch_add(count, Ordering::Relaxed);
        tracing::debug!(counter = "items_expired", count, "Metric incremented");
    }

    pub fn delivery_failed(&self) {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "delivery_failures", "Metric incremented");
    }

    pub fn caption_fallback(&self) {
        self.caption_fallbacks.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "caption_fallbacks", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            items_published: self.items_published.load(Ordering::Relaxed),
            items_expired: self.items_expired.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
            caption_fallbacks: self.caption_fallbacks.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub items_published: u64,
    pub items_expired: u64,
    pub delivery_failures: u64,
    pub caption_fallbacks: u64,
}
