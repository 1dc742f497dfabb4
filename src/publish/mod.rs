//! Publishing: caption generation, primary channel delivery, webhook notify
//!
//! Every collaborator is a trait with a real HTTP implementation beside it,
//! so tests can drive the orchestrator with in-process fakes.

pub mod caption;
pub mod orchestrator;
pub mod telegram;
pub mod webhook;

pub use caption::{
    Caption, CaptionGenerator, DEFAULT_CAPTION, DEFAULT_TITLE, GenerationError, PollinationsClient,
};
pub use orchestrator::Publisher;
pub use telegram::{ChannelSender, DeliveryError, TelegramSender};
pub use webhook::{Notifier, NotifyError, WebhookNotifier};
