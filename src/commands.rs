use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use dropcast::config::Config;
use dropcast::ledger::{self, FileLedger, LedgerEntry, LedgerStore};
use dropcast::observability::Metrics;
use dropcast::publish::{Notifier, PollinationsClient, Publisher, TelegramSender, WebhookNotifier};
use dropcast::run::run_cycle;
use dropcast::store::{DirItemStore, ItemStore, StoreError};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One full publish cycle
pub async fn run(config: Config) -> Result<(), AnyError> {
    let (Some(bot_token), Some(chat_id)) =
        (&config.telegram.bot_token, &config.telegram.chat_id)
    else {
        return Err("TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID are required for `run`".into());
    };

    let store: Arc<dyn ItemStore> = Arc::new(DirItemStore::new(&config.store.dir));
    let ledger: Arc<dyn LedgerStore> = Arc::new(FileLedger::new(&config.ledger.path));
    let metrics = Arc::new(Metrics::new());

    let generator = PollinationsClient::new(
        &config.generation.endpoint,
        Duration::from_secs(config.generation.timeout_secs),
    )?;
    let channel = TelegramSender::new(bot_token, chat_id)?;
    let notifier: Option<Arc<dyn Notifier>> = match &config.webhook.url {
        Some(url) => Some(Arc::new(WebhookNotifier::new(url)?)),
        None => None,
    };

    let publisher = Publisher::new(
        store.clone(),
        Arc::new(generator),
        Arc::new(channel),
        notifier,
        config.links.public_base_url.clone(),
        metrics.clone(),
    );

    let mut rng = StdRng::from_entropy();
    let outcome = run_cycle(
        store.as_ref(),
        ledger.as_ref(),
        &publisher,
        Utc::now().date_naive(),
        config.retention.retention_days,
        &mut rng,
    )
    .await?;

    metrics.items_expired(outcome.sweep.expired as u64);
    info!(
        expired = outcome.sweep.expired,
        selected = outcome.selected.as_deref().unwrap_or("-"),
        published = outcome.published,
        "Run complete"
    );

    match outcome.selected {
        Some(item) if !outcome.published => Err(format!("delivery failed for {}", item).into()),
        _ => Ok(()),
    }
}

/// Retention sweep only
pub fn prune(config: Config) -> Result<(), AnyError> {
    let store = DirItemStore::new(&config.store.dir);
    let ledger = FileLedger::new(&config.ledger.path);

    let stats = ledger::enforce(
        &ledger,
        &store,
        Utc::now().date_naive(),
        config.retention.retention_days,
    )?;
    info!(
        expired = stats.expired,
        retained = stats.retained,
        legacy = stats.legacy,
        "Prune complete"
    );
    Ok(())
}

/// Store and ledger counts
pub fn status(config: Config) -> Result<(), AnyError> {
    let store = DirItemStore::new(&config.store.dir);
    let ledger = FileLedger::new(&config.ledger.path);

    let candidates = match store.list_candidates() {
        Ok(candidates) => candidates.len(),
        Err(StoreError::Unavailable(path)) => {
            println!("item store missing: {}", path.display());
            0
        }
        Err(e) => return Err(e.into()),
    };

    let entries = ledger.load()?;
    let published = entries
        .iter()
        .filter(|e| matches!(e, LedgerEntry::Published { .. }))
        .count();
    let legacy = entries.len() - published;

    println!("candidates: {}", candidates);
    println!("published:  {}", published);
    println!("legacy:     {}", legacy);
    Ok(())
}
