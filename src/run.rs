//! One run-to-completion publishing cycle

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::ledger::{self, LedgerError, LedgerStore, SweepStats};
use crate::publish::Publisher;
use crate::select::{self, SelectError};
use crate::store::ItemStore;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("selection error: {0}")]
    Select(#[from] SelectError),
}

/// What one cycle did
#[derive(Debug)]
pub struct RunOutcome {
    pub sweep: SweepStats,
    /// The candidate picked for this run, if any
    pub selected: Option<String>,
    /// True when the primary channel confirmed and the ledger was appended
    pub published: bool,
}

/// Run one full cycle: retention sweep, selection, at most one publish.
///
/// The ledger entry is committed iff the publish succeeded; on failure the
/// item stays an eligible candidate for the next run.
pub async fn run_cycle<R: Rng>(
    store: &dyn ItemStore,
    ledger: &dyn LedgerStore,
    publisher: &Publisher,
    today: NaiveDate,
    retention_days: u32,
    rng: &mut R,
) -> Result<RunOutcome, RunError> {
    let sweep = ledger::enforce(ledger, store, today, retention_days)?;

    let Some(item) = select::select_next(store, ledger)? else {
        info!("No unpublished candidates");
        return Ok(RunOutcome {
            sweep,
            selected: None,
            published: false,
        });
    };

    info!(item = %item, "Selected next item");
    let seed = rng.gen_range(0..100_000u64);

    let published = publisher.publish(&item, seed).await;
    if published {
        ledger.append(&item, today)?;
    } else {
        warn!(item = %item, "Publish failed, item stays eligible for retry");
    }

    Ok(RunOutcome {
        sweep,
        selected: Some(item),
        published,
    })
}
