//! Retention sweep: expire and remove items published long enough ago

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::store::ItemStore;

use super::entry::LedgerEntry;
use super::error::Result;
use super::store::LedgerStore;

/// Sweep statistics
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Entries dropped from the ledger (their files deleted or already gone)
    pub expired: usize,
    /// Entries kept (well-formed and legacy)
    pub retained: usize,
    /// Legacy lines encountered (always kept)
    pub legacy: usize,
    /// Expired entries whose file was already absent from the store
    pub missing_files: usize,
}

/// Run one retention sweep.
///
/// Every well-formed entry aged `retention_days` or more has its file
/// deleted from the store and its entry dropped. Legacy lines never expire.
/// The ledger is rewritten only when at least one entry was dropped, with
/// the retained entries in their original relative order.
pub fn enforce(
    ledger: &dyn LedgerStore,
    store: &dyn ItemStore,
    today: NaiveDate,
    retention_days: u32,
) -> Result<SweepStats> {
    let entries = ledger.load()?;
    let mut stats = SweepStats::default();
    let mut retained = Vec::with_capacity(entries.len());

    for entry in entries {
        match &entry {
            LedgerEntry::Legacy(raw) => {
                debug!(line = %raw, "Keeping legacy ledger line");
                stats.legacy += 1;
                retained.push(entry);
            }
            LedgerEntry::Published { name, date } => {
                let age_days = (today - *date).num_days();
                if age_days < i64::from(retention_days) {
                    retained.push(entry);
                    continue;
                }

                match store.remove(name) {
                    Ok(true) => {
                        info!(item = %name, age_days, "Expired item deleted");
                        stats.expired += 1;
                    }
                    Ok(false) => {
                        // Already-consistent state, prune the entry anyway
                        warn!(item = %name, "Expired item already absent from store");
                        stats.expired += 1;
                        stats.missing_files += 1;
                    }
                    Err(e) => {
                        // Keep the entry so deletion is retried next run
                        warn!(item = %name, error = %e, "Failed to delete expired item, keeping entry");
                        retained.push(entry);
                    }
                }
            }
        }
    }

    stats.retained = retained.len();

    if stats.expired > 0 {
        ledger.rewrite(&retained)?;
        info!(
            expired = stats.expired,
            retained = stats.retained,
            "Retention sweep pruned ledger"
        );
    } else {
        debug!("Retention sweep found nothing to expire");
    }

    Ok(stats)
}
