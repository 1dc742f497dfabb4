//! Selector: pick the next unpublished candidate from the item store

use thiserror::Error;
use tracing::{debug, warn};

use crate::ledger::{LedgerError, LedgerStore};
use crate::store::{ItemStore, StoreError};

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Return the first candidate (in sorted order) not yet recorded in the
/// ledger, or `None` when the store is empty, unavailable, or fully covered.
///
/// Deterministic: the same store contents and ledger state always select
/// the same item.
pub fn select_next(
    store: &dyn ItemStore,
    ledger: &dyn LedgerStore,
) -> Result<Option<String>, SelectError> {
    let candidates = match store.list_candidates() {
        Ok(candidates) => candidates,
        Err(StoreError::Unavailable(path)) => {
            warn!(path = %path.display(), "Item store unavailable, nothing to select");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let entries = ledger.load()?;
    for candidate in candidates {
        if entries.iter().any(|entry| entry.records(&candidate)) {
            debug!(item = %candidate, "Skipping already-published candidate");
            continue;
        }
        return Ok(Some(candidate));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_ledger_selects_first_sorted() {
        let store = MemoryStore::new();
        store.insert("b.mp4", b"x");
        store.insert("a.mp4", b"x");
        let ledger = MemoryLedger::new();

        assert_eq!(
            select_next(&store, &ledger).unwrap(),
            Some("a.mp4".to_string())
        );
    }

    #[test]
    fn test_published_candidates_skipped() {
        let store = MemoryStore::new();
        store.insert("a.mp4", b"x");
        store.insert("b.mp4", b"x");
        let ledger = MemoryLedger::new();
        ledger.append("a.mp4", date("2024-01-01")).unwrap();

        assert_eq!(
            select_next(&store, &ledger).unwrap(),
            Some("b.mp4".to_string())
        );
    }

    #[test]
    fn test_full_coverage_yields_none() {
        let store = MemoryStore::new();
        store.insert("a.mp4", b"x");
        let ledger = MemoryLedger::new();
        ledger.append("a.mp4", date("2024-01-01")).unwrap();

        assert_eq!(select_next(&store, &ledger).unwrap(), None);
    }

    #[test]
    fn test_empty_store_yields_none() {
        let store = MemoryStore::new();
        let ledger = MemoryLedger::new();
        assert_eq!(select_next(&store, &ledger).unwrap(), None);
    }

    #[test]
    fn test_unavailable_store_yields_none() {
        let store = crate::store::DirItemStore::new("/definitely/not/here");
        let ledger = MemoryLedger::new();
        assert_eq!(select_next(&store, &ledger).unwrap(), None);
    }

    #[test]
    fn test_substring_name_is_not_a_false_positive() {
        let store = MemoryStore::new();
        store.insert("a.mp4", b"x");
        let ledger = MemoryLedger::new();
        ledger.append("extra.mp4", date("2024-01-01")).unwrap();

        assert_eq!(
            select_next(&store, &ledger).unwrap(),
            Some("a.mp4".to_string())
        );
    }

    #[test]
    fn test_legacy_line_counts_as_published() {
        let store = MemoryStore::new();
        store.insert("a.mp4", b"x");
        store.insert("b.mp4", b"x");
        let ledger = MemoryLedger::new();
        ledger
            .rewrite(&[crate::ledger::LedgerEntry::Legacy("a.mp4".to_string())])
            .unwrap();

        assert_eq!(
            select_next(&store, &ledger).unwrap(),
            Some("b.mp4".to_string())
        );
    }

    #[test]
    fn test_deterministic() {
        let store = MemoryStore::new();
        store.insert("c.mp4", b"x");
        store.insert("a.mp4", b"x");
        store.insert("b.mp4", b"x");
        let ledger = MemoryLedger::new();
        ledger.append("a.mp4", date("2024-01-01")).unwrap();

        let first = select_next(&store, &ledger).unwrap();
        let second = select_next(&store, &ledger).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Some("b.mp4".to_string()));
    }
}
