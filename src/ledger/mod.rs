/// Publication ledger: durable record of what has been published and when
///
/// The ledger is a plain-text file with one entry per line in the form
/// `identifier | YYYY-MM-DD`. It is deliberately append-friendly:
///
/// - The publish path appends one newline-terminated line per confirmed
///   publish (`LedgerStore::append`).
/// - The retention sweep is the only writer that removes entries, and it
///   replaces the whole file atomically (`LedgerStore::rewrite`).
///
/// Lines without a separator (or with an unparseable date) come from older
/// history files. They are preserved verbatim, never expire, and still count
/// as "already published" so reruns never re-send old items.
///
/// Concurrency: at most one invocation runs at a time (external scheduling
/// responsibility). The atomic rewrite guards against torn files, not
/// against concurrent runs.
///
/// ## Usage
///
/// ```rust,ignore
/// use dropcast::ledger::{FileLedger, LedgerStore};
///
/// let ledger = FileLedger::new("data/sent_history.txt");
/// ledger.append("a.mp4", today)?;
/// let sent = ledger.contains("a.mp4")?;
/// ```
pub mod entry;
pub mod error;
pub mod retention;
pub mod store;

pub use entry::LedgerEntry;
pub use error::{LedgerError, Result};
pub use retention::{SweepStats, enforce};
pub use store::{FileLedger, LedgerStore, MemoryLedger};
