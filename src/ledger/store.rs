use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::debug;

use super::entry::LedgerEntry;
use super::error::Result;

/// Durable record of which items have been published and when
///
/// Entry creation belongs to the publish path (`append`); entry removal
/// belongs to the retention sweep (`rewrite`). No other writers exist.
pub trait LedgerStore: Send + Sync {
    /// Load all entries in persisted order. A missing ledger reads as empty.
    fn load(&self) -> Result<Vec<LedgerEntry>>;

    /// Durably append one well-formed entry (newline-terminated, append-only)
    fn append(&self, name: &str, date: NaiveDate) -> Result<()>;

    /// Atomically replace the full persisted contents
    fn rewrite(&self, entries: &[LedgerEntry]) -> Result<()>;

    /// True when any current entry records `name` as already published
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.load()?.iter().any(|entry| entry.records(name)))
    }
}

/// Plain-text file ledger, one entry per line
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl LedgerStore for FileLedger {
    fn load(&self) -> Result<Vec<LedgerEntry>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Ledger file missing, treating as empty");
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(LedgerEntry::parse)
            .collect())
    }

    fn append(&self, name: &str, date: NaiveDate) -> Result<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = LedgerEntry::published(name, date).render();
        writeln!(file, "{}", line)?;
        file.sync_all()?;
        debug!(item = name, "Appended ledger entry");
        Ok(())
    }

    fn rewrite(&self, entries: &[LedgerEntry]) -> Result<()> {
        self.ensure_parent()?;
        let mut contents = String::new();
        for entry in entries {
            contents.push_str(&entry.render());
            contents.push('\n');
        }

        // Write a sibling file and rename over the ledger so readers never
        // observe a torn rewrite
        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!(count = entries.len(), "Rewrote ledger");
        Ok(())
    }
}

/// In-memory ledger (used by tests)
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: Mutex<Vec<LedgerEntry>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedger {
    fn load(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn append(&self, name: &str, date: NaiveDate) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .push(LedgerEntry::published(name, date));
        Ok(())
    }

    fn rewrite(&self, entries: &[LedgerEntry]) -> Result<()> {
        *self.entries.lock().unwrap() = entries.to_vec();
        Ok(())
    }
}
