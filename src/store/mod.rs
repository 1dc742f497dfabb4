//! Item store: the drop directory of candidate media files

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Extensions recognized as publishable media (case-insensitive)
pub const MEDIA_EXTENSIONS: [&str; 3] = ["mp4", "mkv", "mov"];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item store unavailable: {}", .0.display())]
    Unavailable(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Read/delete access to the directory of candidate items
///
/// The store is read-only from the selector's perspective; only the
/// retention sweep deletes items.
pub trait ItemStore: Send + Sync {
    /// List candidate file names in lexicographic order, filtered to the
    /// media extension allow-list. Fails with `Unavailable` when the
    /// backing directory does not exist.
    fn list_candidates(&self) -> Result<Vec<String>>;

    /// Read an item's bytes for upload
    fn read(&self, name: &str) -> Result<Bytes>;

    /// Delete an item. Returns Ok(false) when the file was already gone.
    fn remove(&self, name: &str) -> Result<bool>;
}

/// True when the file name carries an allowed media extension
pub fn is_media_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| MEDIA_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Build the public URL for an item from the configured base URL.
/// An empty base yields just the encoded file name.
pub fn public_link(base_url: &str, name: &str) -> String {
    let encoded = urlencoding::encode(name);
    if base_url.is_empty() {
        return encoded.into_owned();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), encoded)
}

/// Directory-backed item store
#[derive(Debug, Clone)]
pub struct DirItemStore {
    dir: PathBuf,
}

impl DirItemStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ItemStore for DirItemStore {
    fn list_candidates(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Err(StoreError::Unavailable(self.dir.clone()));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Skip names that are not valid UTF-8; they cannot appear in the
            // line-oriented ledger anyway
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_media_name(&name) {
                names.push(name);
            }
        }

        names.sort();
        debug!(count = names.len(), "Listed store candidates");
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Bytes> {
        let data = fs::read(self.dir.join(name))?;
        Ok(Bytes::from(data))
    }

    fn remove(&self, name: &str) -> Result<bool> {
        match fs::remove_file(self.dir.join(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory item store (used by tests)
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str, data: &[u8]) {
        self.items
            .lock()
            .unwrap()
            .insert(name.to_string(), Bytes::copy_from_slice(data));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.lock().unwrap().contains_key(name)
    }
}

impl ItemStore for MemoryStore {
    fn list_candidates(&self) -> Result<Vec<String>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .keys()
            .filter(|name| is_media_name(name))
            .cloned()
            .collect())
    }

    fn read(&self, name: &str) -> Result<Bytes> {
        self.items.lock().unwrap().get(name).cloned().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                name.to_string(),
            ))
        })
    }

    fn remove(&self, name: &str) -> Result<bool> {
        Ok(self.items.lock().unwrap().remove(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_media_name() {
        assert!(is_media_name("a.mp4"));
        assert!(is_media_name("RAIN.MKV"));
        assert!(is_media_name("clip.Mov"));
        assert!(!is_media_name("notes.txt"));
        assert!(!is_media_name("noext"));
    }

    #[test]
    fn test_list_candidates_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.mp4", "a.mp4", "c.txt", "d.MKV"] {
            std::fs::write(temp_dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(temp_dir.path().join("sub.mp4")).unwrap();

        let store = DirItemStore::new(temp_dir.path());
        let names = store.list_candidates().unwrap();
        assert_eq!(names, vec!["a.mp4", "b.mp4", "d.MKV"]);
    }

    #[test]
    fn test_list_candidates_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirItemStore::new(temp_dir.path().join("nope"));
        assert!(matches!(
            store.list_candidates(),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn test_remove_tolerates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.mp4"), b"x").unwrap();

        let store = DirItemStore::new(temp_dir.path());
        assert!(store.remove("a.mp4").unwrap());
        assert!(!store.remove("a.mp4").unwrap());
    }

    #[test]
    fn test_read_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.mp4"), b"video bytes").unwrap();

        let store = DirItemStore::new(temp_dir.path());
        assert_eq!(store.read("a.mp4").unwrap(), Bytes::from_static(b"video bytes"));
    }

    #[test]
    fn test_public_link() {
        assert_eq!(
            public_link("https://cdn.example.com/media/", "late night.mp4"),
            "https://cdn.example.com/media/late%20night.mp4"
        );
        assert_eq!(public_link("", "a.mp4"), "a.mp4");
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.insert("b.mp4", b"bb");
        store.insert("a.mp4", b"aa");
        store.insert("skip.txt", b"no");

        assert_eq!(store.list_candidates().unwrap(), vec!["a.mp4", "b.mp4"]);
        assert!(store.remove("a.mp4").unwrap());
        assert!(!store.remove("a.mp4").unwrap());
    }
}
