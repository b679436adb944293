pub mod file;
pub mod memory;
pub mod traits;

use std::sync::Arc;

use crate::models::HistoryEntry;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

/// Storage key the whole collection is written under.
pub const HISTORY_KEY: &str = "logo_history";

/// Append-only, most-recent-first list of past generations.
///
/// Every mutation rewrites the full collection. There is no merge between
/// writers: two sessions appending at once is last-write-wins.
#[derive(Clone)]
pub struct HistoryStore {
    backend: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Never fails: a missing, empty or undecodable payload reads as an
    /// empty history.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.backend.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read generation history: {}", e);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Discarding unreadable generation history: {}", e);
                Vec::new()
            }
        }
    }

    /// Prepend `entry` and write the whole collection back. Returns the
    /// collection as it now stands.
    pub fn append(&self, entry: HistoryEntry) -> Vec<HistoryEntry> {
        let mut entries = self.load();
        entries.insert(0, entry);
        self.persist(&entries);
        entries
    }

    /// Best-effort full rewrite. Failures are logged and dropped.
    pub fn persist(&self, entries: &[HistoryEntry]) {
        let payload = match serde_json::to_string(entries) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Could not serialize generation history: {}", e);
                return;
            }
        };

        if let Err(e) = self.backend.set(HISTORY_KEY, &payload) {
            log::warn!("Could not save generation history: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(HISTORY_KEY) {
            log::warn!("Could not clear generation history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LogoGenError, Result};

    fn entry(url: &str) -> HistoryEntry {
        HistoryEntry {
            url: url.to_string(),
            prompt: format!("prompt for {}", url),
            style: Some("Modern".into()),
            palette: Some("Vibrant".into()),
            aspect_ratio: Some("1:1".into()),
            created_at: "2024-05-01 10:00:00".into(),
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(LogoGenError::Persistence("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(LogoGenError::Persistence("read only".into()))
        }
    }

    #[test]
    fn test_empty_store_loads_empty() {
        assert!(HistoryStore::in_memory().load().is_empty());
    }

    #[test]
    fn test_corrupted_payload_loads_empty() {
        let backend = Arc::new(MemoryStore::new());
        let store = HistoryStore::new(backend.clone());

        for payload in ["{not json", "", "   ", "{\"url\":\"x\"}", "[{\"url\":1}]"] {
            backend.set(HISTORY_KEY, payload).unwrap();
            assert!(store.load().is_empty(), "payload {:?} should load empty", payload);
        }
    }

    #[test]
    fn test_append_is_most_recent_first() {
        let store = HistoryStore::in_memory();
        store.append(entry("https://x/1.png"));
        store.append(entry("https://x/2.png"));

        let loaded = store.load();
        assert_eq!(loaded, vec![entry("https://x/2.png"), entry("https://x/1.png")]);
    }

    #[test]
    fn test_append_after_corruption_starts_fresh() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(HISTORY_KEY, "garbage").unwrap();

        let store = HistoryStore::new(backend);
        let entries = store.append(entry("https://x/1.png"));
        assert_eq!(entries.len(), 1);
        assert_eq!(store.load(), entries);
    }

    #[test]
    fn test_persist_is_idempotent() {
        let backend = Arc::new(MemoryStore::new());
        let store = HistoryStore::new(backend.clone());
        let entries = vec![entry("https://x/1.png")];

        store.persist(&entries);
        let first = backend.get(HISTORY_KEY).unwrap();
        store.persist(&entries);
        assert_eq!(backend.get(HISTORY_KEY).unwrap(), first);
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let store = HistoryStore::new(Arc::new(ReadOnlyStore));
        let entries = store.append(entry("https://x/1.png"));
        assert_eq!(entries.len(), 1);
        assert!(store.load().is_empty());
        store.clear();
    }

    #[test]
    fn test_clear_empties_history() {
        let store = HistoryStore::in_memory();
        store.append(entry("https://x/1.png"));
        store.clear();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_backed_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        HistoryStore::new(Arc::new(FileStore::new(dir.path()))).append(entry("https://x/1.png"));

        let reopened = HistoryStore::new(Arc::new(FileStore::new(dir.path())));
        assert_eq!(reopened.load(), vec![entry("https://x/1.png")]);
    }
}
