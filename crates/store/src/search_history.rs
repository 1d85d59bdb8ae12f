//! Recently searched terms
//!
//! Terms are kept most-recent-first as a JSON array under a single key.

use crate::kv::KeyValueStore;
use crate::Result;

/// Key the term list is stored under
pub const SEARCH_HISTORY_KEY: &str = "searchHistory";

/// Number of distinct terms kept
pub const MAX_SEARCH_HISTORY: usize = 10;

/// Most-recent-first list of distinct search terms
#[derive(Debug)]
pub struct SearchHistory<S: KeyValueStore> {
    store: S,
    limit: usize,
}

impl<S: KeyValueStore> SearchHistory<S> {
    pub fn new(store: S) -> Self {
        Self::with_limit(store, MAX_SEARCH_HISTORY)
    }

    pub fn with_limit(store: S, limit: usize) -> Self {
        Self {
            store,
            limit: limit.max(1),
        }
    }

    /// Stored terms, most recent first. A corrupt value reads as empty.
    pub fn terms(&self) -> Result<Vec<String>> {
        let Some(raw) = self.store.get(SEARCH_HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(terms) => Ok(terms),
            Err(e) => {
                tracing::warn!("Discarding corrupt search history: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Move `term` to the front, dropping duplicates and the overflow.
    /// Returns the updated list.
    pub fn record(&mut self, term: &str) -> Result<Vec<String>> {
        let mut terms = self.terms()?;
        terms.retain(|t| t != term);
        terms.insert(0, term.to_string());
        terms.truncate(self.limit);

        self.store
            .set(SEARCH_HISTORY_KEY, &serde_json::to_string(&terms)?)?;
        Ok(terms)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(SEARCH_HISTORY_KEY)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_record_moves_term_to_front() {
        let mut history = SearchHistory::new(MemoryStore::new());
        history.record("cat").unwrap();
        history.record("dog").unwrap();
        let terms = history.record("cat").unwrap();

        assert_eq!(terms, vec!["cat", "dog"]);
    }

    #[test]
    fn test_keeps_ten_most_recent() {
        let mut history = SearchHistory::new(MemoryStore::new());
        for i in 0..15 {
            history.record(&format!("term{}", i)).unwrap();
        }

        let terms = history.terms().unwrap();
        assert_eq!(terms.len(), MAX_SEARCH_HISTORY);
        assert_eq!(terms[0], "term14");
        assert_eq!(terms[9], "term5");
    }

    #[test]
    fn test_corrupt_value_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(SEARCH_HISTORY_KEY, "{broken").unwrap();

        let mut history = SearchHistory::new(store);
        assert!(history.terms().unwrap().is_empty());
        assert_eq!(history.record("x").unwrap(), vec!["x"]);
    }

    #[test]
    fn test_stored_as_json_array() {
        let mut history = SearchHistory::new(MemoryStore::new());
        history.record("a").unwrap();
        history.record("b").unwrap();

        let raw = history.store().get(SEARCH_HISTORY_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"["b","a"]"#);
    }

    #[test]
    fn test_persists_through_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut history = SearchHistory::new(JsonFileStore::open(&path).unwrap());
        history.record("needle").unwrap();

        let reopened = SearchHistory::new(JsonFileStore::open(&path).unwrap());
        assert_eq!(reopened.terms().unwrap(), vec!["needle"]);
    }

    #[test]
    fn test_clear() {
        let mut history = SearchHistory::new(MemoryStore::new());
        history.record("a").unwrap();
        history.clear().unwrap();
        assert!(history.terms().unwrap().is_empty());
    }
}
