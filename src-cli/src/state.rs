//! Application state: data directory, settings and search history

use anyhow::Result;
use edit_engine::{HistoryStore, SearchSession};
use std::path::{Path, PathBuf};
use store::{AppSettings, JsonFileStore, SearchHistory, SettingsManager};

/// File holding small key-value state such as the search history
pub const STATE_FILE: &str = "state.json";

/// Resolve the data directory: explicit flag/env first, then the platform
/// data directory, then the working directory
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| dirs::data_dir().map(|d| d.join("text-search")))
        .unwrap_or_else(|| PathBuf::from(".text-search"))
}

pub struct AppState {
    pub settings: SettingsManager,
    pub history: SearchHistory<JsonFileStore>,
}

impl AppState {
    /// Load settings and history from `data_dir`
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        tracing::debug!("Data directory: {:?}", data_dir);

        let mut settings = SettingsManager::new(data_dir);
        if let Err(e) = settings.load_sync() {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
        }

        let store = JsonFileStore::open(data_dir.join(STATE_FILE))?;
        let history = SearchHistory::with_limit(store, settings.get().general.recent_searches_count);

        Ok(Self { settings, history })
    }

    pub fn config(&self) -> &AppSettings {
        self.settings.get()
    }

    /// New session over `text` with the configured history depth
    pub fn session(&self, text: impl Into<String>) -> SearchSession {
        let editing = &self.config().editing;
        SearchSession::with_limits(
            text,
            HistoryStore::with_capacity(editing.history_depth),
            editing.snapshot_debounce(),
        )
    }

    /// Remember a searched term; failures only log
    pub fn remember_term(&mut self, term: &str) {
        if let Err(e) = self.history.record(term) {
            tracing::warn!("Failed to save search history: {}", e);
        }
    }
}
