//! Application settings management
//!
//! Settings are persisted as pretty-printed JSON in the app data
//! directory. A missing or unreadable file yields defaults.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the settings document inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Main application settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// General application settings
    pub general: GeneralSettings,
    /// Default search options
    pub search: SearchSettings,
    /// Buffer editing settings
    pub editing: EditingSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    /// Colour theme
    pub theme: Theme,
    /// Number of recent search terms to keep
    pub recent_searches_count: usize,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            recent_searches_count: 10,
        }
    }
}

/// Default search options and input timing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub case_sensitive: bool,
    pub regex_enabled: bool,
    pub whole_word: bool,
    /// Token distance for proximity search
    pub proximity_distance: usize,
    /// Search-as-you-type debounce window in milliseconds
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            regex_enabled: false,
            whole_word: false,
            proximity_distance: 5,
            debounce_ms: 300,
        }
    }
}

impl SearchSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Undo history settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditingSettings {
    /// Number of undo snapshots kept
    pub history_depth: usize,
    /// Pause after typing before an edit is snapshotted, in milliseconds
    pub snapshot_debounce_ms: u64,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            history_depth: 20,
            snapshot_debounce_ms: 500,
        }
    }
}

impl EditingSettings {
    pub fn snapshot_debounce(&self) -> Duration {
        Duration::from_millis(self.snapshot_debounce_ms)
    }
}

/// Application theme
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Blue,
}

impl Theme {
    /// The theme a toggle switches to
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark | Theme::Blue => Theme::Light,
        }
    }
}

/// Settings manager for loading, saving, and updating application settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: AppSettings,
}

impl SettingsManager {
    /// Create a new settings manager with the given app data directory
    pub fn new(app_data_dir: impl AsRef<Path>) -> Self {
        Self {
            settings_path: app_data_dir.as_ref().join(SETTINGS_FILE),
            current: AppSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&AppSettings> {
        self.current = if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            parse_or_default(&content)
        } else {
            AppSettings::default()
        };
        Ok(&self.current)
    }

    /// Load settings synchronously (for use during startup)
    pub fn load_sync(&mut self) -> Result<&AppSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            parse_or_default(&content)
        } else {
            AppSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    /// Save settings synchronously
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub async fn update(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    /// Update settings synchronously
    pub fn update_sync(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub fn reset_sync(&mut self) -> Result<&AppSettings> {
        self.current = AppSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}

fn parse_or_default(content: &str) -> AppSettings {
    serde_json::from_str(content).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse settings file, using defaults: {}", e);
        AppSettings::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();

        assert_eq!(settings.general.theme, Theme::Light);
        assert_eq!(settings.general.recent_searches_count, 10);
        assert_eq!(settings.search.proximity_distance, 5);
        assert_eq!(settings.search.debounce(), Duration::from_millis(300));
        assert_eq!(settings.editing.history_depth, 20);
        assert_eq!(settings.editing.snapshot_debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: AppSettings =
            serde_json::from_str(r#"{"search": {"whole_word": true}}"#).unwrap();
        assert!(parsed.search.whole_word);
        assert_eq!(parsed.search.debounce_ms, 300);
        assert_eq!(parsed.editing, EditingSettings::default());
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Blue).unwrap(), "\"blue\"");
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Blue.toggled(), Theme::Light);
    }

    #[test]
    fn test_settings_manager_load_save_sync() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());

        let settings = manager.load_sync().unwrap();
        assert_eq!(settings, &AppSettings::default());

        let mut new_settings = AppSettings::default();
        new_settings.general.theme = Theme::Dark;
        new_settings.search.case_sensitive = true;
        manager.update_sync(new_settings).unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path());
        let loaded = manager2.load_sync().unwrap();
        assert_eq!(loaded.general.theme, Theme::Dark);
        assert!(loaded.search.case_sensitive);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE), "{ not json").unwrap();

        let mut manager = SettingsManager::new(temp_dir.path());
        assert_eq!(manager.load_sync().unwrap(), &AppSettings::default());
    }

    #[test]
    fn test_settings_manager_reset_sync() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());

        let mut new_settings = AppSettings::default();
        new_settings.editing.history_depth = 5;
        manager.update_sync(new_settings).unwrap();

        let settings = manager.reset_sync().unwrap();
        assert_eq!(settings.editing.history_depth, 20);
    }

    #[tokio::test]
    async fn test_settings_manager_async() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());
        manager.load().await.unwrap();

        let mut new_settings = AppSettings::default();
        new_settings.search.proximity_distance = 8;
        manager.update(new_settings).await.unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path());
        let loaded = manager2.load().await.unwrap();
        assert_eq!(loaded.search.proximity_distance, 8);
    }
}
