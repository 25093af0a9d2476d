//! Game settings and preferences
//!
//! A small JSON blob kept in the platform key-value store, separate from the
//! simulation. Missing or unknown fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    pub sound_enabled: bool,
    /// Show FPS counter while playing
    #[serde(rename = "showFPS")]
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            sound_enabled: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "simpleDodgeSettings";

    /// Set volume, clamped to [0, 1]; non-finite input leaves it unchanged
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_finite() {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }

    /// Volume actually applied to sounds
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled { self.volume } else { 0.0 }
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.volume = settings.volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load from `store`, falling back to defaults on any problem
    pub fn load_from(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Could not parse settings, using defaults: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not load settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.volume, 0.7);
        assert!(settings.sound_enabled);
        assert!(!settings.show_fps);
    }

    #[test]
    fn test_partial_blob_merges_with_defaults() {
        let settings = Settings::from_json(r#"{"showFPS": true, "theme": "dark"}"#).unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.volume, 0.7);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_out_of_range_volume_is_clamped() {
        let settings = Settings::from_json(r#"{"volume": 3.5}"#).unwrap();
        assert_eq!(settings.volume, 1.0);
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.set_volume(0.25);
        settings.sound_enabled = false;
        settings.save_to(&mut store).unwrap();

        let loaded = Settings::load_from(&store);
        assert_eq!(loaded, settings);
        assert_eq!(loaded.effective_volume(), 0.0);
    }

    #[test]
    fn test_loads_blob_saved_by_browser_build() {
        let mut store = MemoryStore::new();
        store
            .set(
                "simpleDodgeSettings",
                r#"{"volume":0.4,"soundEnabled":false,"showFPS":true}"#,
            )
            .unwrap();

        let loaded = Settings::load_from(&store);
        assert_eq!(loaded.volume, 0.4);
        assert!(!loaded.sound_enabled);
        assert!(loaded.show_fps);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "not json").unwrap();
        assert_eq!(Settings::load_from(&store), Settings::default());
    }
}
