//! Player preferences
//!
//! Persisted separately from results in LocalStorage.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Behaviour ===
    /// Pause the session when the tab is hidden
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "word_sort_settings";

    /// Parse stored settings, falling back to defaults on garbage
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                log::warn!("Ignoring stored settings: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".into())
    }

    /// Volumes forced into 0.0 - 1.0, NaN treated as silence
    pub fn clamped(mut self) -> Self {
        for volume in [
            &mut self.master_volume,
            &mut self.sfx_volume,
            &mut self.music_volume,
        ] {
            *volume = if volume.is_nan() {
                0.0
            } else {
                volume.clamp(0.0, 1.0)
            };
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::storage::get(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if crate::platform::storage::set(Self::STORAGE_KEY, &json).is_ok() {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {e}"),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"muted": true}"#);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.pause_on_blur);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let settings =
            Settings::from_json(r#"{"master_volume": 3.0, "sfx_volume": -1.0, "music_volume": 0.5}"#);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.music_volume, 0.5);
    }

    #[test]
    fn test_json_round_trip_through_host() {
        let settings = Settings {
            music_volume: 0.2,
            pause_on_blur: false,
            ..Settings::default()
        };
        assert_eq!(Settings::from_json(&settings.to_json()), settings);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let settings = Settings::from_json(r#"{"reduced_motion": true, "muted": true}"#);
        assert!(settings.muted);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(Settings::from_json("{{"), Settings::default());
    }
}
