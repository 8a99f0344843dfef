//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::Cue;

/// LocalStorage key for the serialized settings
pub const STORAGE_KEY: &str = "flappy_night_settings";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Flap cue volume (0.0 - 1.0)
    pub jump_volume: f32,
    /// Pillar passed cue volume (0.0 - 1.0)
    pub score_volume: f32,
    /// Crash cue volume (0.0 - 1.0)
    pub hit_volume: f32,
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no star twinkle, no glow)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            jump_volume: 0.6,
            score_volume: 0.6,
            hit_volume: 0.7,
            muted: false,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective playback volume for a cue (0 when muted)
    pub fn cue_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let cue_volume = match cue {
            Cue::Jump => self.jump_volume,
            Cue::Score => self.score_volume,
            Cue::Hit => self.hit_volume,
        };
        (self.master_volume * cue_volume).clamp(0.0, 1.0)
    }

    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Discarding unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Read preferences saved by an earlier session
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let saved = crate::persistence::local_storage()
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
        match saved {
            Some(json) => {
                log::info!("Loaded settings");
                Self::from_json_or_default(&json)
            }
            None => Self::default(),
        }
    }

    /// Persist preferences (best effort)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = crate::persistence::local_storage() else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save settings");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }

    /// Native builds always start from defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cue_volumes() {
        let settings = Settings::default();
        assert_eq!(settings.cue_volume(Cue::Jump), 0.6);
        assert_eq!(settings.cue_volume(Cue::Score), 0.6);
        assert_eq!(settings.cue_volume(Cue::Hit), 0.7);
    }

    #[test]
    fn test_muted_is_silent() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        for cue in Cue::ALL {
            assert_eq!(settings.cue_volume(cue), 0.0);
        }
    }

    #[test]
    fn test_master_volume_scales() {
        let settings = Settings {
            master_volume: 0.5,
            ..Settings::default()
        };
        assert!((settings.cue_volume(Cue::Hit) - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_and_garbage() {
        let settings = Settings::from_json_or_default(r#"{ "muted": true }"#);
        assert!(settings.muted);
        assert_eq!(settings.hit_volume, 0.7);
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }
}
