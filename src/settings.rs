//! Header settings and preferences
//!
//! Persisted in LocalStorage; the simulation itself is never saved.

use serde::{Deserialize, Serialize};

use crate::consts::TONE_PEAK_GAIN;

/// Visitor preferences for the header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence all tones (musicians still jump)
    pub muted: bool,

    // === Display ===
    /// Draw the "press 1-7" hint
    pub show_help: bool,
    /// Freeze star twinkle and skip the floating sparks/notes
    pub reduced_motion: bool,

    // === Ambient field ===
    /// Floating sparks behind the content
    pub ambient_sparks: usize,
    /// Floating music notes behind the content
    pub ambient_notes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
            show_help: true,
            reduced_motion: false,
            ambient_sparks: 25,
            ambient_notes: 8,
        }
    }
}

impl Settings {
    /// Upper bound on ambient particles of each kind
    pub const MAX_AMBIENT: usize = 200;

    /// Clamp anything a hand-edited store could have broken
    pub fn sanitize(mut self) -> Self {
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.ambient_sparks = self.ambient_sparks.min(Self::MAX_AMBIENT);
        self.ambient_notes = self.ambient_notes.min(Self::MAX_AMBIENT);
        self
    }

    /// Peak gain for a tone (0 when muted)
    pub fn tone_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            TONE_PEAK_GAIN * self.master_volume
        }
    }

    /// (sparks, notes) to actually spawn, respecting reduced motion
    pub fn effective_ambient_counts(&self) -> (usize, usize) {
        if self.reduced_motion {
            (0, 0)
        } else {
            (self.ambient_sparks, self.ambient_notes)
        }
    }

    /// Parse stored JSON, falling back to defaults for anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitize(),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sarau_header_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                saved(storage.set_item(Self::STORAGE_KEY, &json));
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No LocalStorage on native, using defaults ({})", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Log the outcome of a storage write; true when it landed
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn saved<E: std::fmt::Debug>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => {
            log::info!("Settings saved");
            true
        }
        Err(e) => {
            log::warn!("Failed to save settings: {:?}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.tone_gain(), TONE_PEAK_GAIN);
        assert_eq!(s.effective_ambient_counts(), (25, 8));
        assert!(s.show_help);
    }

    #[test]
    fn test_muted_gain_is_zero() {
        let s = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(s.tone_gain(), 0.0);
    }

    #[test]
    fn test_reduced_motion_hides_ambient() {
        let s = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(s.effective_ambient_counts(), (0, 0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"muted":true}"#);
        assert!(s.muted);
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.ambient_sparks, 25);
    }

    #[test]
    fn test_garbage_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_sanitize_clamps() {
        let s = Settings::from_json(r#"{"master_volume":4.0,"ambient_notes":100000}"#);
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.ambient_notes, Settings::MAX_AMBIENT);
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let s = Settings {
            master_volume: 0.25,
            reduced_motion: true,
            ..Settings::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json), s);
    }

    #[test]
    fn test_failed_write_is_not_reported_saved() {
        assert!(saved::<&str>(Ok(())));
        assert!(!saved(Err("QuotaExceededError")));
    }
}
