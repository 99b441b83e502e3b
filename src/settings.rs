//! Player preferences
//!
//! Persisted in LocalStorage on the web build; read from `settings.json`
//! in the working directory on native. Separate from `Tuning`, which changes how
//! the game plays.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show FPS counter
    pub show_fps: bool,
    /// Outline every collision box
    pub show_hitboxes: bool,
    /// Skip explosion effects
    pub reduced_motion: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: true,
            show_hitboxes: false,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// LocalStorage key / native file name
    const STORAGE_KEY: &'static str = "asteroid_belt_settings";
    #[cfg(not(target_arch = "wasm32"))]
    const FILE_NAME: &'static str = "settings.json";

    /// Whether explosions should be drawn
    pub fn effective_explosions(&self) -> bool {
        !self.reduced_motion
    }

    /// Parse settings, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring bad {}: {}", Self::STORAGE_KEY, err);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
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
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from `settings.json` in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(std::path::Path::new(Self::FILE_NAME))
    }

    /// Settings from a file, or defaults if it is missing or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json_or_default(r#"{ "show_hitboxes": true }"#);
        assert!(settings.show_hitboxes);
        assert!(settings.show_fps);
        assert!(!settings.reduced_motion);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(Settings::from_json_or_default("nope"), Settings::default());
    }

    #[test]
    fn test_reduced_motion_hides_explosions() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_explosions());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_file_is_read() {
        let name = format!("asteroid_belt_settings_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, r#"{ "high_contrast": true, "show_fps": false }"#).unwrap();
        let settings = Settings::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(settings.high_contrast);
        assert!(!settings.show_fps);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("asteroid_belt_settings_missing.json");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
