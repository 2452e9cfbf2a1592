//! Player settings and preferences
//!
//! Persisted as one JSON object under `tap_rush_settings`.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, PlatformError, load_json, save_json};
use crate::sim::GameMode;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Feedback ===
    /// Sound effects on/off
    pub sound: bool,
    /// Vibration on/off
    pub vibration: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no screen shake)
    pub reduced_motion: bool,

    // === Selection ===
    /// Last selected mode, by name
    pub game_mode: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            vibration: true,

            master_volume: 0.8,
            sfx_volume: 1.0,

            reduced_motion: false,

            game_mode: GameMode::Classic.as_str().to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "tap_rush_settings";

    /// Selected mode; unknown names fall back to Classic
    pub fn mode(&self) -> GameMode {
        GameMode::from_str(&self.game_mode).unwrap_or_else(|| {
            log::warn!("Unknown game mode '{}', using classic", self.game_mode);
            GameMode::Classic
        })
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.game_mode = mode.as_str().to_string();
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        !self.reduced_motion
    }

    /// Clamp volumes into range after loading or editing
    pub fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }

    /// Load settings; `Ok(default)` when none are stored
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, PlatformError> {
        let mut settings = match load_json::<Settings>(store, Self::STORAGE_KEY)? {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.sanitize();
        Ok(settings)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), PlatformError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
