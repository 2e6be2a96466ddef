//! Game settings
//!
//! Loaded from LocalStorage in the browser, or from a JSON file named by
//! `JUST_JUMP_SETTINGS` natively. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lives at the start of every level
    pub starting_lives: u8,
    /// Largest frame delta fed to the simulation (ms)
    pub max_frame_step_ms: f64,
    /// How long a finished level keeps animating (s)
    pub end_grace_secs: f32,
    /// Seed for coin phases; picked at startup when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            max_frame_step_ms: MAX_FRAME_STEP_MS,
            end_grace_secs: END_GRACE_SECS,
            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable naming a native settings file
    pub const ENV_VAR: &'static str = "JUST_JUMP_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Pull out-of-range values back to something playable
    pub fn sanitized(mut self) -> Self {
        self.starting_lives = self.starting_lives.max(1);
        if !(self.max_frame_step_ms.is_finite() && self.max_frame_step_ms > 0.0) {
            self.max_frame_step_ms = MAX_FRAME_STEP_MS;
        }
        if !(self.end_grace_secs.is_finite() && self.end_grace_secs >= 0.0) {
            self.end_grace_secs = END_GRACE_SECS;
        }
        self
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "just_jump_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `JUST_JUMP_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}
