//! Mod menu settings
//!
//! Persisted in LocalStorage on the web; natively every run starts from the
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::mods::{ModPolicy, Power};

/// Mod menu state as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModSettings {
    /// Multiplier on the player's max health
    pub health_multiplier: f32,
    /// Multiplier on damage the player deals
    pub damage_multiplier: f32,
    /// Multiplier on player movement
    pub speed_multiplier: f32,
    /// Enabled power ids (e.g. `"invincibility"`)
    #[serde(default)]
    pub active_powers: Vec<String>,
}

impl Default for ModSettings {
    fn default() -> Self {
        Self {
            health_multiplier: 1.0,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            active_powers: Vec::new(),
        }
    }
}

impl ModSettings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "madness_mods";

    pub fn is_active(&self, power: Power) -> bool {
        self.active_powers.iter().any(|id| id == power.id())
    }

    /// Flip a power on or off
    pub fn toggle(&mut self, power: Power) {
        if self.is_active(power) {
            self.active_powers.retain(|id| id != power.id());
        } else {
            self.active_powers.push(power.id().to_string());
        }
    }

    /// Resolve into the policy the simulation consults
    pub fn to_policy(&self) -> ModPolicy {
        let mut policy = ModPolicy {
            health_multiplier: self.health_multiplier,
            damage_multiplier: self.damage_multiplier,
            speed_multiplier: self.speed_multiplier,
            ..Default::default()
        };
        for id in &self.active_powers {
            match Power::from_id(id) {
                Some(power) => policy.enable(power),
                None => log::warn!("Ignoring unsupported mod power {id}"),
            }
        }
        policy
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded mod settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Discarding stored mod settings: {e}"),
            }
        }

        log::info!("Using default mod settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Mod settings saved");
                }
                Err(e) => log::warn!("Could not save mod settings: {e}"),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} store natively, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
