//! Mod/cheat override policy
//!
//! The simulation never checks mod flags directly. It asks this policy at a
//! handful of fixed points: damage taken, damage dealt, durability loss,
//! player speed, enemy time scale and player contact.

use serde::{Deserialize, Serialize};

/// Damage dealt by every player hit while `one_shot_kill` is on
pub const ONE_SHOT_DAMAGE: f32 = 999_999.0;
/// Player speed factor while `super_speed` is on
pub const SUPER_SPEED_FACTOR: f32 = 5.0;
/// Enemy time scale while `freeze_time` is on
pub const FREEZE_TIME_SCALE: f32 = 0.25;

/// Toggleable powers that have an override point in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Power {
    Invincibility,
    InfiniteAmmo,
    SuperSpeed,
    OneShotKill,
    GhostMode,
    FreezeTime,
}

impl Power {
    pub const ALL: [Power; 6] = [
        Power::Invincibility,
        Power::InfiniteAmmo,
        Power::SuperSpeed,
        Power::OneShotKill,
        Power::GhostMode,
        Power::FreezeTime,
    ];

    /// Settings id of this power
    pub fn id(&self) -> &'static str {
        match self {
            Power::Invincibility => "invincibility",
            Power::InfiniteAmmo => "infinite_ammo",
            Power::SuperSpeed => "super_speed",
            Power::OneShotKill => "one_shot_kill",
            Power::GhostMode => "ghost_mode",
            Power::FreezeTime => "freeze_time",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

/// Resolved overrides queried by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModPolicy {
    pub health_multiplier: f32,
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
    pub invincible: bool,
    pub infinite_ammo: bool,
    pub super_speed: bool,
    pub one_shot_kill: bool,
    pub ghost_mode: bool,
    pub freeze_time: bool,
}

impl Default for ModPolicy {
    fn default() -> Self {
        Self {
            health_multiplier: 1.0,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            invincible: false,
            infinite_ammo: false,
            super_speed: false,
            one_shot_kill: false,
            ghost_mode: false,
            freeze_time: false,
        }
    }
}

impl ModPolicy {
    /// Turn a single power on
    pub fn enable(&mut self, power: Power) {
        match power {
            Power::Invincibility => self.invincible = true,
            Power::InfiniteAmmo => self.infinite_ammo = true,
            Power::SuperSpeed => self.super_speed = true,
            Power::OneShotKill => self.one_shot_kill = true,
            Power::GhostMode => self.ghost_mode = true,
            Power::FreezeTime => self.freeze_time = true,
        }
    }

    pub fn with_powers(powers: impl IntoIterator<Item = Power>) -> Self {
        let mut policy = Self::default();
        for power in powers {
            policy.enable(power);
        }
        policy
    }

    /// Damage the player actually takes from a raw hit
    pub fn damage_taken(&self, raw: f32) -> f32 {
        if self.invincible { 0.0 } else { raw }
    }

    /// Raw damage of a player hit before target armor
    pub fn outgoing_damage(&self, base: f32) -> f32 {
        if self.one_shot_kill {
            ONE_SHOT_DAMAGE
        } else {
            base * self.damage_multiplier
        }
    }

    /// Whether using a weapon costs durability
    pub fn wears_weapons(&self) -> bool {
        !self.infinite_ammo
    }

    /// Factor applied to the player's per-frame displacement
    pub fn player_speed_factor(&self) -> f32 {
        let boost = if self.super_speed { SUPER_SPEED_FACTOR } else { 1.0 };
        self.speed_multiplier * boost
    }

    /// Factor applied to enemy movement
    pub fn enemy_time_scale(&self) -> f32 {
        if self.freeze_time { FREEZE_TIME_SCALE } else { 1.0 }
    }

    /// Whether enemy bodies can touch the player
    pub fn player_contact(&self) -> bool {
        !self.ghost_mode
    }

    pub fn max_health(&self, base: f32) -> f32 {
        base * self.health_multiplier
    }
}
