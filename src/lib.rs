//! Madness Arena - a top-down wave shooter
//!
//! Core modules:
//! - `sim`: Deterministic arena simulation (movement, AI, collisions, waves)
//! - `profile`: Persistent player resources carried between waves
//! - `catalog`: Static weapon and ally tables the simulation looks up by name
//! - `settings`: Persisted mod settings
//! - `renderer`: WebGPU render pass

pub mod catalog;
pub mod error;
pub mod profile;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use profile::PlayerResources;
pub use settings::ModSettings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Reference frame rate the per-frame speeds are tuned for
    pub const FRAME_RATE: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Arena dimensions (canvas pixels, origin top-left, y down)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 24.0;
    pub const PLAYER_ACCEL: f32 = 0.8;
    pub const PLAYER_MAX_SPEED: f32 = 8.0;
    pub const PLAYER_FRICTION: f32 = 0.85;
    /// Minimum time between player shots (ms)
    pub const PLAYER_FIRE_DELAY_MS: f64 = 200.0;
    pub const PLAYER_BULLET_SPEED: f32 = 12.0;
    pub const PLAYER_BULLET_DAMAGE: f32 = 20.0;
    pub const MELEE_DAMAGE: f32 = 25.0;
    /// Extra reach beyond touching distance for melee swings
    pub const MELEE_REACH: f32 = 10.0;

    /// Enemy base stats (before wave scaling)
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_HEALTH: f32 = 20.0;
    pub const ENEMY_DAMAGE: f32 = 10.0;
    pub const ENEMY_BULLET_SPEED: f32 = 8.0;

    /// Recruit (ally) tuning
    pub const RECRUIT_HALF_SIZE: f32 = 16.0;
    pub const RECRUIT_SPEED: f32 = 2.0;
    /// Recruits stop closing in once this near their target
    pub const RECRUIT_CLOSE_RANGE: f32 = 100.0;
    pub const RECRUIT_FIRE_RANGE: f32 = 300.0;
    pub const RECRUIT_FIRE_INTERVAL_MS: f64 = 800.0;
    pub const RECRUIT_BULLET_SPEED: f32 = 10.0;

    /// Rewards
    pub const KILL_REWARD: u64 = 50;
    pub const DAMAGE_REWARD: u64 = 10;
    pub const CLEAR_BONUS: u64 = 200;
    /// Delay between clearing a wave and opening the shop (ms)
    pub const SHOP_DELAY_MS: f32 = 1000.0;

    /// Distances below this are treated as "on top of" the target
    pub const MIN_STEER_DISTANCE: f32 = 1.0;
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > consts::MIN_STEER_DISTANCE {
        Some(delta / dist)
    } else {
        None
    }
}

/// Whether a point lies strictly inside the arena rectangle
#[inline]
pub fn inside_arena(pos: Vec2) -> bool {
    pos.x > 0.0 && pos.x < consts::ARENA_WIDTH && pos.y > 0.0 && pos.y < consts::ARENA_HEIGHT
}

/// Clamp a circle's center so it stays fully inside the arena
#[inline]
pub fn clamp_to_arena(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, consts::ARENA_WIDTH - radius),
        pos.y.clamp(radius, consts::ARENA_HEIGHT - radius),
    )
}
