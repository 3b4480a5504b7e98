//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod combat;
pub mod mods;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod wave;

pub use combat::{HitOutcome, mitigated_damage};
pub use mods::{ModPolicy, Power};
pub use spawn::{FINAL_WAVE, is_boss_wave, spawn_wave};
pub use state::{
    ArenaPlayer, Bullet, Enemy, EnemyKind, Faction, GameEvent, GameState, Recruit, WavePhase,
    WaveTally,
};
pub use tick::{TickInput, tick};
pub use wave::{WaveHooks, dispatch, jump_to_wave, start_wave};
