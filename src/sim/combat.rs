//! Damage resolution
//!
//! Armor only mitigates damage dealt *to enemies*. Hits the player and
//! recruits take from enemy bodies and bullets are applied raw.

use super::mods::ModPolicy;
use super::state::{Enemy, WaveTally};
use crate::consts::*;
use crate::profile::{Loadout, Wear};

/// Damage left after flat armor, never below 1
#[inline]
pub fn mitigated_damage(raw: f32, armor: f32) -> f32 {
    (raw - armor).max(1.0)
}

/// What a single hit did to an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Killed,
    Damaged,
}

/// Apply an armor-mitigated hit to `enemy`
pub fn hit_enemy(enemy: &mut Enemy, raw: f32) -> HitOutcome {
    enemy.health = (enemy.health - mitigated_damage(raw, enemy.armor)).max(0.0);
    if enemy.is_alive() {
        HitOutcome::Damaged
    } else {
        HitOutcome::Killed
    }
}

impl WaveTally {
    pub fn record(&mut self, outcome: HitOutcome) {
        match outcome {
            HitOutcome::Killed => self.kills += 1,
            HitOutcome::Damaged => self.damaged += 1,
        }
    }
}

/// Distance within which a melee swing connects with `enemy`
#[inline]
pub fn melee_range(enemy: &Enemy) -> f32 {
    PLAYER_RADIUS + enemy.radius() + MELEE_REACH
}

/// Swing at every enemy in reach of `origin`, then drop the dead.
///
/// Returns the number of enemies hit.
pub fn melee_strike(
    origin: glam::Vec2,
    enemies: &mut Vec<Enemy>,
    tally: &mut WaveTally,
    mods: &ModPolicy,
) -> usize {
    let raw = mods.outgoing_damage(MELEE_DAMAGE);
    let mut hits = 0;
    for enemy in enemies.iter_mut() {
        if enemy.pos.distance(origin) < melee_range(enemy) {
            tally.record(hit_enemy(enemy, raw));
            hits += 1;
        }
    }
    enemies.retain(Enemy::is_alive);
    hits
}

/// Spend durability for one use of the weapon in hand, honouring the
/// infinite-ammo override
pub fn wear_weapon(loadout: &mut Loadout, mods: &ModPolicy) -> Wear {
    if mods.wears_weapons() {
        loadout.wear_active()
    } else {
        Wear::None
    }
}

/// Subtract an incoming hit from a health pool, clamped at 0
#[inline]
pub fn take_damage(health: &mut f32, amount: f32) {
    *health = (*health - amount).max(0.0);
}
