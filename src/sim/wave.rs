//! Wave lifecycle and rewards
//!
//! `Idle -> Active -> Cleared -> Idle` on success, `Active -> Failed` on
//! death. Persistent resources are only written at those transitions.

use std::f32::consts::TAU;

use glam::Vec2;

use super::spawn::{self, FINAL_WAVE};
use super::state::{ArenaPlayer, GameEvent, GameState, Recruit, WavePhase, WaveTally};
use crate::catalog;
use crate::clamp_to_arena;
use crate::consts::*;
use crate::error::{Error, Result};

/// Distance from the player at which recruits enter the arena
const RECRUIT_SPAWN_OFFSET: f32 = 60.0;

/// Host-side reactions to wave transitions
pub trait WaveHooks {
    fn on_game_over(&mut self, wave: u32, reward: u64);
    fn on_open_shop(&mut self, next_wave: u32, reward: u64);
    fn on_final_boss_defeated(&mut self) {}
}

/// Clear reward multiplier: 10 for the final boss, 3 for other boss waves
pub fn reward_multiplier(wave: u32) -> u64 {
    if wave == FINAL_WAVE {
        10
    } else if spawn::is_boss_wave(wave) {
        3
    } else {
        1
    }
}

fn combat_reward(tally: &WaveTally) -> u64 {
    tally.kills as u64 * KILL_REWARD + tally.damaged as u64 * DAMAGE_REWARD
}

/// Coins for clearing `wave`
pub fn clear_reward(tally: &WaveTally, wave: u32) -> u64 {
    (combat_reward(tally) + CLEAR_BONUS) * reward_multiplier(wave)
}

/// Coins credited when the player dies (no bonus)
pub fn failure_reward(tally: &WaveTally) -> u64 {
    combat_reward(tally)
}

/// Spawn the current wave and start simulating it
pub fn start_wave(state: &mut GameState) -> Result<()> {
    if !matches!(state.phase, WavePhase::Idle | WavePhase::Failed { .. }) {
        return Err(Error::WaveInProgress);
    }
    let wave = state.wave;

    state.enemies = spawn::spawn_wave(wave, &mut state.rng, &mut state.next_id);
    state.player = ArenaPlayer::new(&state.resources, &state.mods);
    state.recruits.clear();
    state.bullets.clear();
    state.tally = WaveTally::default();
    spawn_recruits(state);

    state.phase = WavePhase::Active;
    state.events.push(GameEvent::WaveStarted { wave });
    log::info!(
        "Wave {} started: {} enemies, {} recruits",
        wave,
        state.enemies.len(),
        state.recruits.len()
    );
    Ok(())
}

/// One recruit per owned ally, fresh from the catalog, in a ring around the player
fn spawn_recruits(state: &mut GameState) {
    let allies = state.resources.allies.clone();
    let count = allies.len().max(1) as f32;
    for (i, name) in allies.iter().enumerate() {
        let Some(spec) = catalog::ally(name) else {
            log::warn!("Unknown ally {name}, skipping");
            continue;
        };
        let angle = i as f32 * TAU / count;
        let pos = clamp_to_arena(
            state.player.pos + Vec2::from_angle(angle) * RECRUIT_SPAWN_OFFSET,
            RECRUIT_HALF_SIZE,
        );
        let id = state.next_entity_id();
        state.recruits.push(Recruit {
            id,
            name: spec.name.to_string(),
            pos,
            health: spec.health,
            max_health: spec.health,
            damage: spec.damage,
            speed: RECRUIT_SPEED,
            weapon: spec.weapon.map(str::to_string),
            last_shot_ms: None,
            target: None,
        });
    }
}

/// Every enemy is dead: lock in the reward and start the shop countdown
pub fn clear_wave(state: &mut GameState) {
    let reward = clear_reward(&state.tally, state.wave);
    state.bullets.clear();
    state.phase = WavePhase::Cleared {
        reward,
        shop_in_ms: SHOP_DELAY_MS,
    };
    log::info!(
        "Wave {} cleared: {} kills, {} damaged, reward {}",
        state.wave,
        state.tally.kills,
        state.tally.damaged,
        reward
    );
}

/// Count down the post-clear delay; hand over to the shop when it runs out
pub(crate) fn advance_cleared(state: &mut GameState, dt: f32) {
    let WavePhase::Cleared { reward, shop_in_ms } = state.phase else {
        return;
    };
    let remaining = shop_in_ms - dt * 1000.0;
    if remaining > 0.0 {
        state.phase = WavePhase::Cleared {
            reward,
            shop_in_ms: remaining,
        };
        return;
    }

    let cleared = state.wave;
    let resources = &mut state.resources;
    resources.coins += reward;
    resources.loadout = state.player.loadout.clone();
    resources.health = resources.max_health;

    state.wave += 1;
    state.recruits.clear();
    state.player.health = state.player.max_health;
    state.phase = WavePhase::Idle;
    state.events.push(GameEvent::OpenShop {
        next_wave: state.wave,
        reward,
    });
    if cleared == FINAL_WAVE {
        state.final_boss_defeated = true;
        state.events.push(GameEvent::FinalBossDefeated);
        log::info!("Final boss defeated");
    }
}

/// The player died: credit what was earned, reset the run to wave 1
pub fn fail_wave(state: &mut GameState) {
    let reward = failure_reward(&state.tally);
    let wave = state.wave;

    let resources = &mut state.resources;
    resources.coins += reward;
    resources.loadout = state.player.loadout.clone();
    resources.health = resources.max_health;

    state.wave = 1;
    state.enemies.clear();
    state.recruits.clear();
    state.bullets.clear();
    state.phase = WavePhase::Failed { reward };
    state.events.push(GameEvent::GameOver { wave, reward });
    log::info!(
        "Died on wave {}: {} kills, {} damaged, reward {}",
        wave,
        state.tally.kills,
        state.tally.damaged,
        reward
    );
}

/// Set the next wave to play (mod menu)
pub fn jump_to_wave(state: &mut GameState, wave: u32) -> Result<()> {
    if wave == 0 {
        return Err(Error::InvalidWave(wave));
    }
    if matches!(state.phase, WavePhase::Active | WavePhase::Cleared { .. }) {
        return Err(Error::WaveInProgress);
    }
    state.wave = wave;
    state.phase = WavePhase::Idle;
    Ok(())
}

/// Drain pending events into `hooks`
pub fn dispatch(state: &mut GameState, hooks: &mut impl WaveHooks) {
    for event in state.events.drain(..) {
        match event {
            GameEvent::GameOver { wave, reward } => hooks.on_game_over(wave, reward),
            GameEvent::OpenShop { next_wave, reward } => hooks.on_open_shop(next_wave, reward),
            GameEvent::FinalBossDefeated => hooks.on_final_boss_defeated(),
            GameEvent::WaveStarted { .. } | GameEvent::WeaponBroke { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};

    #[derive(Default)]
    struct Recorder {
        game_over: Vec<(u32, u64)>,
        shop: Vec<(u32, u64)>,
        final_boss: bool,
    }

    impl WaveHooks for Recorder {
        fn on_game_over(&mut self, wave: u32, reward: u64) {
            self.game_over.push((wave, reward));
        }

        fn on_open_shop(&mut self, next_wave: u32, reward: u64) {
            self.shop.push((next_wave, reward));
        }

        fn on_final_boss_defeated(&mut self) {
            self.final_boss = true;
        }
    }

    #[test]
    fn test_reward_multipliers() {
        let tally = WaveTally { kills: 2, damaged: 3 };
        assert_eq!(clear_reward(&tally, 1), 330);
        assert_eq!(clear_reward(&tally, 12), 990);
        assert_eq!(clear_reward(&tally, 24), 990);
        assert_eq!(clear_reward(&tally, FINAL_WAVE), 3300);
        assert_eq!(failure_reward(&tally), 130);
    }

    #[test]
    fn test_start_wave_only_when_idle() {
        let mut state = GameState::new(3);
        start_wave(&mut state).unwrap();
        assert_eq!(state.phase, WavePhase::Active);
        assert_eq!(state.enemies.len(), 6);
        assert!(matches!(start_wave(&mut state), Err(Error::WaveInProgress)));
    }

    #[test]
    fn test_start_wave_spawns_owned_allies() {
        let mut state = GameState::new(3);
        state.resources.allies = vec!["Medic".into(), "Ghost".into(), "Sniper".into()];
        start_wave(&mut state).unwrap();
        let names: Vec<_> = state.recruits.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Medic", "Sniper"]);
        assert_eq!(state.recruits[1].health, 60.0);
        assert_eq!(state.recruits[1].weapon.as_deref(), Some("Barrett M82"));
    }

    #[test]
    fn test_clear_opens_shop_after_delay() {
        let mut state = GameState::new(3);
        start_wave(&mut state).unwrap();
        let coins = state.resources.coins;
        state.tally = WaveTally { kills: 6, damaged: 0 };
        state.enemies.clear();

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(matches!(state.phase, WavePhase::Cleared { reward: 500, .. }));
        assert_eq!(state.wave, 1);
        assert_eq!(state.resources.coins, coins);

        for _ in 0..61 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, WavePhase::Idle);
        assert_eq!(state.wave, 2);
        assert_eq!(state.resources.coins, coins + 500);

        let mut hooks = Recorder::default();
        dispatch(&mut state, &mut hooks);
        assert_eq!(hooks.shop, [(2, 500)]);
        assert!(hooks.game_over.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_final_boss_victory() {
        let mut state = GameState::new(3);
        jump_to_wave(&mut state, FINAL_WAVE).unwrap();
        start_wave(&mut state).unwrap();
        state.enemies.clear();
        for _ in 0..62 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.wave, 101);
        assert!(state.final_boss_defeated);

        let mut hooks = Recorder::default();
        dispatch(&mut state, &mut hooks);
        assert_eq!(hooks.shop, [(101, 2000)]);
        assert!(hooks.final_boss);
    }

    #[test]
    fn test_fail_resets_run() {
        let mut state = GameState::new(3);
        jump_to_wave(&mut state, 7).unwrap();
        start_wave(&mut state).unwrap();
        state.tally = WaveTally { kills: 1, damaged: 2 };
        let coins = state.resources.coins;

        fail_wave(&mut state);
        assert_eq!(state.wave, 1);
        assert_eq!(state.phase, WavePhase::Failed { reward: 70 });
        assert_eq!(state.resources.coins, coins + 70);
        assert_eq!(state.resources.health, state.resources.max_health);

        let mut hooks = Recorder::default();
        dispatch(&mut state, &mut hooks);
        assert_eq!(hooks.game_over, [(7, 70)]);

        // A new run can start straight from the failed state
        start_wave(&mut state).unwrap();
        assert_eq!(state.tally, WaveTally::default());
    }

    #[test]
    fn test_jump_to_wave_validation() {
        let mut state = GameState::new(3);
        assert!(matches!(jump_to_wave(&mut state, 0), Err(Error::InvalidWave(0))));
        start_wave(&mut state).unwrap();
        assert!(matches!(jump_to_wave(&mut state, 5), Err(Error::WaveInProgress)));
    }
}
