//! End-to-end wave scenarios driven through the public API

use glam::Vec2;
use rand::RngCore;

use madness_arena::consts::*;
use madness_arena::sim::spawn::build_enemy;
use madness_arena::sim::{
    EnemyKind, GameEvent, GameState, TickInput, WaveHooks, WavePhase, dispatch, jump_to_wave,
    spawn_wave, start_wave, tick,
};

/// Returns the same word forever; `u32::MAX` makes every probability check fail
struct ConstRng(u32);

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        ((self.0 as u64) << 32) | self.0 as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.0.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

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

/// Tick with no input until the phase leaves `Cleared`
fn run_out_shop_delay(state: &mut GameState) {
    for _ in 0..120 {
        if !matches!(state.phase, WavePhase::Cleared { .. }) {
            return;
        }
        tick(state, &TickInput::default(), SIM_DT);
    }
    panic!("shop delay never elapsed");
}

#[test]
fn wave_one_with_failing_rolls_is_six_unarmed_grunts() {
    let mut next_id = 1;
    let enemies = spawn_wave(1, &mut ConstRng(u32::MAX), &mut next_id);

    assert_eq!(enemies.len(), 6);
    for enemy in &enemies {
        assert_eq!(enemy.kind, EnemyKind::Grunt);
        assert!(enemy.weapon.is_none());
        assert_eq!(enemy.health, 28.0);
        assert_eq!(enemy.damage, 13.0);
    }
    let ids: Vec<u32> = enemies.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(next_id, 7);
}

#[test]
fn wave_twelve_is_a_single_armored_boss() {
    let mut state = GameState::new(12);
    jump_to_wave(&mut state, 12).unwrap();
    start_wave(&mut state).unwrap();

    assert_eq!(state.enemies.len(), 1);
    let boss = &state.enemies[0];
    assert_eq!(boss.kind, EnemyKind::Boss);
    assert_eq!(boss.health, 928.0);
    assert_eq!(boss.armor, 5.0);
}

#[test]
fn final_boss_pays_tenfold_and_announces_victory() {
    let mut state = GameState::new(100);
    jump_to_wave(&mut state, 100).unwrap();
    start_wave(&mut state).unwrap();

    assert_eq!(state.enemies.len(), 1);
    let boss = &state.enemies[0];
    assert_eq!(boss.kind, EnemyKind::MegaBoss);
    assert_eq!(boss.health, 16400.0);
    assert_eq!(boss.armor, 10.0);

    // Pretend the fight was won with one kill
    state.enemies.clear();
    state.tally.kills = 1;
    let coins = state.resources.coins;
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(
        state.phase,
        WavePhase::Cleared {
            reward: 2500,
            shop_in_ms: SHOP_DELAY_MS
        }
    );

    run_out_shop_delay(&mut state);
    let mut hooks = Recorder::default();
    dispatch(&mut state, &mut hooks);

    assert_eq!(state.resources.coins, coins + 2500);
    assert_eq!(state.wave, 101);
    assert!(state.final_boss_defeated);
    assert!(hooks.final_boss);
    assert_eq!(hooks.shop, vec![(101, 2500)]);
}

#[test]
fn same_seed_same_run() {
    let script = |i: u32| TickInput {
        right: i % 90 < 45,
        up: i % 60 < 20,
        aim: Some(Vec2::new(400.0 + (i % 200) as f32, 100.0)),
        fire: i % 7 == 0,
        melee: i % 31 == 0,
        ..Default::default()
    };

    let play = || {
        let mut state = GameState::new(0xDEAD_BEEF);
        start_wave(&mut state).unwrap();
        for i in 0..600 {
            tick(&mut state, &script(i), SIM_DT);
        }
        serde_json::to_string(&state).unwrap()
    };

    assert_eq!(play(), play());
}

#[test]
fn death_pays_combat_reward_and_resets_to_wave_one() {
    let mut state = GameState::new(3);
    jump_to_wave(&mut state, 3).unwrap();
    start_wave(&mut state).unwrap();

    let pos = state.player.pos;
    let mut attacker = build_enemy(999, EnemyKind::Grunt, pos + Vec2::new(10.0, 0.0), 3, None);
    attacker.damage = 15.0;
    state.enemies = vec![attacker];
    state.player.health = 10.0;
    state.tally.kills = 2;
    state.tally.damaged = 1;
    let coins = state.resources.coins;

    tick(&mut state, &TickInput::default(), SIM_DT);

    let reward = 2 * KILL_REWARD + DAMAGE_REWARD;
    assert_eq!(state.phase, WavePhase::Failed { reward });
    assert_eq!(state.wave, 1);
    assert_eq!(state.resources.coins, coins + reward);
    assert_eq!(state.resources.health, state.resources.max_health);
    assert!(state.enemies.is_empty());
    assert!(state.events.contains(&GameEvent::GameOver { wave: 3, reward }));

    let mut hooks = Recorder::default();
    dispatch(&mut state, &mut hooks);
    assert_eq!(hooks.game_over, vec![(3, reward)]);
    assert!(state.events.is_empty());

    // A failed run can be restarted straight away
    start_wave(&mut state).unwrap();
    assert_eq!(state.enemies.len(), 6);
}

#[test]
fn clearing_a_wave_opens_the_shop_for_the_next() {
    let mut state = GameState::new(1);
    start_wave(&mut state).unwrap();
    state.enemies.clear();
    state.tally.kills = 6;
    let coins = state.resources.coins;

    tick(&mut state, &TickInput::default(), SIM_DT);
    let reward = 6 * KILL_REWARD + CLEAR_BONUS;
    assert!(matches!(state.phase, WavePhase::Cleared { reward: r, .. } if r == reward));
    // Nothing is credited until the delay runs out
    assert_eq!(state.resources.coins, coins);
    assert!(start_wave(&mut state).is_err());

    run_out_shop_delay(&mut state);
    assert_eq!(state.phase, WavePhase::Idle);
    assert_eq!(state.wave, 2);
    assert_eq!(state.resources.coins, coins + reward);

    let mut hooks = Recorder::default();
    dispatch(&mut state, &mut hooks);
    assert_eq!(hooks.shop, vec![(2, reward)]);
    assert!(!hooks.final_boss);

    start_wave(&mut state).unwrap();
    assert_eq!(state.enemies.len(), 8);
}

#[test]
fn purchases_between_waves_carry_into_the_arena() {
    let mut state = GameState::new(8);
    state.resources.coins = 5000;
    state.resources.buy_weapon("Glock 19").unwrap();
    state.resources.buy_ally("Medic").unwrap();

    start_wave(&mut state).unwrap();

    assert!(state.player.loadout.holds("Glock 19"));
    assert_eq!(state.recruits.len(), 1);
    assert_eq!(state.recruits[0].name, "Medic");
    assert_eq!(state.recruits[0].health, 80.0);
}
