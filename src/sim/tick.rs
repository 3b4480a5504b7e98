//! Fixed timestep simulation tick
//!
//! One call advances an active wave by one frame. Per-frame speeds are tuned
//! for 60 Hz, so every displacement is scaled by `dt * 60`.

use glam::Vec2;

use super::combat::{self, hit_enemy, melee_strike, take_damage};
use super::state::{Bullet, Enemy, Faction, GameEvent, GameState, WavePhase};
use super::wave;
use crate::consts::*;
use crate::profile::Wear;
use crate::{clamp_to_arena, direction_to, inside_arena};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Cursor position in arena coordinates
    pub aim: Option<Vec2>,
    /// Left click: shoot with a working gun, otherwise melee
    pub fire: bool,
    /// Right click: always melee
    pub melee: bool,
    /// Swap primary and secondary weapons
    pub swap_weapons: bool,
    /// Throw away the weapon in hand
    pub drop_weapon: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        WavePhase::Active => {}
        WavePhase::Cleared { .. } => {
            advance_clock(state, dt);
            wave::advance_cleared(state, dt);
            return;
        }
        WavePhase::Idle | WavePhase::Failed { .. } => return,
    }

    advance_clock(state, dt);
    let frames = dt * FRAME_RATE;

    if let Some(aim) = input.aim {
        state.player.aim = aim;
    }
    handle_actions(state, input);

    update_player(state, input, frames);
    update_enemies(state, frames);
    update_recruits(state, frames);

    if resolve_player_contact(state) {
        return;
    }
    resolve_recruit_contact(state);

    move_bullets(state, frames);
    if resolve_bullets(state) {
        return;
    }

    if state.enemies.is_empty() {
        wave::clear_wave(state);
    }

    state.normalize_order();
}

fn advance_clock(state: &mut GameState, dt: f32) {
    state.time_ticks += 1;
    state.clock_ms += dt as f64 * 1000.0;
}

/// Whether a unit whose last shot was at `last` may fire again at `now`
#[inline]
fn cooldown_elapsed(last: Option<f64>, now: f64, interval: f64) -> bool {
    last.is_none_or(|t| now - t > interval)
}

/// Clicks, weapon swap and drop
fn handle_actions(state: &mut GameState, input: &TickInput) {
    let loadout = &mut state.player.loadout;
    if input.swap_weapons && loadout.swap() {
        log::debug!("Swapped to {}", loadout.current());
    }
    if input.drop_weapon
        && let Some(dropped) = loadout.drop_current()
    {
        log::debug!("Dropped {}", dropped.name);
    }

    if !(input.fire || input.melee) {
        return;
    }
    // A worn-out weapon has to be put away before anything else happens
    if loadout.active_is_broken() {
        loadout.switch_to_fists();
        return;
    }
    if input.fire && !input.melee && loadout.can_shoot() {
        player_shoot(state);
    } else {
        player_melee(state);
    }
}

fn player_shoot(state: &mut GameState) {
    let now = state.clock_ms;
    if state
        .player
        .last_shot_ms
        .is_some_and(|t| now - t < PLAYER_FIRE_DELAY_MS)
    {
        return;
    }
    state.player.last_shot_ms = Some(now);

    let dir = direction_to(state.player.pos, state.player.aim).unwrap_or(Vec2::X);
    let id = state.next_entity_id();
    state.bullets.push(Bullet {
        id,
        pos: state.player.pos,
        vel: dir * PLAYER_BULLET_SPEED,
        damage: state.mods.outgoing_damage(PLAYER_BULLET_DAMAGE),
        faction: Faction::Friendly,
    });
    wear_active_weapon(state);
}

fn player_melee(state: &mut GameState) {
    let hits = melee_strike(
        state.player.pos,
        &mut state.enemies,
        &mut state.tally,
        &state.mods,
    );
    log::trace!("Melee connected with {} enemies", hits);
    if state.player.loadout.holds_working_melee() {
        wear_active_weapon(state);
    }
}

fn wear_active_weapon(state: &mut GameState) {
    let name = state.player.loadout.current().to_string();
    if combat::wear_weapon(&mut state.player.loadout, &state.mods) == Wear::Broke {
        state.events.push(GameEvent::WeaponBroke { name });
    }
}

/// Accelerate, clamp, apply friction, integrate, clamp to arena
fn update_player(state: &mut GameState, input: &TickInput, frames: f32) {
    let mut accel = Vec2::ZERO;
    if input.up {
        accel.y -= PLAYER_ACCEL;
    }
    if input.down {
        accel.y += PLAYER_ACCEL;
    }
    if input.left {
        accel.x -= PLAYER_ACCEL;
    }
    if input.right {
        accel.x += PLAYER_ACCEL;
    }

    let player = &mut state.player;
    let max = Vec2::splat(PLAYER_MAX_SPEED);
    player.vel = (player.vel + accel * frames).clamp(-max, max);
    player.vel *= PLAYER_FRICTION.powf(frames);
    let step = player.vel * frames * state.mods.player_speed_factor();
    player.pos = clamp_to_arena(player.pos + step, PLAYER_RADIUS);
}

/// Seek the player and shoot when the cooldown allows
fn update_enemies(state: &mut GameState, frames: f32) {
    let target = state.player.pos;
    let now = state.clock_ms;
    let scale = state.mods.enemy_time_scale();
    let bullet_damage = ENEMY_DAMAGE + state.wave as f32 * 2.0;

    let mut shots = Vec::new();
    for enemy in &mut state.enemies {
        // Standing on the player: hold position but keep shooting
        let dir = match direction_to(enemy.pos, target) {
            Some(dir) => {
                enemy.pos += dir * enemy.speed * frames * scale;
                dir
            }
            None => Vec2::X,
        };

        if enemy.weapon.is_some()
            && cooldown_elapsed(enemy.last_shot_ms, now, enemy.shooting_interval_ms)
        {
            enemy.last_shot_ms = Some(now);
            shots.push((enemy.pos, dir * ENEMY_BULLET_SPEED));
        }
    }

    for (pos, vel) in shots {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos,
            vel,
            damage: bullet_damage,
            faction: Faction::Hostile,
        });
    }
}

fn nearest_enemy(enemies: &[Enemy], from: Vec2) -> Option<(&Enemy, f32)> {
    enemies
        .iter()
        .map(|e| (e, e.pos.distance(from)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Retarget the nearest enemy every tick, close in, shoot
fn update_recruits(state: &mut GameState, frames: f32) {
    let now = state.clock_ms;
    let mut shots = Vec::new();

    for recruit in &mut state.recruits {
        let nearest = nearest_enemy(&state.enemies, recruit.pos);
        recruit.target = nearest.map(|(e, _)| e.id);
        let Some((enemy, dist)) = nearest else {
            continue;
        };

        if dist > RECRUIT_CLOSE_RANGE
            && let Some(dir) = direction_to(recruit.pos, enemy.pos)
        {
            recruit.pos += dir * recruit.speed * frames;
        }

        if recruit.weapon.is_some()
            && dist < RECRUIT_FIRE_RANGE
            && cooldown_elapsed(recruit.last_shot_ms, now, RECRUIT_FIRE_INTERVAL_MS)
            && let Some(dir) = direction_to(recruit.pos, enemy.pos)
        {
            recruit.last_shot_ms = Some(now);
            shots.push((recruit.pos, dir * RECRUIT_BULLET_SPEED, recruit.damage));
        }
    }

    for (pos, vel, damage) in shots {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos,
            vel,
            damage,
            faction: Faction::Friendly,
        });
    }
}

/// Strongest touching enemy hurts the player. Returns true if the wave failed.
fn resolve_player_contact(state: &mut GameState) -> bool {
    if !state.mods.player_contact() {
        return false;
    }
    let pos = state.player.pos;
    let contact = state
        .enemies
        .iter()
        .filter(|e| e.pos.distance(pos) < PLAYER_RADIUS + e.radius())
        .map(|e| e.damage)
        .reduce(f32::max);

    if let Some(damage) = contact {
        take_damage(&mut state.player.health, state.mods.damage_taken(damage));
        if state.player.is_dead() {
            wave::fail_wave(state);
            return true;
        }
    }
    false
}

/// Every touching enemy deals half its damage to each recruit
fn resolve_recruit_contact(state: &mut GameState) {
    for recruit in &mut state.recruits {
        for enemy in &state.enemies {
            if enemy.pos.distance(recruit.pos) < enemy.radius() + RECRUIT_HALF_SIZE {
                take_damage(&mut recruit.health, enemy.damage * 0.5);
            }
        }
    }
    state.recruits.retain(|r| r.health > 0.0);
}

fn move_bullets(state: &mut GameState, frames: f32) {
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel * frames;
    }
    state.bullets.retain(|b| inside_arena(b.pos));
}

/// Resolve bullet hits. Returns true if the wave failed.
fn resolve_bullets(state: &mut GameState) -> bool {
    let bullets = std::mem::take(&mut state.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        match bullet.faction {
            Faction::Hostile => {
                if bullet.pos.distance(state.player.pos) < PLAYER_RADIUS {
                    take_damage(
                        &mut state.player.health,
                        state.mods.damage_taken(bullet.damage),
                    );
                    if state.player.is_dead() {
                        wave::fail_wave(state);
                        return true;
                    }
                    continue;
                }
                if let Some(recruit) = state
                    .recruits
                    .iter_mut()
                    .find(|r| r.health > 0.0 && r.pos.distance(bullet.pos) < RECRUIT_HALF_SIZE)
                {
                    take_damage(&mut recruit.health, bullet.damage);
                    continue;
                }
            }
            Faction::Friendly => {
                let mut hit = false;
                for enemy in state.enemies.iter_mut().filter(|e| e.is_alive()) {
                    if enemy.pos.distance(bullet.pos) < enemy.radius() {
                        hit = true;
                        state.tally.record(hit_enemy(enemy, bullet.damage));
                    }
                }
                if hit {
                    continue;
                }
            }
        }
        survivors.push(bullet);
    }

    state.bullets = survivors;
    state.enemies.retain(Enemy::is_alive);
    state.recruits.retain(|r| r.health > 0.0);
    false
}
