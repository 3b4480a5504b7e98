//! Converts a [`GameState`] into a triangle list for the pipeline
//!
//! Read-only: nothing here mutates the simulation.

use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::catalog::FISTS;
use crate::consts::*;
use crate::sim::{Bullet, Enemy, Faction, GameState, Recruit};

const CIRCLE_SEGMENTS: u32 = 32;
const AIM_LENGTH: f32 = 14.0;
const CROSSHAIR_ARM: f32 = 10.0;

/// Build the full frame, back to front
pub fn build_frame(state: &GameState) -> Vec<Vertex> {
    let mut vertices = shapes::rect(
        Vec2::ZERO,
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        colors::BACKGROUND,
    );

    draw_player(state, &mut vertices);
    for enemy in &state.enemies {
        draw_enemy(enemy, &mut vertices);
    }
    for recruit in &state.recruits {
        draw_recruit(state, recruit, &mut vertices);
    }
    for bullet in &state.bullets {
        draw_bullet(bullet, &mut vertices);
    }
    draw_crosshair(state.player.aim, &mut vertices);

    vertices
}

fn draw_player(state: &GameState, out: &mut Vec<Vertex>) {
    let player = &state.player;
    out.extend(shapes::circle(
        player.pos,
        PLAYER_RADIUS + 3.0,
        colors::PLAYER_GLOW,
        CIRCLE_SEGMENTS,
    ));
    out.extend(shapes::circle(
        player.pos,
        PLAYER_RADIUS,
        colors::PLAYER,
        CIRCLE_SEGMENTS,
    ));
    out.extend(shapes::health_bar(
        player.pos - Vec2::new(30.0, PLAYER_RADIUS + 16.0),
        60.0,
        6.0,
        player.health / player.max_health,
        colors::BAR_PLAYER,
        colors::BAR_BACK,
    ));

    // Weapon held out toward the cursor
    if player.loadout.current() != FISTS
        && let Some(dir) = crate::direction_to(player.pos, player.aim)
    {
        let grip = player.pos + dir * PLAYER_RADIUS;
        out.extend(shapes::line(grip, grip + dir * AIM_LENGTH, 4.0, colors::AIM));
    }
}

fn draw_enemy(enemy: &Enemy, out: &mut Vec<Vertex>) {
    out.extend(shapes::square(
        enemy.pos,
        enemy.size,
        FRAC_PI_4,
        colors::hex(enemy.kind.color(), 1.0),
    ));
    out.extend(shapes::health_bar(
        enemy.pos - Vec2::new(16.0, enemy.radius() + 8.0),
        32.0,
        4.0,
        enemy.health / enemy.max_health,
        colors::BAR_ENEMY,
        colors::BAR_BACK,
    ));
}

fn draw_recruit(state: &GameState, recruit: &Recruit, out: &mut Vec<Vertex>) {
    out.extend(shapes::square(
        recruit.pos,
        RECRUIT_HALF_SIZE * 2.0,
        0.0,
        colors::RECRUIT,
    ));
    out.extend(shapes::health_bar(
        recruit.pos - Vec2::new(16.0, 40.0),
        32.0,
        4.0,
        recruit.health / recruit.max_health,
        colors::BAR_PLAYER,
        colors::BAR_BACK,
    ));

    // Short line pointing at the current target
    if let Some(target) = recruit.target.and_then(|id| state.enemy(id))
        && let Some(dir) = crate::direction_to(recruit.pos, target.pos)
    {
        out.extend(shapes::line(
            recruit.pos,
            recruit.pos + dir * 32.0,
            2.0,
            colors::TARGET_LINE,
        ));
    }
}

fn draw_bullet(bullet: &Bullet, out: &mut Vec<Vertex>) {
    let (color, length) = match bullet.faction {
        Faction::Friendly => (colors::BULLET_FRIENDLY, 8.0),
        Faction::Hostile => (colors::BULLET_HOSTILE, 6.0),
    };
    let dir = bullet.vel.normalize_or(Vec2::X);
    let half = dir * (length / 2.0);
    out.extend(shapes::line(bullet.pos - half, bullet.pos + half, 2.0, color));
}

fn draw_crosshair(aim: Vec2, out: &mut Vec<Vertex>) {
    let h = Vec2::new(CROSSHAIR_ARM, 0.0);
    let v = Vec2::new(0.0, CROSSHAIR_ARM);
    out.extend(shapes::line(aim - h, aim + h, 2.0, colors::CROSSHAIR));
    out.extend(shapes::line(aim - v, aim + v, 2.0, colors::CROSSHAIR));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::start_wave;

    #[test]
    fn test_frame_has_every_entity() {
        let mut state = GameState::new(5);
        let idle = build_frame(&state).len();
        start_wave(&mut state).unwrap();
        let active = build_frame(&state).len();
        // Each enemy adds a diamond plus a two-part health bar
        assert!(active >= idle + state.enemies.len() * 18);
    }

    #[test]
    fn test_enemy_uses_kind_color() {
        let mut state = GameState::new(5);
        start_wave(&mut state).unwrap();
        let kind_color = colors::hex(state.enemies[0].kind.color(), 1.0);
        let frame = build_frame(&state);
        assert!(frame.iter().any(|v| v.color == kind_color));
    }

    #[test]
    fn test_frame_stays_in_arena_space() {
        let mut state = GameState::new(5);
        start_wave(&mut state).unwrap();
        for v in build_frame(&state) {
            assert!(v.position[0] > -200.0 && v.position[0] < ARENA_WIDTH + 200.0);
            assert!(v.position[1] > -200.0 && v.position[1] < ARENA_HEIGHT + 200.0);
        }
    }
}
