//! Arena state and entity types
//!
//! Everything the step function reads or writes lives in [`GameState`]; the
//! host passes it in each frame and renders from it afterwards.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::mods::ModPolicy;
use crate::consts::*;
use crate::profile::{Loadout, PlayerResources};

/// Enemy variants. Resolved to concrete stats once, at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Grunt,
    Engineer,
    Ahhw,
    Agent,
    /// Rare elite, wave 5 onward
    L337,
    Boss,
    /// Wave 100 only
    MegaBoss,
}

/// Per-kind adjustments applied on top of the wave's base stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatModifiers {
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    pub size: f32,
    pub armor: f32,
}

impl StatModifiers {
    const BASE: Self = Self { health: 1.0, speed: 1.0, damage: 1.0, size: 1.0, armor: 0.0 };
}

impl EnemyKind {
    pub fn modifiers(&self) -> StatModifiers {
        let base = StatModifiers::BASE;
        match self {
            EnemyKind::Grunt => base,
            EnemyKind::Engineer => StatModifiers { health: 1.5, speed: 0.8, size: 1.2, ..base },
            EnemyKind::Ahhw => StatModifiers { speed: 1.5, damage: 1.3, size: 0.9, ..base },
            EnemyKind::Agent => StatModifiers { health: 1.2, damage: 1.1, armor: 2.0, ..base },
            EnemyKind::L337 => StatModifiers {
                health: 2.5,
                speed: 1.3,
                damage: 1.8,
                size: 1.1,
                armor: 3.0,
            },
            EnemyKind::Boss => StatModifiers {
                health: 8.0,
                speed: 0.7,
                damage: 3.0,
                size: 2.0,
                armor: 5.0,
            },
            EnemyKind::MegaBoss => StatModifiers {
                health: 20.0,
                speed: 0.5,
                damage: 5.0,
                size: 3.0,
                armor: 10.0,
            },
        }
    }

    /// Display color as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            EnemyKind::Grunt => 0xEF4444,
            EnemyKind::Engineer => 0x34C759,
            EnemyKind::Ahhw => 0xFF69B4,
            EnemyKind::Agent => 0x8B9467,
            EnemyKind::L337 => 0xFFD700,
            EnemyKind::Boss => 0x8B0000,
            EnemyKind::MegaBoss => 0xFF0000,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, EnemyKind::Boss | EnemyKind::MegaBoss)
    }
}

/// A hostile square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Pixels per 60 Hz frame
    pub speed: f32,
    pub damage: f32,
    /// Ranged weapon; unarmed enemies only deal contact damage
    pub weapon: Option<String>,
    /// Simulation time of the last shot; `None` until the first one
    pub last_shot_ms: Option<f64>,
    pub shooting_interval_ms: f64,
    /// Edge length of the square
    pub size: f32,
    /// Flat reduction applied to damage this enemy receives
    pub armor: f32,
}

impl Enemy {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// A player-aligned unit bought as an ally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recruit {
    pub id: u32,
    pub name: String,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    pub weapon: Option<String>,
    pub last_shot_ms: Option<f64>,
    /// Nearest enemy as of the last tick (looked up by id, never owned)
    pub target: Option<u32>,
}

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    /// Player or recruit; hurts enemies
    Friendly,
    /// Enemy; hurts the player and recruits
    Hostile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per 60 Hz frame
    pub vel: Vec2,
    pub damage: f32,
    pub faction: Faction,
}

/// The player's in-arena body. Built from [`PlayerResources`] at wave start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaPlayer {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Last known cursor position
    pub aim: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub loadout: Loadout,
    pub last_shot_ms: Option<f64>,
}

impl ArenaPlayer {
    pub fn new(resources: &PlayerResources, mods: &ModPolicy) -> Self {
        let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
        let max_health = mods.max_health(resources.max_health);
        Self {
            pos: center,
            vel: Vec2::ZERO,
            aim: center,
            health: mods.max_health(resources.health).min(max_health),
            max_health,
            loadout: resources.loadout.clone(),
            last_shot_ms: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Kill/damage counters for the running wave
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveTally {
    pub kills: u32,
    /// Hits that wounded without killing
    pub damaged: u32,
}

/// Wave controller state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Waiting for the player to start the next wave
    Idle,
    /// Simulation running
    Active,
    /// All enemies dead; the shop opens once the delay runs out
    Cleared { reward: u64, shop_in_ms: f32 },
    /// Player died; run reset to wave 1
    Failed { reward: u64 },
}

/// Notifications for the host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { wave: u32 },
    GameOver { wave: u32, reward: u64 },
    OpenShop { next_wave: u32, reward: u64 },
    FinalBossDefeated,
    WeaponBroke { name: String },
}

/// Complete simulation context (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub rng: Pcg32,
    /// Current wave number (1-based)
    pub wave: u32,
    pub phase: WavePhase,
    /// Simulation clock in milliseconds
    pub clock_ms: f64,
    pub time_ticks: u64,
    pub player: ArenaPlayer,
    /// Sorted by id
    pub enemies: Vec<Enemy>,
    /// Sorted by id
    pub recruits: Vec<Recruit>,
    /// Sorted by id
    pub bullets: Vec<Bullet>,
    pub tally: WaveTally,
    /// Persistent side; written only at wave boundaries
    pub resources: PlayerResources,
    pub mods: ModPolicy,
    /// Pending host notifications, drained by `wave::dispatch`
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub final_boss_defeated: bool,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Fresh run with default resources and no mods
    pub fn new(seed: u64) -> Self {
        Self::with_resources(seed, PlayerResources::default(), ModPolicy::default())
    }

    pub fn with_resources(seed: u64, resources: PlayerResources, mods: ModPolicy) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            wave: 1,
            phase: WavePhase::Idle,
            clock_ms: 0.0,
            time_ticks: 0,
            player: ArenaPlayer::new(&resources, &mods),
            enemies: Vec::new(),
            recruits: Vec::new(),
            bullets: Vec::new(),
            tally: WaveTally::default(),
            resources,
            mods,
            events: Vec::new(),
            final_boss_defeated: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == WavePhase::Active
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.recruits.sort_by_key(|r| r.id);
        self.bullets.sort_by_key(|b| b.id);
    }
}
