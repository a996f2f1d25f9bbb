//! Run state and core simulation types
//!
//! `SimState` is the authoritative per-run state. Only the forward tick and
//! the rewind restore mutate it; presentation reads a `Projection` instead.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::levels::LevelConfig;
use crate::tuning::Tuning;

/// Current mode of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimMode {
    /// Normal play: physics, spawning and recording
    Forward,
    /// Replaying history backwards
    Rewinding,
    /// Crashed into an obstacle, waiting for rewind or restart
    Halted,
    /// Target distance reached; terminal until restart
    Complete,
}

/// Power-up subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs the next obstacle hit
    Shield,
    /// Grants one extra rewind charge
    ExtraRewind,
}

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Coin,
    PowerUp(PowerUpKind),
}

/// A scrolling entity (obstacle, coin or power-up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Entity {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.kind == EntityKind::Obstacle
    }
}

/// The runner. Horizontal position is fixed; only `pos.y` changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vel_y: f32,
    pub grounded: bool,
    pub jumping: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y),
            vel_y: 0.0,
            grounded: true,
            jumping: false,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

/// Events raised by the simulation for outer layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Hit an obstacle without a shield
    Crashed,
    /// Target distance reached
    LevelComplete { level_id: u32, score: u32, coins: u32 },
    CoinCollected { coins: u32 },
    PowerUpCollected { kind: PowerUpKind },
    /// Shield absorbed an obstacle hit
    ShieldAbsorbed,
    /// A rewind began; one charge was consumed
    RewindStarted { charges_left: u32 },
    /// History ran out and forward play resumed
    RewindFinished,
    Restarted,
}

/// Seed wrapper that hands out independent RNG streams
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    const SPAWN_STREAM: u64 = 0xa02b_dbf7_bb3c_0a7;
    const JITTER_STREAM: u64 = 0x5851_f42d_4c95_7f2d;

    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Stream for spawn draws (gameplay-affecting)
    pub fn spawn_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, Self::SPAWN_STREAM)
    }

    /// Stream for cosmetic jitter (never affects gameplay)
    pub fn jitter_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, Self::JITTER_STREAM)
    }
}

/// Authoritative state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub player: Player,
    /// Cumulative distance traveled
    pub distance: f32,
    /// Always `floor(distance / 10)`
    pub score: u32,
    pub coins: u32,
    pub rewind_charges: u32,
    /// Remaining shield time (ms), zero when inactive
    pub shield_ms: f32,
    /// Live entities (kept in spawn order)
    pub entities: Vec<Entity>,
    /// Distance that triggers the next spawn
    pub next_spawn_at: f32,
    /// Simulated time of the last forward tick (ms since run start)
    pub last_tick_ms: f64,
    /// Completed forward ticks
    pub tick: u64,
    /// Spawn draws; part of the state so a rewind replays the same spawns
    pub spawn_rng: Pcg32,
    /// Next entity ID
    pub(super) next_id: u32,
}

impl SimState {
    /// Fresh state at the start of a level
    pub fn new(level: &LevelConfig, tuning: &Tuning, seed: u64) -> Self {
        Self {
            player: Player::default(),
            distance: 0.0,
            score: 0,
            coins: 0,
            rewind_charges: level.rewind_limit,
            shield_ms: 0.0,
            entities: Vec::new(),
            next_spawn_at: tuning.first_spawn_distance,
            last_tick_ms: 0.0,
            tick: 0,
            spawn_rng: RngState::new(seed).spawn_rng(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield_ms > 0.0
    }

    /// Score as a function of distance
    pub fn score_for(distance: f32) -> u32 {
        (distance / 10.0).floor() as u32
    }
}
