//! Rewind Runner - a side-scrolling runner with a time-rewind mechanic
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, history, rewind)
//! - `simulation`: The orchestrator that owns one run and drives the sim
//! - `levels`: Static level catalog
//! - `tuning`: Data-driven game balance
//! - `driver`: Fixed-step frame pacing from wall-clock deltas
//! - `profile`: Player profile and its persistence port
//! - `leaderboard`: Local top scores

pub mod driver;
pub mod leaderboard;
pub mod levels;
pub mod profile;
pub mod sim;
pub mod simulation;
pub mod tuning;

pub use driver::FrameDriver;
pub use leaderboard::Leaderboard;
pub use levels::{LevelConfig, level_by_id};
pub use profile::{PlayerProfile, ProfileError, ProfileStore};
pub use simulation::{SimObserver, Simulation};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate; per-tick physics constants assume this rate
    pub const TICK_RATE: u32 = 60;
    /// Duration of one nominal frame in milliseconds
    pub const FRAME_MS: f32 = 1000.0 / TICK_RATE as f32;
    /// Maximum nominal frames the driver runs per wall-clock update
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 450.0;
    /// Height of the ground strip at the bottom of the viewport
    pub const GROUND_STRIP: f32 = 20.0;

    /// Player box (fixed horizontal position, only moves vertically)
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Player top edge when standing on the ground
    pub const GROUND_Y: f32 = VIEW_HEIGHT - PLAYER_HEIGHT - GROUND_STRIP;

    /// Seconds of history kept for rewinding
    pub const REWIND_SECONDS: u32 = 4;
    /// History ring buffer capacity (one snapshot per tick)
    pub const HISTORY_CAPACITY: usize = (REWIND_SECONDS * TICK_RATE) as usize;
}
