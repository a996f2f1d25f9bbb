//! Data-driven game balance
//!
//! All gameplay numbers that are not geometry live here so they can be
//! overridden from JSON without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning load failures
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(&'static str),
}

/// Gameplay balance values (per nominal tick unless stated otherwise)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration added to vertical velocity each tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_impulse: f32,

    // === Pickups ===
    /// Coins awarded per coin pickup
    pub coin_value: u32,
    /// Shield duration granted by a shield power-up (ms)
    pub shield_duration_ms: f32,

    // === Rewind ===
    /// Snapshots restored per external frame while rewinding
    pub rewind_steps_per_frame: u32,
    /// Peak-to-peak cosmetic jitter applied to obstacles while rewinding (px)
    pub rewind_jitter: f32,

    // === Spawning ===
    /// Distance of the first spawn
    pub first_spawn_distance: f32,
    /// Base interval added to the spawn threshold
    pub spawn_interval_min: f32,
    /// Random extra interval on top of the base
    pub spawn_interval_spread: f32,
    /// Interval reduction per unit of level speed
    pub spawn_speed_factor: f32,
    /// Entities whose right edge is at or left of this x are despawned
    pub despawn_x: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: -15.0,

            coin_value: 10,
            shield_duration_ms: 5000.0,

            rewind_steps_per_frame: 5,
            rewind_jitter: 5.0,

            first_spawn_distance: 600.0,
            spawn_interval_min: 300.0,
            spawn_interval_spread: 600.0,
            spawn_speed_factor: 10.0,
            despawn_x: 0.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.gravity <= 0.0 {
            return Err(TuningError::Invalid("gravity must be positive"));
        }
        if self.jump_impulse >= 0.0 {
            return Err(TuningError::Invalid("jump_impulse must point upward"));
        }
        if self.rewind_steps_per_frame == 0 {
            return Err(TuningError::Invalid("rewind_steps_per_frame must be at least 1"));
        }
        if self.spawn_interval_spread < 0.0 {
            return Err(TuningError::Invalid("spawn_interval_spread must not be negative"));
        }
        Ok(())
    }
}
