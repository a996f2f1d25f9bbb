//! Static level catalog
//!
//! Levels are generated from a small formula so that difficulty ramps
//! evenly: faster scroll, longer runs, more rewinds every other level.

use serde::{Deserialize, Serialize};

/// Number of levels in the catalog
pub const LEVEL_COUNT: u32 = 10;

/// Immutable per-level parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// 1-based level id
    pub id: u32,
    /// Horizontal scroll speed (pixels per tick)
    pub speed: f32,
    /// Distance at which the level is complete
    pub target_distance: f32,
    /// Relative obstacle density, informational for presentation
    pub obstacle_density: f32,
    /// Rewind charges available at the start of a run
    pub rewind_limit: u32,
}

impl LevelConfig {
    fn from_index(i: u32) -> Self {
        Self {
            id: i + 1,
            speed: 5.0 + i as f32 * 0.8,
            target_distance: 2000.0 + i as f32 * 1000.0,
            obstacle_density: 0.015 + i as f32 * 0.005,
            rewind_limit: 3 + i / 2,
        }
    }
}

/// All levels, ordered by id
pub fn catalog() -> Vec<LevelConfig> {
    (0..LEVEL_COUNT).map(LevelConfig::from_index).collect()
}

/// Look up a level by id, falling back to the first level for unknown ids
pub fn level_by_id(id: u32) -> LevelConfig {
    if (1..=LEVEL_COUNT).contains(&id) {
        LevelConfig::from_index(id - 1)
    } else {
        log::warn!("Unknown level id {}, falling back to level 1", id);
        LevelConfig::from_index(0)
    }
}
