//! Read-only view of a run for presentation
//!
//! A `Projection` is an owned copy taken between ticks, so a renderer never
//! sees a half-applied tick and cannot mutate the simulation.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::rewind::RewindController;
use super::state::{EntityKind, SimMode, SimState};
use crate::levels::LevelConfig;

/// Drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    /// Includes cosmetic rewind jitter
    pub rect: Rect,
}

/// Drawable player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub jumping: bool,
    pub shield_active: bool,
}

/// Per-frame snapshot for HUD and rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub mode: SimMode,
    pub level_id: u32,
    pub score: u32,
    pub coins: u32,
    pub rewind_charges: u32,
    /// Percent of the target distance covered (0-100)
    pub progress: u8,
    pub distance: f32,
    pub player: PlayerView,
    pub entities: Vec<EntityView>,
}

impl Projection {
    pub fn build(
        state: &SimState,
        mode: SimMode,
        level: &LevelConfig,
        rewind: &RewindController,
    ) -> Self {
        let jitter = mode == SimMode::Rewinding;
        let entities = state
            .entities
            .iter()
            .map(|e| {
                let dx = if jitter { rewind.jitter_for(e.id) } else { 0.0 };
                EntityView {
                    id: e.id,
                    kind: e.kind,
                    rect: e.rect().offset_x(dx),
                }
            })
            .collect();

        Self {
            mode,
            level_id: level.id,
            score: state.score,
            coins: state.coins,
            rewind_charges: state.rewind_charges,
            progress: progress_percent(state.distance, level.target_distance),
            distance: state.distance,
            player: PlayerView {
                rect: state.player.rect(),
                jumping: state.player.jumping,
                shield_active: state.shield_active(),
            },
            entities,
        }
    }
}

/// Integer percent of `target` covered, clamped to 0-100
pub fn progress_percent(distance: f32, target: f32) -> u8 {
    if target <= 0.0 {
        return 100;
    }
    (distance / target * 100.0).clamp(0.0, 100.0).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0.0, 2000.0), 0);
        assert_eq!(progress_percent(999.0, 2000.0), 49);
        assert_eq!(progress_percent(2000.0, 2000.0), 100);
        assert_eq!(progress_percent(5000.0, 2000.0), 100);
        assert_eq!(progress_percent(10.0, 0.0), 100);
    }
}
