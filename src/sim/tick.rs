//! Forward simulation tick
//!
//! Advances a run by one nominal frame. Mode handling and history recording
//! belong to the orchestrator; this only transforms `SimState`.

use super::physics::{decay_shield, integrate_player, scroll_and_collide};
use super::spawner::{RandomSource, maybe_spawn};
use super::state::{SimEvent, SimState};
use crate::levels::LevelConfig;
use crate::tuning::Tuning;

/// Input intents gathered for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump (space/tap)
    pub jump: bool,
    /// Start a rewind
    pub rewind: bool,
}

/// What happened during a forward tick
#[derive(Debug, Clone, Default)]
pub struct ForwardOutcome {
    /// Hit an obstacle without a shield
    pub crashed: bool,
    /// Reached the level's target distance (never set together with `crashed`)
    pub completed: bool,
    pub events: Vec<SimEvent>,
}

/// Advance `state` by one forward tick
pub fn forward_tick(
    state: &mut SimState,
    level: &LevelConfig,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    elapsed_ms: f32,
) -> ForwardOutcome {
    state.distance += level.speed;
    state.score = SimState::score_for(state.distance);

    integrate_player(&mut state.player, tuning);
    decay_shield(&mut state.shield_ms, elapsed_ms);

    maybe_spawn(state, level, tuning, rng);

    let report = scroll_and_collide(state, level.speed, tuning);

    state.tick += 1;
    state.last_tick_ms += f64::from(elapsed_ms);

    let mut outcome = ForwardOutcome {
        crashed: report.crashed,
        completed: false,
        events: report.events,
    };
    if outcome.crashed {
        outcome.events.push(SimEvent::Crashed);
    } else if state.distance >= level.target_distance {
        outcome.completed = true;
        outcome.events.push(SimEvent::LevelComplete {
            level_id: level.id,
            score: state.score,
            coins: state.coins,
        });
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::levels::level_by_id;
    use crate::sim::spawner::FixedSequence;
    use crate::sim::state::{Entity, EntityKind};
    use glam::Vec2;

    fn quiet_tuning() -> Tuning {
        Tuning {
            first_spawn_distance: f32::MAX,
            ..Default::default()
        }
    }

    #[test]
    fn test_distance_and_score_accrue() {
        let level = level_by_id(1);
        let tuning = quiet_tuning();
        let mut state = SimState::new(&level, &tuning, 1);
        let mut rng = FixedSequence::new(&[0.5]);

        for _ in 0..3 {
            forward_tick(&mut state, &level, &tuning, &mut rng, FRAME_MS);
        }
        assert_eq!(state.distance, 15.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.tick, 3);
        assert_eq!(state.player.pos.y, GROUND_Y);
    }

    #[test]
    fn test_completion_at_target() {
        let level = level_by_id(1);
        let tuning = quiet_tuning();
        let mut state = SimState::new(&level, &tuning, 1);
        state.distance = level.target_distance - level.speed;
        let mut rng = FixedSequence::new(&[0.5]);

        let outcome = forward_tick(&mut state, &level, &tuning, &mut rng, FRAME_MS);
        assert!(outcome.completed);
        assert_eq!(
            outcome.events,
            vec![SimEvent::LevelComplete { level_id: 1, score: 200, coins: 0 }]
        );
    }

    #[test]
    fn test_level_completes_with_harmless_spawns() {
        let level = level_by_id(1);
        let tuning = Tuning::default();
        let mut state = SimState::new(&level, &tuning, 1);
        // Every draw spawns a coin well above the running player
        let mut rng = FixedSequence::new(&[0.9, 0.5, 0.5]);

        let mut ticks = 0;
        let outcome = loop {
            let outcome = forward_tick(&mut state, &level, &tuning, &mut rng, FRAME_MS);
            ticks += 1;
            assert!(!outcome.crashed);
            if outcome.completed {
                break outcome;
            }
        };
        assert_eq!(ticks, 400);
        assert_eq!(
            outcome.events.last(),
            Some(&SimEvent::LevelComplete { level_id: 1, score: 200, coins: 0 })
        );
        assert!(!state.entities.is_empty());
    }

    #[test]
    fn test_crash_wins_over_completion() {
        let level = level_by_id(1);
        let tuning = quiet_tuning();
        let mut state = SimState::new(&level, &tuning, 1);
        state.distance = level.target_distance;
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind: EntityKind::Obstacle,
            pos: Vec2::new(PLAYER_X + level.speed, 380.0),
            width: 40.0,
            height: 50.0,
        });
        let mut rng = FixedSequence::new(&[0.5]);

        let outcome = forward_tick(&mut state, &level, &tuning, &mut rng, FRAME_MS);
        assert!(outcome.crashed);
        assert!(!outcome.completed);
        assert_eq!(outcome.events, vec![SimEvent::Crashed]);
    }

    #[test]
    fn test_shield_decays_by_elapsed_time() {
        let level = level_by_id(1);
        let tuning = quiet_tuning();
        let mut state = SimState::new(&level, &tuning, 1);
        state.shield_ms = 100.0;
        let mut rng = FixedSequence::new(&[0.5]);

        forward_tick(&mut state, &level, &tuning, &mut rng, 40.0);
        assert_eq!(state.shield_ms, 60.0);
        forward_tick(&mut state, &level, &tuning, &mut rng, 80.0);
        assert_eq!(state.shield_ms, 0.0);
        assert_eq!(state.last_tick_ms, 120.0);
    }
}
