//! Procedural entity spawning
//!
//! Spawns at most one entity per tick at the right edge of the view once the
//! run's distance passes the spawn threshold, then pushes the threshold out by
//! a random interval that shrinks on faster levels.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Entity, EntityKind, PowerUpKind, SimState};
use crate::consts::*;
use crate::levels::LevelConfig;
use crate::tuning::Tuning;

/// Uniform random draws in `[0, 1)` used by the spawner
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Probability cut-offs for the entity kind draw
const OBSTACLE_CHANCE: f32 = 0.80;
const COIN_CHANCE: f32 = 0.95;

const OBSTACLE_MIN_WIDTH: f32 = 30.0;
const OBSTACLE_WIDTH_SPREAD: f32 = 40.0;
const OBSTACLE_HEIGHT: f32 = 50.0;
/// Obstacles sit on the ground strip
const OBSTACLE_Y: f32 = VIEW_HEIGHT - OBSTACLE_HEIGHT - GROUND_STRIP;

const COIN_SIZE: f32 = 25.0;
const POWER_UP_SIZE: f32 = 30.0;
/// Lowest top edge of the pickup band (reachable with a jump)
const PICKUP_BAND_BOTTOM: f32 = VIEW_HEIGHT - 120.0;
const PICKUP_BAND_HEIGHT: f32 = 100.0;

/// Spawn an entity if the threshold has been crossed.
///
/// Returns a copy of the spawned entity; the entity itself is pushed onto
/// `state.entities`.
pub fn maybe_spawn(
    state: &mut SimState,
    level: &LevelConfig,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
) -> Option<Entity> {
    if state.distance <= state.next_spawn_at {
        return None;
    }

    let roll = rng.next_unit();
    let (kind, size, y) = if roll < OBSTACLE_CHANCE {
        let width = OBSTACLE_MIN_WIDTH + rng.next_unit() * OBSTACLE_WIDTH_SPREAD;
        (
            EntityKind::Obstacle,
            Vec2::new(width, OBSTACLE_HEIGHT),
            OBSTACLE_Y,
        )
    } else if roll < COIN_CHANCE {
        let y = pickup_y(rng);
        (EntityKind::Coin, Vec2::splat(COIN_SIZE), y)
    } else {
        let sub = if rng.next_unit() < 0.5 {
            PowerUpKind::Shield
        } else {
            PowerUpKind::ExtraRewind
        };
        let y = pickup_y(rng);
        (EntityKind::PowerUp(sub), Vec2::splat(POWER_UP_SIZE), y)
    };

    let entity = Entity {
        id: state.next_entity_id(),
        kind,
        pos: Vec2::new(VIEW_WIDTH, y),
        width: size.x,
        height: size.y,
    };
    state.entities.push(entity);

    let interval = tuning.spawn_interval_min + rng.next_unit() * tuning.spawn_interval_spread
        - level.speed * tuning.spawn_speed_factor;
    // Never let the threshold stall behind the run
    state.next_spawn_at += interval.max(level.speed);

    log::debug!(
        "Spawned {:?} #{} at distance {:.0}, next at {:.0}",
        entity.kind,
        entity.id,
        state.distance,
        state.next_spawn_at
    );
    Some(entity)
}

fn pickup_y(rng: &mut dyn RandomSource) -> f32 {
    PICKUP_BAND_BOTTOM - rng.next_unit() * PICKUP_BAND_HEIGHT
}

/// Replays a fixed list of draws, cycling when exhausted
#[cfg(test)]
pub(crate) struct FixedSequence {
    values: Vec<f32>,
    index: usize,
}

#[cfg(test)]
impl FixedSequence {
    pub(crate) fn new(values: &[f32]) -> Self {
        Self {
            values: values.to_vec(),
            index: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f32 {
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::level_by_id;

    fn setup(distance: f32) -> (SimState, LevelConfig, Tuning) {
        let level = level_by_id(1);
        let tuning = Tuning::default();
        let mut state = SimState::new(&level, &tuning, 1);
        state.distance = distance;
        (state, level, tuning)
    }

    #[test]
    fn test_no_spawn_before_threshold() {
        let (mut state, level, tuning) = setup(600.0);
        let mut rng = FixedSequence::new(&[0.1]);
        assert!(maybe_spawn(&mut state, &level, &tuning, &mut rng).is_none());
        assert!(state.entities.is_empty());
        assert_eq!(state.next_spawn_at, 600.0);
    }

    #[test]
    fn test_obstacle_spawn() {
        let (mut state, level, tuning) = setup(605.0);
        // kind, width, interval
        let mut rng = FixedSequence::new(&[0.1, 0.5, 0.5]);
        let entity = maybe_spawn(&mut state, &level, &tuning, &mut rng).unwrap();
        assert_eq!(entity.kind, EntityKind::Obstacle);
        assert_eq!(entity.width, 50.0);
        assert_eq!(entity.height, 50.0);
        assert_eq!(entity.pos, Vec2::new(VIEW_WIDTH, 380.0));
        // 600 + (300 + 0.5 * 600 - 5 * 10)
        assert_eq!(state.next_spawn_at, 1150.0);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_coin_spawn_in_pickup_band() {
        let (mut state, level, tuning) = setup(605.0);
        let mut rng = FixedSequence::new(&[0.9, 0.25, 0.0]);
        let entity = maybe_spawn(&mut state, &level, &tuning, &mut rng).unwrap();
        assert_eq!(entity.kind, EntityKind::Coin);
        assert_eq!(entity.pos.y, 330.0 - 25.0);
        assert_eq!(entity.width, 25.0);
    }

    #[test]
    fn test_power_up_subtypes() {
        let (mut state, level, tuning) = setup(605.0);
        let mut rng = FixedSequence::new(&[0.97, 0.2, 0.0, 0.0]);
        let shield = maybe_spawn(&mut state, &level, &tuning, &mut rng).unwrap();
        assert_eq!(shield.kind, EntityKind::PowerUp(PowerUpKind::Shield));

        state.distance = state.next_spawn_at + 1.0;
        let mut rng = FixedSequence::new(&[0.97, 0.8, 0.0, 0.0]);
        let extra = maybe_spawn(&mut state, &level, &tuning, &mut rng).unwrap();
        assert_eq!(extra.kind, EntityKind::PowerUp(PowerUpKind::ExtraRewind));
        assert!(extra.id > shield.id);
    }

    #[test]
    fn test_faster_levels_spawn_denser() {
        let tuning = Tuning::default();
        let slow = level_by_id(1);
        let fast = level_by_id(10);

        let mut slow_state = SimState::new(&slow, &tuning, 1);
        slow_state.distance = 601.0;
        let mut fast_state = SimState::new(&fast, &tuning, 1);
        fast_state.distance = 601.0;

        maybe_spawn(&mut slow_state, &slow, &tuning, &mut FixedSequence::new(&[0.1, 0.5, 0.5]));
        maybe_spawn(&mut fast_state, &fast, &tuning, &mut FixedSequence::new(&[0.1, 0.5, 0.5]));
        assert!(fast_state.next_spawn_at < slow_state.next_spawn_at);
    }

    #[test]
    fn test_seeded_spawns_are_reproducible() {
        let run = |seed: u64| {
            let (mut state, level, tuning) = setup(0.0);
            let mut rng = crate::sim::RngState::new(seed).spawn_rng();
            let mut kinds = Vec::new();
            for _ in 0..200 {
                state.distance += level.speed;
                if let Some(e) = maybe_spawn(&mut state, &level, &tuning, &mut rng) {
                    kinds.push((e.kind, e.pos.y, e.width));
                }
            }
            kinds
        };
        assert_eq!(run(42), run(42));
        assert!(!run(42).is_empty());
    }
}
