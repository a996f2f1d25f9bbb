//! Player motion, scrolling and collision resolution
//!
//! Motion constants are per nominal tick. Shield time is the one quantity
//! that decays by real elapsed milliseconds.

use super::state::{EntityKind, Player, PowerUpKind, SimEvent, SimState};
use crate::consts::GROUND_Y;
use crate::tuning::Tuning;

/// Result of resolving collisions for one tick
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    /// An unshielded obstacle was hit
    pub crashed: bool,
    pub events: Vec<SimEvent>,
}

/// Start a jump if the player is on the ground. Returns whether it happened.
pub fn apply_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if !player.grounded {
        return false;
    }
    player.vel_y = tuning.jump_impulse;
    player.jumping = true;
    player.grounded = false;
    true
}

/// Apply gravity, integrate and clamp to the ground
pub fn integrate_player(player: &mut Player, tuning: &Tuning) {
    player.vel_y += tuning.gravity;
    player.pos.y += player.vel_y;

    if player.pos.y >= GROUND_Y {
        player.pos.y = GROUND_Y;
        player.vel_y = 0.0;
        player.jumping = false;
        player.grounded = true;
    }
}

/// Decay the shield timer, clamped at zero
pub fn decay_shield(shield_ms: &mut f32, elapsed_ms: f32) {
    if *shield_ms > 0.0 {
        *shield_ms = (*shield_ms - elapsed_ms).max(0.0);
    }
}

/// Scroll every entity left, then resolve overlaps with the player.
///
/// Consumed pickups, shield-absorbed obstacles and entities whose right edge
/// is past `tuning.despawn_x` are removed. An unshielded obstacle hit stays in
/// place and flags the crash.
pub fn scroll_and_collide(state: &mut SimState, speed: f32, tuning: &Tuning) -> CollisionReport {
    let mut report = CollisionReport::default();
    let player_rect = state.player.rect();

    let mut entities = std::mem::take(&mut state.entities);
    entities.retain_mut(|entity| {
        entity.pos.x -= speed;

        if player_rect.overlaps(&entity.rect()) {
            match entity.kind {
                EntityKind::Obstacle => {
                    if state.shield_ms > 0.0 {
                        state.shield_ms = 0.0;
                        report.events.push(SimEvent::ShieldAbsorbed);
                        log::debug!("Shield absorbed obstacle #{}", entity.id);
                        return false;
                    }
                    report.crashed = true;
                }
                EntityKind::Coin => {
                    state.coins += tuning.coin_value;
                    report.events.push(SimEvent::CoinCollected { coins: state.coins });
                    return false;
                }
                EntityKind::PowerUp(kind) => {
                    match kind {
                        PowerUpKind::Shield => state.shield_ms = tuning.shield_duration_ms,
                        PowerUpKind::ExtraRewind => state.rewind_charges += 1,
                    }
                    report.events.push(SimEvent::PowerUpCollected { kind });
                    log::debug!("Collected {:?} power-up", kind);
                    return false;
                }
            }
        }

        entity.rect().right() > tuning.despawn_x
    });
    state.entities = entities;

    report
}
