//! Rewind Runner headless entry point
//!
//! Plays a level with a simple autopilot so the core can be exercised without
//! a renderer: `rewind-runner [level] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rewind_runner::consts::{FRAME_MS, PLAYER_WIDTH, PLAYER_X};
    use rewind_runner::leaderboard::Leaderboard;
    use rewind_runner::profile::{MemoryProfileStore, PlayerProfile, ProfileStore};
    use rewind_runner::sim::{EntityKind, SimEvent, SimMode};
    use rewind_runner::{Simulation, level_by_id};

    /// Give up after this many fresh attempts
    const MAX_ATTEMPTS: u32 = 5;
    /// Hard stop for a single attempt (ticks)
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    /// Jump when the next obstacle is within `lead` ticks of the player
    fn should_jump(sim: &Simulation, lead: f32) -> bool {
        let player_right = PLAYER_X + PLAYER_WIDTH;
        let reach = sim.level().speed * lead;
        sim.state()
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Obstacle)
            .any(|e| {
                let gap = e.pos.x - player_right;
                gap >= 0.0 && gap <= reach
            })
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let level_id = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
        let seed = args.next().and_then(|a| a.parse().ok()).unwrap_or(0x5eed);
        let level = level_by_id(level_id);

        let mut store = MemoryProfileStore::new();
        let mut profile = match store.load() {
            Ok(Some(profile)) => profile,
            Ok(None) => PlayerProfile::new("autopilot"),
            Err(err) => {
                log::warn!("Could not load profile: {}", err);
                PlayerProfile::new("autopilot")
            }
        };
        let mut leaderboard = Leaderboard::new();

        let mut sim = Simulation::new(level, seed);
        let mut rewinds_used = 0u32;
        let mut crashes = 0u32;

        for attempt in 1..=MAX_ATTEMPTS {
            log::info!("Attempt {} on level {}", attempt, level.id);
            let mut frames = 0;
            while frames < MAX_FRAMES {
                frames += 1;
                match sim.mode() {
                    SimMode::Forward => {
                        // Vary timing after each rewind so the replay differs
                        let lead = 8.0 - (rewinds_used % 4) as f32;
                        if should_jump(&sim, lead) {
                            sim.jump();
                        }
                    }
                    SimMode::Halted => {
                        crashes += 1;
                        if sim.trigger_rewind() {
                            rewinds_used += 1;
                        } else {
                            break;
                        }
                    }
                    SimMode::Rewinding => {}
                    SimMode::Complete => break,
                }
                sim.tick(FRAME_MS);

                for event in sim.drain_events() {
                    if let SimEvent::LevelComplete {
                        level_id,
                        score,
                        coins,
                    } = event
                    {
                        profile.record_level_complete(level_id, score, coins);
                        leaderboard.submit(&profile.username, score, level_id);
                    }
                }
            }

            if sim.mode() == SimMode::Complete {
                break;
            }
            if attempt < MAX_ATTEMPTS {
                sim.restart();
            }
        }

        if let Err(err) = store.save(&profile) {
            log::warn!("Could not save profile: {}", err);
        }

        let view = sim.projection();
        println!("Level {} ({:?})", level.id, view.mode);
        println!(
            "  score {}  coins {}  progress {}%",
            view.score, view.coins, view.progress
        );
        println!(
            "  crashes {}  rewinds used {}  charges left {}",
            crashes, rewinds_used, view.rewind_charges
        );
        println!(
            "  profile: highest level {}, total coins {}",
            profile.highest_level, profile.total_coins
        );
        if let Some(top) = leaderboard.top_score() {
            println!("  leaderboard top score {}", top);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by the host page; nothing to run here
}
