//! Simulation orchestrator
//!
//! Owns one run: the authoritative `SimState`, its history and the rewind
//! controller. Every external frame performs either one forward tick or one
//! batch of rewind steps, never both.

use crate::consts::HISTORY_CAPACITY;
use crate::levels::LevelConfig;
use crate::sim::physics::apply_jump;
use crate::sim::{
    History, HistorySnapshot, Projection, RewindController, RewindFrame, RngState, SimEvent,
    SimMode, SimState, TickInput, forward_tick,
};
use crate::tuning::Tuning;

/// Receives the run's outbound events as they happen
pub trait SimObserver {
    fn on_crash(&mut self) {}
    fn on_level_complete(&mut self, _level_id: u32, _score: u32, _coins: u32) {}
}

/// What a call to [`Simulation::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Halted or complete; nothing advanced
    Ignored,
    /// One forward tick ran and was recorded
    Forward,
    /// A batch of rewind steps ran
    Rewound(RewindFrame),
}

pub struct Simulation {
    level: LevelConfig,
    tuning: Tuning,
    mode: SimMode,
    state: SimState,
    history: History,
    rewind: RewindController,
    events: Vec<SimEvent>,
    observers: Vec<Box<dyn SimObserver>>,
}

impl Simulation {
    /// New run with default tuning
    pub fn new(level: LevelConfig, seed: u64) -> Self {
        Self::with_tuning(level, Tuning::default(), seed)
    }

    /// New run; `seed` drives both the spawn stream and the rewind jitter
    pub fn with_tuning(level: LevelConfig, tuning: Tuning, seed: u64) -> Self {
        let jitter_rng = RngState::new(seed).jitter_rng();
        log::info!(
            "Starting level {} (speed {}, target {}, {} rewinds)",
            level.id,
            level.speed,
            level.target_distance,
            level.rewind_limit
        );
        Self {
            state: SimState::new(&level, &tuning, seed),
            history: History::new(HISTORY_CAPACITY),
            rewind: RewindController::new(jitter_rng, tuning.rewind_jitter),
            mode: SimMode::Forward,
            level,
            tuning,
            events: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn SimObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub fn mode(&self) -> SimMode {
        self.mode
    }

    #[inline]
    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Read-only access to the authoritative state
    #[inline]
    pub fn state(&self) -> &SimState {
        &self.state
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Owned view for presentation
    pub fn projection(&self) -> Projection {
        Projection::build(&self.state, self.mode, &self.level, &self.rewind)
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Jump if playing forward and grounded
    pub fn jump(&mut self) -> bool {
        if self.mode != SimMode::Forward {
            return false;
        }
        apply_jump(&mut self.state.player, &self.tuning)
    }

    /// Start rewinding. Needs forward or halted mode, a charge and some history.
    pub fn trigger_rewind(&mut self) -> bool {
        let mode_ok = matches!(self.mode, SimMode::Forward | SimMode::Halted);
        if !mode_ok || self.state.rewind_charges == 0 || self.history.is_empty() {
            log::debug!(
                "Rewind rejected (mode {:?}, {} charges, {} snapshots)",
                self.mode,
                self.state.rewind_charges,
                self.history.len()
            );
            return false;
        }

        self.state.rewind_charges -= 1;
        self.mode = SimMode::Rewinding;
        log::info!(
            "Rewinding {} ticks, {} charges left",
            self.history.len(),
            self.state.rewind_charges
        );
        self.emit(SimEvent::RewindStarted {
            charges_left: self.state.rewind_charges,
        });
        true
    }

    /// Fresh run on the same level; the spawn stream continues
    pub fn restart(&mut self) {
        let spawn_rng = self.state.spawn_rng.clone();
        self.state = SimState::new(&self.level, &self.tuning, 0);
        self.state.spawn_rng = spawn_rng;
        self.history.clear();
        self.rewind.reset();
        self.mode = SimMode::Forward;
        log::info!("Restarted level {}", self.level.id);
        self.emit(SimEvent::Restarted);
    }

    /// Apply a frame's intents, then advance one frame
    pub fn frame(&mut self, elapsed_ms: f32, input: &TickInput) -> FrameOutcome {
        if input.rewind {
            self.trigger_rewind();
        }
        if input.jump {
            self.jump();
        }
        self.tick(elapsed_ms)
    }

    /// Advance the run by one external frame. Negative elapsed time counts as zero.
    pub fn tick(&mut self, elapsed_ms: f32) -> FrameOutcome {
        let elapsed_ms = elapsed_ms.max(0.0);
        match self.mode {
            SimMode::Forward => {
                self.step_forward(elapsed_ms);
                FrameOutcome::Forward
            }
            SimMode::Rewinding => FrameOutcome::Rewound(self.step_rewind()),
            SimMode::Halted | SimMode::Complete => FrameOutcome::Ignored,
        }
    }

    fn step_forward(&mut self, elapsed_ms: f32) {
        let mut spawn_rng = self.state.spawn_rng.clone();
        let outcome = forward_tick(
            &mut self.state,
            &self.level,
            &self.tuning,
            &mut spawn_rng,
            elapsed_ms,
        );
        self.state.spawn_rng = spawn_rng;
        self.history.record(HistorySnapshot::capture(&self.state));

        if outcome.crashed {
            self.mode = SimMode::Halted;
            log::info!(
                "Crashed at distance {:.0} (score {})",
                self.state.distance,
                self.state.score
            );
        } else if outcome.completed {
            self.mode = SimMode::Complete;
            log::info!(
                "Level {} complete: score {}, coins {}",
                self.level.id,
                self.state.score,
                self.state.coins
            );
        }

        for event in outcome.events {
            self.emit(event);
        }
    }

    fn step_rewind(&mut self) -> RewindFrame {
        let frame = self.rewind.run_frame(
            &mut self.state,
            &mut self.history,
            self.tuning.rewind_steps_per_frame,
        );
        if frame.exhausted {
            self.mode = SimMode::Forward;
            log::info!("Rewind finished at distance {:.0}", self.state.distance);
            self.emit(SimEvent::RewindFinished);
        }
        frame
    }

    fn emit(&mut self, event: SimEvent) {
        for observer in &mut self.observers {
            match event {
                SimEvent::Crashed => observer.on_crash(),
                SimEvent::LevelComplete {
                    level_id,
                    score,
                    coins,
                } => observer.on_level_complete(level_id, score, coins),
                _ => {}
            }
        }
        self.events.push(event);
    }
}
