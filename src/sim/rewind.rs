//! Rewind playback
//!
//! While rewinding, each external frame restores several snapshots from the
//! newest end of the history. Obstacles get a cosmetic horizontal jitter that
//! lives only here and in the projection, never in `SimState`.

use rand::Rng;
use rand_pcg::Pcg32;

use super::history::History;
use super::state::SimState;

/// Outcome of a single restore step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewindStep {
    /// A snapshot was popped and restored
    Restored,
    /// History is empty; forward play should resume
    Exhausted,
}

/// Outcome of one external frame of rewinding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewindFrame {
    /// Snapshots restored this frame
    pub restored: u32,
    /// History ran out during this frame
    pub exhausted: bool,
}

#[derive(Debug, Clone)]
pub struct RewindController {
    rng: Pcg32,
    /// Peak-to-peak jitter in pixels
    amplitude: f32,
    /// Cosmetic x offset per obstacle id for the current frame
    jitter: Vec<(u32, f32)>,
}

impl RewindController {
    pub fn new(rng: Pcg32, amplitude: f32) -> Self {
        Self {
            rng,
            amplitude,
            jitter: Vec::new(),
        }
    }

    /// Pop one snapshot and restore it
    pub fn step(&mut self, state: &mut SimState, history: &mut History) -> RewindStep {
        match history.pop_latest() {
            Some(snapshot) => {
                snapshot.restore_into(state);
                RewindStep::Restored
            }
            None => RewindStep::Exhausted,
        }
    }

    /// Run up to `steps` restore steps, stopping early when history runs out
    pub fn run_frame(&mut self, state: &mut SimState, history: &mut History, steps: u32) -> RewindFrame {
        let mut frame = RewindFrame::default();
        for _ in 0..steps {
            match self.step(state, history) {
                RewindStep::Restored => frame.restored += 1,
                RewindStep::Exhausted => {
                    frame.exhausted = true;
                    break;
                }
            }
        }

        if frame.exhausted {
            self.jitter.clear();
        } else {
            self.shake(state);
        }
        frame
    }

    /// Drop any cosmetic offsets (rewind ended or run restarted)
    pub fn reset(&mut self) {
        self.jitter.clear();
    }

    /// Cosmetic x offset for an entity this frame
    pub fn jitter_for(&self, entity_id: u32) -> f32 {
        self.jitter
            .iter()
            .find(|(id, _)| *id == entity_id)
            .map(|(_, dx)| *dx)
            .unwrap_or(0.0)
    }

    fn shake(&mut self, state: &SimState) {
        self.jitter.clear();
        for entity in state.entities.iter().filter(|e| e.is_obstacle()) {
            let dx = (self.rng.random::<f32>() - 0.5) * self.amplitude;
            self.jitter.push((entity.id, dx));
        }
    }
}
