//! Fixed-step frame pacing
//!
//! Per-tick physics constants assume a nominal 60 Hz. Hosts with a different
//! or variable refresh rate feed wall-clock deltas here and the driver runs
//! the matching number of nominal frames.

use crate::consts::{FRAME_MS, MAX_SUBSTEPS};
use crate::sim::TickInput;
use crate::simulation::Simulation;

/// Longest wall-clock delta accepted per update (ms); longer gaps are dropped
const MAX_WALL_DELTA_MS: f32 = 250.0;

#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    accumulator_ms: f32,
    /// One-shot intents waiting for the next nominal frame
    pending: TickInput,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a jump for the next nominal frame
    pub fn queue_jump(&mut self) {
        self.pending.jump = true;
    }

    /// Queue a rewind for the next nominal frame
    pub fn queue_rewind(&mut self) {
        self.pending.rewind = true;
    }

    /// Run as many nominal frames as `wall_delta_ms` covers. Returns the count.
    pub fn advance(&mut self, sim: &mut Simulation, wall_delta_ms: f32) -> u32 {
        self.accumulator_ms += wall_delta_ms.clamp(0.0, MAX_WALL_DELTA_MS);

        let mut substeps = 0;
        while self.accumulator_ms >= FRAME_MS && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.pending);
            sim.frame(FRAME_MS, &input);
            self.accumulator_ms -= FRAME_MS;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator_ms >= FRAME_MS {
            log::warn!(
                "Frame driver falling behind, dropping {:.1} ms",
                self.accumulator_ms
            );
            self.accumulator_ms = 0.0;
        }
        substeps
    }
}
