//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed nominal timestep only
//! - Seeded RNG only (spawn and jitter draws use separate streams)
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod history;
pub mod physics;
pub mod projection;
pub mod rewind;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use history::{History, HistorySnapshot};
pub use projection::{EntityView, PlayerView, Projection, progress_percent};
pub use rewind::{RewindController, RewindFrame, RewindStep};
pub use spawner::{RandomSource, maybe_spawn};
pub use state::{Entity, EntityKind, Player, PowerUpKind, RngState, SimEvent, SimMode, SimState};
pub use tick::{ForwardOutcome, TickInput, forward_tick};
