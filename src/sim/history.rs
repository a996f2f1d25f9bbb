//! Bounded history of forward ticks for rewinding
//!
//! A fixed-capacity ring buffer: recording past capacity overwrites the
//! oldest snapshot, and rewinding pops from the newest end.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Entity, SimState};

/// Independent copy of the simulation state after one forward tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Simulated time of the tick (ms since run start)
    pub timestamp_ms: f64,
    pub tick: u64,
    pub player_pos: Vec2,
    pub player_vel_y: f32,
    pub jumping: bool,
    pub score: u32,
    pub coins: u32,
    pub rewind_charges: u32,
    pub distance: f32,
    pub entities: Vec<Entity>,
    pub shield_ms: f32,
    pub next_spawn_at: f32,
    pub spawn_rng: Pcg32,
    pub next_entity_id: u32,
}

impl HistorySnapshot {
    /// Deep-copy the parts of `state` that rewinding restores
    pub fn capture(state: &SimState) -> Self {
        Self {
            timestamp_ms: state.last_tick_ms,
            tick: state.tick,
            player_pos: state.player.pos,
            player_vel_y: state.player.vel_y,
            jumping: state.player.jumping,
            score: state.score,
            coins: state.coins,
            rewind_charges: state.rewind_charges,
            distance: state.distance,
            entities: state.entities.clone(),
            shield_ms: state.shield_ms,
            next_spawn_at: state.next_spawn_at,
            spawn_rng: state.spawn_rng.clone(),
            next_entity_id: state.next_id,
        }
    }

    /// Overwrite `state` with this snapshot.
    ///
    /// Rewind charges are not restored: a charge spent on rewinding stays spent.
    pub fn restore_into(self, state: &mut SimState) {
        state.player.pos = self.player_pos;
        state.player.vel_y = self.player_vel_y;
        state.player.jumping = self.jumping;
        state.player.grounded = !self.jumping;
        state.score = self.score;
        state.coins = self.coins;
        state.distance = self.distance;
        state.entities = self.entities;
        state.shield_ms = self.shield_ms;
        state.next_spawn_at = self.next_spawn_at;
        state.spawn_rng = self.spawn_rng;
        state.next_id = self.next_entity_id;
        state.last_tick_ms = self.timestamp_ms;
        state.tick = self.tick;
    }
}

/// Fixed-capacity FIFO of snapshots with O(1) record, evict and pop
#[derive(Debug, Clone)]
pub struct History {
    slots: Vec<Option<HistorySnapshot>>,
    /// Index of the oldest snapshot
    head: usize,
    len: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append at the tail, evicting the oldest snapshot when full
    pub fn record(&mut self, snapshot: HistorySnapshot) {
        let cap = self.capacity();
        if self.len == cap {
            self.slots[self.head] = Some(snapshot);
            self.head = (self.head + 1) % cap;
        } else {
            let tail = (self.head + self.len) % cap;
            self.slots[tail] = Some(snapshot);
            self.len += 1;
        }
    }

    /// Remove and return the most recent snapshot
    pub fn pop_latest(&mut self) -> Option<HistorySnapshot> {
        if self.len == 0 {
            return None;
        }
        let idx = (self.head + self.len - 1) % self.capacity();
        self.len -= 1;
        self.slots[idx].take()
    }

    /// Most recent snapshot without removing it
    pub fn latest(&self) -> Option<&HistorySnapshot> {
        if self.len == 0 {
            return None;
        }
        let idx = (self.head + self.len - 1) % self.capacity();
        self.slots[idx].as_ref()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &HistorySnapshot> {
        let cap = self.capacity();
        (0..self.len).filter_map(move |i| self.slots[(self.head + i) % cap].as_ref())
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }
}
