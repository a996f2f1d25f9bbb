//! Player profile and its persistence port
//!
//! The simulation never touches the profile. Outer layers fold
//! `SimEvent::LevelComplete` into it and persist it through a `ProfileStore`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::levels::LEVEL_COUNT;

/// Storage key used by key-value backed stores
pub const STORAGE_KEY: &str = "rewind_runner_profile";

/// Persistence failures
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile storage unavailable")]
    Unavailable,
    #[error("profile storage failed: {0}")]
    Storage(String),
    #[error("corrupt profile data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Long-lived player progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub username: String,
    /// Highest level id the player may start
    pub highest_level: u32,
    pub total_coins: u64,
    /// Best score per level id
    #[serde(default)]
    pub best_scores: BTreeMap<u32, u32>,
}

impl PlayerProfile {
    /// New profile with only the first level unlocked
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            highest_level: 1,
            total_coins: 0,
            best_scores: BTreeMap::new(),
        }
    }

    pub fn is_unlocked(&self, level_id: u32) -> bool {
        level_id >= 1 && level_id <= self.highest_level
    }

    pub fn best_score(&self, level_id: u32) -> Option<u32> {
        self.best_scores.get(&level_id).copied()
    }

    /// Fold a completed level into the profile.
    ///
    /// Returns true if the score is a new best for that level.
    pub fn record_level_complete(&mut self, level_id: u32, score: u32, coins: u32) -> bool {
        let improved = self
            .best_scores
            .get(&level_id)
            .is_none_or(|&best| score > best);
        if improved {
            self.best_scores.insert(level_id, score);
        }

        self.total_coins += u64::from(coins);
        let unlocked = level_id.saturating_add(1).min(LEVEL_COUNT);
        self.highest_level = self.highest_level.max(unlocked);
        log::info!(
            "{} cleared level {} (score {}, best {}), highest level now {}",
            self.username,
            level_id,
            score,
            self.best_scores[&level_id],
            self.highest_level
        );
        improved
    }
}

/// Persistence port for the profile
pub trait ProfileStore {
    fn load(&self) -> Result<Option<PlayerProfile>, ProfileError>;
    fn save(&mut self, profile: &PlayerProfile) -> Result<(), ProfileError>;
}

/// Keeps the serialized profile in memory (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    json: Option<String>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<PlayerProfile>, ProfileError> {
        match &self.json {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), ProfileError> {
        self.json = Some(serde_json::to_string(profile)?);
        Ok(())
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageProfileStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageProfileStore {
    fn storage() -> Result<web_sys::Storage, ProfileError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(ProfileError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ProfileStore for LocalStorageProfileStore {
    fn load(&self) -> Result<Option<PlayerProfile>, ProfileError> {
        let storage = Self::storage()?;
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => {
                let profile: PlayerProfile = serde_json::from_str(&json)?;
                log::info!("Loaded profile for {}", profile.username);
                Ok(Some(profile))
            }
            Ok(None) => Ok(None),
            Err(err) => Err(ProfileError::Storage(format!("{:?}", err))),
        }
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), ProfileError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(profile)?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|err| ProfileError::Storage(format!("{:?}", err)))?;
        log::info!("Profile saved");
        Ok(())
    }
}
