//! Local leaderboard
//!
//! Tracks the top 10 level clears across players on this device. Global
//! sync is left to an outer service.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    /// Level the score was made on
    pub level: u32,
}

/// Top scores, sorted descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Add a score if it qualifies.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn submit(&mut self, username: &str, score: u32, level: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            username: username.to_string(),
            score,
            level,
        };

        // Ties keep the earlier entry ahead
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best entry for a given player
    pub fn best_for(&self, username: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_insert() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("a", 100, 1), Some(1));
        assert_eq!(board.submit("b", 300, 2), Some(1));
        assert_eq!(board.submit("c", 200, 2), Some(2));
        assert_eq!(board.submit("d", 200, 3), Some(3));

        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 200, 100]);
        assert_eq!(board.top_score(), Some(300));
        assert_eq!(board.best_for("c").map(|e| e.level), Some(2));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("a", 0, 1), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_full_board_drops_lowest() {
        let mut board = Leaderboard::new();
        for i in 1..=MAX_ENTRIES as u32 {
            board.submit("p", i * 10, 1);
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.submit("late", 5, 1), None);
        assert_eq!(board.submit("late", 55, 1), Some(6));
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(20));
    }
}
