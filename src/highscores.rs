//! Local best-score leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 sessions. The best entry is
//! the record shown on the start screen.

use serde::{Deserialize, Serialize};

use crate::sim::{Outcome, SessionSummary};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: i64,
    pub outcome: Outcome,
    /// Seconds the session lasted
    pub time_spent: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "word_sort_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: i64) -> bool {
        if score <= 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished session.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn record(&mut self, summary: &SessionSummary, timestamp: f64) -> Option<usize> {
        if !self.qualifies(summary.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: summary.score,
            outcome: summary.outcome,
            time_spent: summary.total_time_secs,
            timestamp,
        };

        // Sorted descending by score; ties go to the faster session
        let pos = self.entries.iter().position(|e| {
            summary.score > e.score
                || (summary.score == e.score && summary.total_time_secs < e.time_spent)
        });
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best entry (if any)
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(json) = crate::platform::storage::get(Self::STORAGE_KEY) {
            if let Ok(scores) = serde_json::from_str::<HighScores>(&json) {
                log::info!("Loaded {} high scores", scores.entries.len());
                return scores;
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if crate::platform::storage::set(Self::STORAGE_KEY, &json).is_ok() {
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
