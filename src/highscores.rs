//! High score leaderboard system
//!
//! Persisted to a JSON file, tracks the top 10 finished sessions. Past entries
//! double as "ghost" opponent profiles (see `sim::roster`).

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::GameMode;
use crate::sim::Stats;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Errors from reading or writing the score file
#[derive(Error, Debug)]
pub enum HighScoreError {
    #[error("Failed to access high score file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse high score JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receives final stats when a session ends
pub trait ScoreReporter {
    fn report(&mut self, stats: &Stats, mode: GameMode);
}

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    pub kills: u32,
    /// Seconds survived
    pub survival_time: f32,
    pub max_mass: f32,
    pub mode: GameMode,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl HighScoreEntry {
    pub fn from_stats(name: impl Into<String>, stats: &Stats, mode: GameMode, timestamp: f64) -> Self {
        Self {
            name: name.into(),
            score: stats.score,
            kills: stats.kills,
            survival_time: stats.survival_time,
            max_mass: stats.max_mass,
            mode,
            timestamp,
        }
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    /// Name recorded for reported sessions
    #[serde(default = "default_player_name")]
    pub player_name: String,
}

fn default_player_name() -> String {
    crate::consts::PLAYER_NAME.to_string()
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            player_name: default_player_name(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add an entry (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending by score; ties keep the older entry first
        let pos = self.entries.iter().position(|e| entry.score > e.score);
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

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let json = fs::read_to_string(path.as_ref())?;
        let scores: HighScores = serde_json::from_str(&json)?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Load, falling back to an empty table when the file is missing or unreadable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(scores) => scores,
            Err(HighScoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("{e}; starting with an empty table");
                Self::new()
            }
        }
    }

    /// Save high scores as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl ScoreReporter for HighScores {
    fn report(&mut self, stats: &Stats, mode: GameMode) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0);
        let entry = HighScoreEntry::from_stats(self.player_name.clone(), stats, mode, timestamp);
        match self.add_score(entry) {
            Some(rank) => log::info!("New high score {} at rank {}", stats.score, rank),
            None => log::info!("Score {} did not make the table", stats.score),
        }
    }
}
