//! High score leaderboard, persisted as JSON. Tracks the top 10 runs.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum HighScoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Wave reached
    pub wave: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard. Every run makes it
    /// onto a table that is not yet full.
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score if it qualifies. Returns the 1-based rank achieved.
    pub fn add_score(&mut self, score: u64, wave: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let entry = HighScoreEntry {
            score,
            wave,
            timestamp,
        };

        // Ties keep the earlier run ahead.
        let rank = match self.entries.iter().position(|e| score > e.score) {
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

    /// Load from `path`. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, HighScoreError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no high scores at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let mut scores: HighScores = serde_json::from_str(&json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn save(&self, path: &Path) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("high scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("laststand-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_ranks_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(100, 1, 0.0), Some(1));
        assert_eq!(scores.add_score(300, 3, 0.0), Some(1));
        assert_eq!(scores.add_score(200, 2, 0.0), Some(2));
        let ordered: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_zero_score_is_recorded_while_table_has_room() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 1, 0.0), Some(1));
        assert_eq!(scores.add_score(50, 2, 0.0), Some(1));
        assert_eq!(scores.entries.last().unwrap().score, 0);

        for i in 1..MAX_HIGH_SCORES as u64 {
            scores.add_score(100 + i, 3, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(0));
        assert_eq!(scores.add_score(0, 1, 0.0), None);
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(i * 10, 1, 0.0);
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.add_score(5, 1, 0.0), None);
        assert_eq!(scores.add_score(55, 1, 0.0), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().unwrap().score, 20);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let scores = HighScores::load(&temp_path("missing")).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("persist");
        let mut scores = HighScores::new();
        scores.add_score(420, 4, 1_700_000_000_000.0);
        scores.add_score(90, 1, 1_700_000_000_001.0);
        scores.save(&path).unwrap();

        let loaded = HighScores::load(&path).unwrap();
        assert_eq!(loaded.entries, scores.entries);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            HighScores::load(&path),
            Err(HighScoreError::Parse(_))
        ));
        let _ = fs::remove_file(&path);
    }
}
