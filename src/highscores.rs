//! High score leaderboard
//!
//! Top 10 final scores, highest first. The store persists after every change
//! to a JSON file (native) or LocalStorage (wasm32); a missing or corrupt save
//! just starts an empty board.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score leaderboard (descending, at most [`MAX_HIGH_SCORES`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<u64>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary scores (sorted and trimmed)
    pub fn from_scores(mut scores: Vec<u64>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { entries: scores }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|&lowest| score > lowest)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|&e| score > e);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score, keeping the board sorted and trimmed.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        // Ties go after existing entries
        let pos = self
            .entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, score);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Scores, highest first
    pub fn scores(&self) -> &[u64] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Where a [`HighScoreStore`] keeps its board between launches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreStorage {
    /// Nothing persisted (tests, demos)
    Memory,
    /// JSON array in a file
    #[cfg(not(target_arch = "wasm32"))]
    File(std::path::PathBuf),
    /// Browser LocalStorage
    #[cfg(target_arch = "wasm32")]
    LocalStorage,
}

impl ScoreStorage {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "planet_jumper_highscores";

    fn load(&self) -> Result<Option<HighScores>, GameError> {
        match self {
            ScoreStorage::Memory => Ok(None),
            #[cfg(not(target_arch = "wasm32"))]
            ScoreStorage::File(path) => {
                let json = match std::fs::read_to_string(path) {
                    Ok(json) => json,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                    Err(err) => return Err(err.into()),
                };
                let scores: Vec<u64> = serde_json::from_str(&json)?;
                Ok(Some(HighScores::from_scores(scores)))
            }
            #[cfg(target_arch = "wasm32")]
            ScoreStorage::LocalStorage => {
                let storage = web_sys::window()
                    .and_then(|w| w.local_storage().ok())
                    .flatten();
                let json = storage.and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
                match json {
                    Some(json) => {
                        let scores: Vec<u64> = serde_json::from_str(&json)?;
                        Ok(Some(HighScores::from_scores(scores)))
                    }
                    None => Ok(None),
                }
            }
        }
    }

    fn save(&self, scores: &HighScores) -> Result<(), GameError> {
        match self {
            ScoreStorage::Memory => Ok(()),
            #[cfg(not(target_arch = "wasm32"))]
            ScoreStorage::File(path) => {
                let json = serde_json::to_string(scores)?;
                std::fs::write(path, json)?;
                Ok(())
            }
            #[cfg(target_arch = "wasm32")]
            ScoreStorage::LocalStorage => {
                let json = serde_json::to_string(scores)?;
                let storage = web_sys::window()
                    .and_then(|w| w.local_storage().ok())
                    .flatten();
                if let Some(storage) = storage {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("LocalStorage rejected high scores");
                    }
                }
                Ok(())
            }
        }
    }
}

/// Persisted leaderboard handle. Create one per process and pass it to
/// whoever records final scores.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    scores: HighScores,
    storage: ScoreStorage,
}

impl HighScoreStore {
    /// Open a store, loading any saved board
    pub fn open(storage: ScoreStorage) -> Self {
        let scores = match storage.load() {
            Ok(Some(scores)) => {
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                HighScores::new()
            }
            Err(err) => {
                log::warn!("Discarding unreadable high scores: {}", err);
                HighScores::new()
            }
        };
        Self { scores, storage }
    }

    /// Store that only lives as long as the process
    pub fn in_memory() -> Self {
        Self::open(ScoreStorage::Memory)
    }

    /// Record a final score and persist.
    /// Returns the rank achieved (1-indexed) or None if it didn't make the board.
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        let rank = self.scores.add_score(score);
        self.persist();
        rank
    }

    /// Scores, highest first
    pub fn top_scores(&self) -> &[u64] {
        self.scores.scores()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.scores
    }

    /// Wipe the board, including the saved copy
    pub fn reset(&mut self) {
        self.scores.clear();
        self.persist();
    }

    pub fn storage(&self) -> &ScoreStorage {
        &self.storage
    }

    fn persist(&self) {
        match self.storage.save(&self.scores) {
            Ok(()) => log::debug!("High scores saved ({} entries)", self.scores.len()),
            Err(err) => log::warn!("Failed to save high scores: {}", err),
        }
    }
}
