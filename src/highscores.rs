//! Best score and local leaderboard
//!
//! The best score is a single scalar; the leaderboard keeps the top 10
//! named runs ordered by score, then combo. Both persist through the
//! `KeyValueStore`.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, PlatformError, load_json, save_json};

/// Maximum number of leaderboard entries to keep
pub const MAX_HIGH_SCORES: usize = 10;
/// Longest accepted player name (characters)
pub const MAX_NAME_LEN: usize = 50;

pub const HIGH_SCORE_KEY: &str = "tap_rush_high_score";
pub const LEADERBOARD_KEY: &str = "tap_rush_leaderboard";

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Best combo of the run
    pub combo: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl LeaderboardEntry {
    fn beats(&self, score: u64, combo: u32) -> bool {
        (score, combo) > (self.score, self.combo)
    }
}

/// Best score plus leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub best: u64,
    pub entries: Vec<LeaderboardEntry>,
}

/// Trim and validate a player name
pub fn clean_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return None;
    }
    Some(name.to_string())
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the best score if `score` beats it; returns true on a new best
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, score: u64, combo: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| e.beats(score, combo))
            .unwrap_or(true)
    }

    /// Rank a run would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64, combo: u32) -> Option<usize> {
        if !self.qualifies(score, combo) {
            return None;
        }
        let rank = self.entries.iter().position(|e| e.beats(score, combo));
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a named run. Returns the rank achieved, or None when the name is
    /// invalid or the run doesn't make the board.
    pub fn add_score(
        &mut self,
        name: &str,
        score: u64,
        combo: u32,
        timestamp: f64,
    ) -> Option<usize> {
        let name = clean_name(name)?;
        if !self.qualifies(score, combo) {
            return None;
        }

        let entry = LeaderboardEntry {
            name,
            score,
            combo,
            timestamp,
        };
        let rank = match self.entries.iter().position(|e| e.beats(score, combo)) {
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

    pub fn clear_leaderboard(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load best score and leaderboard. An unreadable leaderboard is
    /// dropped without losing the best score.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, PlatformError> {
        let best = load_json::<u64>(store, HIGH_SCORE_KEY)?.unwrap_or(0);
        let mut entries: Vec<LeaderboardEntry> = match load_json(store, LEADERBOARD_KEY) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring unreadable leaderboard: {}", e);
                Vec::new()
            }
        };
        entries.sort_by(|a, b| (b.score, b.combo).cmp(&(a.score, a.combo)));
        entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded best score {} and {} leaderboard entries", best, entries.len());
        Ok(Self { best, entries })
    }

    /// Persist the best score unless storage already holds one at least as
    /// high. A corrupt stored value is replaced. Returns true if written.
    pub fn save_best(&self, store: &mut dyn KeyValueStore) -> Result<bool, PlatformError> {
        match load_json::<u64>(store, HIGH_SCORE_KEY) {
            Ok(Some(stored)) if stored >= self.best => return Ok(false),
            Ok(_) | Err(PlatformError::Serialization(_)) => {}
            Err(e) => return Err(e),
        }
        save_json(store, HIGH_SCORE_KEY, &self.best)?;
        Ok(true)
    }

    pub fn save_leaderboard(&self, store: &mut dyn KeyValueStore) -> Result<(), PlatformError> {
        save_json(store, LEADERBOARD_KEY, &self.entries)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Relative date for a leaderboard row, both times in Unix ms
pub fn format_date(now: f64, timestamp: f64) -> String {
    let diff_mins = (now - timestamp) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryStore, NoStorage};

    #[test]
    fn test_ordering_by_score_then_combo() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("ann", 30, 5, 0.0), Some(1));
        assert_eq!(scores.add_score("bob", 50, 2, 0.0), Some(1));
        assert_eq!(scores.add_score("cyd", 30, 9, 0.0), Some(2));
        let names: Vec<_> = scores.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["bob", "cyd", "ann"]);
    }

    #[test]
    fn test_board_keeps_top_ten() {
        let mut scores = HighScores::new();
        for i in 1..=12u64 {
            scores.add_score("p", i * 10, 0, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(120));
        assert_eq!(scores.entries.last().map(|e| e.score), Some(30));
        assert!(!scores.qualifies(30, 0));
        assert!(scores.qualifies(30, 1));
        assert_eq!(scores.potential_rank(1000, 0), Some(1));
        assert_eq!(scores.potential_rank(5, 0), None);
    }

    #[test]
    fn test_name_validation() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("   ", 10, 1, 0.0), None);
        assert_eq!(scores.add_score(&"x".repeat(51), 10, 1, 0.0), None);
        assert_eq!(scores.add_score("  zoe  ", 10, 1, 0.0), Some(1));
        assert_eq!(scores.entries[0].name, "zoe");
        assert_eq!(scores.add_score("nil", 0, 0, 0.0), None);
    }

    #[test]
    fn test_record_score() {
        let mut scores = HighScores::new();
        assert!(scores.record_score(5));
        assert!(!scores.record_score(5));
        assert!(scores.record_score(6));
        assert_eq!(scores.best, 6);
    }

    #[test]
    fn test_persist_and_clear() {
        let mut store = MemoryStore::new();
        let mut scores = HighScores::new();
        scores.record_score(77);
        scores.add_score("amy", 77, 12, 1.0);
        scores.save_best(&mut store).unwrap();
        scores.save_leaderboard(&mut store).unwrap();

        let mut loaded = HighScores::load(&store).unwrap();
        assert_eq!(loaded.best, 77);
        assert_eq!(loaded.entries, scores.entries);

        loaded.clear_leaderboard();
        loaded.save_leaderboard(&mut store).unwrap();
        assert!(HighScores::load(&store).unwrap().is_empty());
    }

    #[test]
    fn test_load_without_storage_fails() {
        assert_eq!(HighScores::load(&NoStorage).unwrap_err(), PlatformError::Unavailable);
    }

    #[test]
    fn test_save_best_never_lowers_stored_value() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, serde_json::json!(500)).unwrap();

        let mut scores = HighScores::new();
        scores.record_score(20);
        assert_eq!(scores.save_best(&mut store), Ok(false));
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), Some(serde_json::json!(500)));

        scores.record_score(650);
        assert_eq!(scores.save_best(&mut store), Ok(true));
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), Some(serde_json::json!(650)));

        store.set(HIGH_SCORE_KEY, serde_json::json!("corrupt")).unwrap();
        assert_eq!(scores.save_best(&mut store), Ok(true));
        assert_eq!(scores.save_best(&mut NoStorage), Err(PlatformError::Unavailable));
    }

    #[test]
    fn test_unreadable_leaderboard_keeps_best() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, serde_json::json!(500)).unwrap();
        store.set(LEADERBOARD_KEY, serde_json::json!("garbage")).unwrap();
        let loaded = HighScores::load(&store).unwrap();
        assert_eq!(loaded.best, 500);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_format_date() {
        let now = 10.0 * 86_400_000.0;
        assert_eq!(format_date(now, now - 10_000.0), "Just now");
        assert_eq!(format_date(now, now - 90_000.0), "1 min ago");
        assert_eq!(format_date(now, now - 3.0 * 3_600_000.0), "3 hours ago");
        assert_eq!(format_date(now, now - 86_400_000.0), "Yesterday");
        assert_eq!(format_date(now, now - 4.0 * 86_400_000.0), "4 days ago");
    }
}
