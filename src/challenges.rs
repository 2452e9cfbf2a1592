//! Daily challenges
//!
//! Each calendar day gets one challenge picked deterministically from a
//! small template table, so every player sees the same one. Completing it
//! credits reward points once.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, PlatformError, load_json, save_json};

pub const CHALLENGES_KEY: &str = "tap_rush_daily_challenges";
pub const POINTS_KEY: &str = "tap_rush_challenge_points";

struct Template {
    special_rule: &'static str,
    target_score: u64,
    target_combo: u32,
    time_limit: u32,
    reward: u64,
}

const TEMPLATES: [Template; 6] = [
    Template {
        special_rule: "TAP ONLY CIRCLES",
        target_score: 50,
        target_combo: 15,
        time_limit: 60,
        reward: 100,
    },
    Template {
        special_rule: "TAP ONLY SQUARES",
        target_score: 60,
        target_combo: 20,
        time_limit: 90,
        reward: 150,
    },
    Template {
        special_rule: "TAP ONLY TRIANGLES",
        target_score: 45,
        target_combo: 12,
        time_limit: 60,
        reward: 100,
    },
    Template {
        special_rule: "TAP ONLY RED",
        target_score: 40,
        target_combo: 10,
        time_limit: 45,
        reward: 80,
    },
    Template {
        special_rule: "TAP ONLY BLUE",
        target_score: 55,
        target_combo: 18,
        time_limit: 75,
        reward: 120,
    },
    Template {
        special_rule: "HIGH COMBO CHALLENGE",
        target_score: 100,
        target_combo: 30,
        time_limit: 120,
        reward: 250,
    },
];

/// One day's challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: String,
    /// `Y-M-D`, no zero padding
    pub date: String,
    pub special_rule: String,
    pub target_score: u64,
    pub target_combo: u32,
    /// Seconds
    pub time_limit: u32,
    pub reward: u64,
    pub completed: bool,
}

impl DailyChallenge {
    /// Deterministic challenge for a date key
    pub fn for_date(date: &str) -> Self {
        let hash: u32 = date.chars().map(|c| c as u32).sum();
        let template = &TEMPLATES[hash as usize % TEMPLATES.len()];
        Self {
            id: format!("challenge-{}", date),
            date: date.to_string(),
            special_rule: template.special_rule.to_string(),
            target_score: template.target_score,
            target_combo: template.target_combo,
            time_limit: template.time_limit,
            reward: template.reward,
            completed: false,
        }
    }

    /// Did a finished session meet the targets within the time limit?
    pub fn is_met(&self, score: u64, max_combo: u32, elapsed_secs: f32) -> bool {
        score >= self.target_score
            && max_combo >= self.target_combo
            && elapsed_secs <= self.time_limit as f32
    }
}

/// `Y-M-D` key for a calendar date
pub fn date_key(year: i32, month: u32, day: u32) -> String {
    format!("{}-{}-{}", year, month, day)
}

/// Same key from a chrono date
pub fn date_key_for(date: NaiveDate) -> String {
    date_key(date.year(), date.month(), date.day())
}

/// Key for the player's local calendar day
pub fn today_key() -> String {
    date_key_for(chrono::Local::now().date_naive())
}

/// Totals for the challenge screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChallengeProgress {
    pub completed: usize,
    pub total_points: u64,
}

/// Challenges seen so far, keyed by date, plus banked points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyChallenges {
    pub by_date: BTreeMap<String, DailyChallenge>,
    pub points: u64,
}

impl DailyChallenges {
    /// Challenge for `date`, generating and recording it on first request
    pub fn challenge_for(&mut self, date: &str) -> &DailyChallenge {
        self.by_date
            .entry(date.to_string())
            .or_insert_with(|| DailyChallenge::for_date(date))
    }

    /// Mark `date`'s challenge completed and bank its reward.
    /// Returns the points credited (None if already completed or unknown).
    pub fn complete(&mut self, date: &str) -> Option<u64> {
        let challenge = self.by_date.get_mut(date)?;
        if challenge.completed {
            return None;
        }
        challenge.completed = true;
        self.points += challenge.reward;
        log::info!("Daily challenge {} completed (+{})", challenge.id, challenge.reward);
        Some(challenge.reward)
    }

    /// Check a finished session against `date`'s challenge, completing it if met
    pub fn submit_result(
        &mut self,
        date: &str,
        score: u64,
        max_combo: u32,
        elapsed_secs: f32,
    ) -> Option<u64> {
        if self.challenge_for(date).is_met(score, max_combo, elapsed_secs) {
            self.complete(date)
        } else {
            None
        }
    }

    pub fn progress(&self) -> ChallengeProgress {
        ChallengeProgress {
            completed: self.by_date.values().filter(|c| c.completed).count(),
            total_points: self.points,
        }
    }

    pub fn load(store: &dyn KeyValueStore) -> Result<Self, PlatformError> {
        Ok(Self {
            by_date: load_json(store, CHALLENGES_KEY)?.unwrap_or_default(),
            points: load_json(store, POINTS_KEY)?.unwrap_or(0),
        })
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), PlatformError> {
        save_json(store, CHALLENGES_KEY, &self.by_date)?;
        save_json(store, POINTS_KEY, &self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_template_selection_by_char_sum() {
        // char codes of "2024-1-15" sum to 441, 441 % 6 == 3
        let challenge = DailyChallenge::for_date("2024-1-15");
        assert_eq!(challenge.id, "challenge-2024-1-15");
        assert_eq!(challenge.special_rule, "TAP ONLY RED");
        assert_eq!(challenge.target_score, 40);
        assert_eq!(challenge.reward, 80);
        assert_eq!(DailyChallenge::for_date("2024-1-16").special_rule, "TAP ONLY BLUE");
    }

    #[test]
    fn test_date_keys() {
        assert_eq!(date_key(2024, 3, 7), "2024-3-7");
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(date_key_for(leap), "2024-2-29");
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(date_key_for(new_year), "2025-1-1");
    }

    #[test]
    fn test_completion_credits_once() {
        let mut challenges = DailyChallenges::default();
        assert_eq!(challenges.complete("2024-1-15"), None);
        challenges.challenge_for("2024-1-15");
        assert_eq!(challenges.complete("2024-1-15"), Some(80));
        assert_eq!(challenges.complete("2024-1-15"), None);
        assert_eq!(
            challenges.progress(),
            ChallengeProgress {
                completed: 1,
                total_points: 80
            }
        );
    }

    #[test]
    fn test_submit_result_checks_targets() {
        let mut challenges = DailyChallenges::default();
        let date = "2024-1-15";
        assert_eq!(challenges.submit_result(date, 40, 9, 30.0), None);
        assert_eq!(challenges.submit_result(date, 40, 10, 50.0), None);
        assert_eq!(challenges.submit_result(date, 40, 10, 45.0), Some(80));
    }

    #[test]
    fn test_persistence() {
        let mut store = MemoryStore::new();
        let mut challenges = DailyChallenges::default();
        challenges.challenge_for("2024-1-16");
        challenges.challenge_for("2024-1-15");
        challenges.complete("2024-1-15");
        challenges.save(&mut store).unwrap();

        let loaded = DailyChallenges::load(&store).unwrap();
        assert_eq!(loaded, challenges);
        assert_eq!(loaded.progress().completed, 1);
    }
}
