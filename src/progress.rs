//! Persisted progress and leaderboard
//!
//! Two blobs, each under its own fixed key: the player's progress
//! record and a capped top-10 leaderboard. Loading tolerates missing or
//! corrupt data by falling back to defaults; nothing here ever
//! propagates a failure to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::platform;

/// Storage key for the progress record
pub const PROGRESS_KEY: &str = "scrap_runner_progress";
/// Storage key for the leaderboard
pub const LEADERBOARD_KEY: &str = "scrap_runner_leaderboard";

/// Leaderboard capacity
pub const LEADERBOARD_CAP: usize = 10;

/// Audio preferences, persisted with the progress record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    pub muted: bool,
    /// 0.0 to 1.0
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            volume: 0.4,
        }
    }
}

/// The player's persisted progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressData {
    /// Highest level index the player may start
    pub highest_unlocked_level: usize,
    pub best_score_per_level: BTreeMap<usize, u64>,
    pub fastest_time_per_level: BTreeMap<usize, f32>,
    pub best_total_score: u64,
    pub settings: AudioSettings,
    pub player_name: String,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            highest_unlocked_level: 0,
            best_score_per_level: BTreeMap::new(),
            fastest_time_per_level: BTreeMap::new(),
            best_total_score: 0,
            settings: AudioSettings::default(),
            player_name: "PLAYER".into(),
        }
    }
}

impl ProgressData {
    /// Load from storage, defaulting on anything unreadable
    pub fn load() -> Self {
        load_or_default(PROGRESS_KEY)
    }

    pub fn save(&self) {
        save_blob(PROGRESS_KEY, self);
    }

    /// Record a finished level: best score, fastest time, and unlock of
    /// the next level, capped at the last of `level_count`
    pub fn record_level_result(&mut self, level: usize, score: u64, time: f32, level_count: usize) {
        let best = self.best_score_per_level.entry(level).or_insert(0);
        *best = (*best).max(score);
        let fastest = self
            .fastest_time_per_level
            .entry(level)
            .or_insert(f32::INFINITY);
        *fastest = fastest.min(time);
        let unlocked = (level + 1).min(level_count.saturating_sub(1));
        self.highest_unlocked_level = self.highest_unlocked_level.max(unlocked);
    }

    /// Record a finished run's total score
    pub fn record_run_total(&mut self, total_score: u64) {
        self.best_total_score = self.best_total_score.max(total_score);
    }
}

/// One finished run on the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderEntry {
    pub name: String,
    pub total_score: u64,
    pub total_time: f32,
    /// Display date supplied by the embedding
    pub date: String,
}

/// Capped top-10 board, ordered by score desc then time asc
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderEntry>,
}

impl Leaderboard {
    pub fn load() -> Self {
        load_or_default(LEADERBOARD_KEY)
    }

    pub fn save(&self) {
        save_blob(LEADERBOARD_KEY, self);
    }

    /// Whether a score would land on the board
    pub fn qualifies(&self, total_score: u64) -> bool {
        self.entries.len() < LEADERBOARD_CAP
            || self
                .entries
                .last()
                .is_some_and(|last| total_score > last.total_score)
    }

    /// Insert, keeping order and the cap
    pub fn add(&mut self, entry: LeaderEntry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then(a.total_time.total_cmp(&b.total_time))
        });
        self.entries.truncate(LEADERBOARD_CAP);
    }
}

fn load_or_default<T: Default + for<'de> Deserialize<'de>>(key: &str) -> T {
    let Some(raw) = platform::storage_get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("discarding corrupt data under {key}: {err}");
            T::default()
        }
    }
}

fn save_blob<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => platform::storage_set(key, &raw),
        Err(err) => log::warn!("failed to serialize {key}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64, time: f32) -> LeaderEntry {
        LeaderEntry {
            name: name.into(),
            total_score: score,
            total_time: time,
            date: "2026-08-24".into(),
        }
    }

    #[test]
    fn test_corrupt_progress_defaults() {
        let parsed: ProgressData = serde_json::from_str("{\"bogus\": true}").unwrap_or_default();
        assert_eq!(parsed.highest_unlocked_level, 0);
        assert_eq!(parsed.player_name, "PLAYER");
        assert!((parsed.settings.volume - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_partial_progress_fills_defaults() {
        // serde(default) keeps old blobs readable when fields are added
        let parsed: ProgressData =
            serde_json::from_str("{\"highest_unlocked_level\": 2}").unwrap();
        assert_eq!(parsed.highest_unlocked_level, 2);
        assert_eq!(parsed.best_total_score, 0);
    }

    #[test]
    fn test_record_level_result_keeps_bests() {
        let mut progress = ProgressData::default();
        progress.record_level_result(0, 800, 30.0, 3);
        progress.record_level_result(0, 600, 25.0, 3);
        assert_eq!(progress.best_score_per_level[&0], 800);
        assert_eq!(progress.fastest_time_per_level[&0], 25.0);
        assert_eq!(progress.highest_unlocked_level, 1);
    }

    #[test]
    fn test_unlock_caps_at_last_level() {
        let mut progress = ProgressData::default();
        progress.record_level_result(2, 500, 40.0, 3);
        assert_eq!(progress.highest_unlocked_level, 2);
    }

    #[test]
    fn test_leaderboard_orders_and_caps() {
        let mut board = Leaderboard::default();
        for i in 0..12u64 {
            board.add(entry("A", i * 100, 60.0));
        }
        assert_eq!(board.entries.len(), LEADERBOARD_CAP);
        assert_eq!(board.entries[0].total_score, 1100);
        assert_eq!(board.entries.last().unwrap().total_score, 200);
        // Tie on score breaks toward the faster time
        board.add(entry("B", 1100, 30.0));
        assert_eq!(board.entries[0].name, "B");
    }

    #[test]
    fn test_qualifies() {
        let mut board = Leaderboard::default();
        assert!(board.qualifies(0));
        for i in 0..10u64 {
            board.add(entry("A", (i + 1) * 100, 60.0));
        }
        assert!(!board.qualifies(100));
        assert!(board.qualifies(150));
    }
}
