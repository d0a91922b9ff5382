//! Run bookkeeping
//!
//! The kernel emits events without ever touching a score; this layer
//! folds those events into per-level and run totals, applies the
//! completion and time bonuses, and grades the finished run.

use crate::consts::*;
use crate::sim::GameEvent;

/// Medal awarded for a finished run, by total score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_score(total_score: u64) -> Self {
        if total_score > 5000 {
            Medal::Gold
        } else if total_score > 3500 {
            Medal::Silver
        } else {
            Medal::Bronze
        }
    }
}

/// What a finished level was worth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    /// Everything earned within the level, bonuses included
    pub level_score: u64,
    pub time_bonus: u64,
}

/// Score and time accumulator for one run across the level set
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Index of the level currently being played
    pub level_index: usize,
    /// Score earned within the current level so far
    pub level_score: u64,
    pub total_score: u64,
    /// Completion time of each finished level, in play order
    pub level_times: Vec<f32>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one simulation event into the running score
    pub fn apply_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyDefeated => self.add(ENEMY_DEFEAT_SCORE),
            GameEvent::ItemCollected { value, .. } => self.add(u64::from(*value)),
            _ => {}
        }
    }

    /// Close out the current level: completion bonus plus the time bonus
    /// for finishing under the level's target
    pub fn finish_level(&mut self, time: f32, time_target: f32) -> LevelOutcome {
        let bonus = time_bonus(time, time_target);
        self.add(COMPLETION_BONUS + bonus);
        let outcome = LevelOutcome {
            level_score: self.level_score,
            time_bonus: bonus,
        };
        self.level_times.push(time);
        self.level_index += 1;
        self.level_score = 0;
        outcome
    }

    /// Sum of all finished level times
    pub fn total_time(&self) -> f32 {
        self.level_times.iter().sum()
    }

    fn add(&mut self, points: u64) {
        self.level_score += points;
        self.total_score += points;
    }
}

/// Points for finishing under the target: 10 per second of margin,
/// floored, never negative
fn time_bonus(time: f32, time_target: f32) -> u64 {
    ((time_target - time) * TIME_BONUS_RATE).floor().max(0.0) as u64
}
