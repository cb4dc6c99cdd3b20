//! Per-generation training statistics.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::entity::Player;

/// Outcome of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// 1-based generation number.
    pub generation: u32,
    /// Ticks the generation lasted.
    pub ticks: u64,
    /// Best score reached this generation.
    pub best_score: i32,
    /// Best level reached this generation.
    pub best_level: u32,
    /// Best score over all generations so far.
    pub best_score_overall: i32,
    /// Best level over all generations so far.
    pub best_level_overall: u32,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Done with generation {} after {} ticks", self.generation, self.ticks)?;
        writeln!(
            f,
            "Best score in generation (best total): {} ({})",
            self.best_score, self.best_score_overall
        )?;
        write!(
            f,
            "Best level in generation (best total): {} ({})",
            self.best_level, self.best_level_overall
        )
    }
}

/// All-time bests plus a bounded history of recent generations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Best score over all generations.
    pub best_score_overall: i32,
    /// Best level over all generations.
    pub best_level_overall: u32,
    /// Recent generations, oldest first.
    pub history: VecDeque<GenerationSummary>,
    /// Maximum number of generations kept in `history`.
    pub max_history: usize,
}

impl Default for TrainingStats {
    fn default() -> Self {
        Self {
            best_score_overall: 0,
            best_level_overall: 0,
            history: VecDeque::new(),
            max_history: 500,
        }
    }
}

impl TrainingStats {
    /// Folds a finished generation into the statistics.
    pub fn record(&mut self, generation: u32, ticks: u64, players: &[Player]) -> GenerationSummary {
        let best_score = players.iter().map(|p| p.score).max().unwrap_or(0).max(0);
        let best_level = players.iter().map(|p| p.body.level).max().unwrap_or(0);

        self.best_score_overall = self.best_score_overall.max(best_score);
        self.best_level_overall = self.best_level_overall.max(best_level);

        let summary = GenerationSummary {
            generation,
            ticks,
            best_score,
            best_level,
            best_score_overall: self.best_score_overall,
            best_level_overall: self.best_level_overall,
        };

        self.history.push_back(summary);
        if self.history.len() > self.max_history {
            self.history.pop_front();
        }

        summary
    }

    /// The most recent generation, if any finished yet.
    pub fn latest(&self) -> Option<&GenerationSummary> {
        self.history.back()
    }
}
