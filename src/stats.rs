//! Per-episode training statistics
//!
//! Control runs record how long each episode took and how much undiscounted
//! reward it collected. The two traces share indexing: entry `i` of both
//! vectors describes episode `i`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Episode lengths and undiscounted episode rewards for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Number of transitions each episode took.
    pub lengths: Vec<usize>,
    /// Undiscounted reward sum of each episode.
    pub rewards: Vec<f64>,
}

impl EpisodeStats {
    /// Creates an empty record with room for `num_episodes` entries.
    pub fn with_capacity(num_episodes: usize) -> Self {
        Self {
            lengths: Vec::with_capacity(num_episodes),
            rewards: Vec::with_capacity(num_episodes),
        }
    }

    pub(crate) fn push_episode(&mut self, steps: usize, total_reward: f64) {
        self.lengths.push(steps);
        self.rewards.push(total_reward);
    }

    /// Number of recorded episodes.
    pub fn num_episodes(&self) -> usize {
        self.lengths.len()
    }

    /// Total transitions across all recorded episodes.
    pub fn total_steps(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Mean episode reward, 0.0 for an empty record.
    pub fn mean_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            return 0.0;
        }
        self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
    }

    /// Mean reward over the final `window` episodes.
    ///
    /// Useful for judging late-run behavior without the noisy early
    /// episodes. A window larger than the record covers the whole record.
    pub fn mean_reward_last(&self, window: usize) -> f64 {
        let start = self.rewards.len().saturating_sub(window);
        let tail = &self.rewards[start..];
        if tail.is_empty() {
            return 0.0;
        }
        tail.iter().sum::<f64>() / tail.len() as f64
    }

    /// Saves the record to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Loads a record from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let stats = serde_json::from_reader(file)?;
        Ok(stats)
    }
}
