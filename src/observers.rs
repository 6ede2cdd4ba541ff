//! Observer implementations for training runs
//!
//! Adapters for the [`TrainingObserver`] port: a progress bar for
//! interactive use and an in-memory reward trace for learning curves.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, Result, ports::TrainingObserver, stats::EpisodeStats};

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    reward_sum: f64,
    episodes: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            reward_sum: 0.0,
            episodes: 0,
        }
    }

    fn mean_reward(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.reward_sum / self.episodes as f64
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, _steps: usize, total_reward: f64) -> Result<()> {
        self.reward_sum += total_reward;
        self.episodes += 1;

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("avg reward {:.1}", self.mean_reward()));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("avg reward {:.1}", self.mean_reward()));
        }
        Ok(())
    }
}

/// Reward trace observer - collects per-episode statistics in memory
///
/// The runner takes ownership of its observers, so the trace lives behind a
/// shared handle: grab one with [`RewardTraceObserver::handle`] before
/// attaching the observer, then read the statistics out after the run.
///
/// # Examples
///
/// ```
/// use tabular_rl::observers::RewardTraceObserver;
///
/// let observer = RewardTraceObserver::new();
/// let trace = observer.handle();
/// // attach `observer` to a runner, train, then:
/// assert_eq!(trace.lock().unwrap().num_episodes(), 0);
/// ```
pub struct RewardTraceObserver {
    trace: Arc<Mutex<EpisodeStats>>,
}

impl RewardTraceObserver {
    /// Create a new reward trace observer
    pub fn new() -> Self {
        Self {
            trace: Arc::new(Mutex::new(EpisodeStats::default())),
        }
    }

    /// Shared handle to the statistics being collected.
    pub fn handle(&self) -> Arc<Mutex<EpisodeStats>> {
        Arc::clone(&self.trace)
    }
}

impl Default for RewardTraceObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for RewardTraceObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let mut trace = self.trace.lock().map_err(|_| Error::InvalidConfiguration {
            message: "reward trace observer failed to lock its trace".to_string(),
        })?;
        *trace = EpisodeStats::with_capacity(total_episodes);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, steps: usize, total_reward: f64) -> Result<()> {
        let mut trace = self.trace.lock().map_err(|_| Error::InvalidConfiguration {
            message: "reward trace observer failed to lock its trace".to_string(),
        })?;
        trace.push_episode(steps, total_reward);
        Ok(())
    }
}
