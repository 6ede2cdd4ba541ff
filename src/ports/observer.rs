//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events, allowing
//! composable progress reporting and metric collection without coupling the
//! algorithm runners to specific output formats.

use crate::Result;

/// Observer trait for monitoring a training run
///
/// Observers can be composed to collect different kinds of data while an
/// algorithm trains. Examples include:
/// - Progress bars for user feedback
/// - Reward traces for learning curves
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. `on_episode_end(episode, steps, total_reward)` - Once per episode
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```
/// use tabular_rl::TrainingObserver;
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl TrainingObserver for EpisodeCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         _steps: usize,
///         _total_reward: f64,
///     ) -> tabular_rl::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait TrainingObserver: Send {
    /// Called when training starts.
    ///
    /// # Parameters
    ///
    /// * `total_episodes` - Number of episodes the run will generate
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode completes.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the completed episode (0-based)
    /// * `steps` - Number of transitions the episode took
    /// * `total_reward` - Undiscounted sum of the episode's rewards
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record per-episode data.
    fn on_episode_end(&mut self, _episode: usize, _steps: usize, _total_reward: f64) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to perform cleanup or final reporting.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
