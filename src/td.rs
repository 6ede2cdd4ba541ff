//! Temporal-difference control: SARSA and Q-learning
//!
//! Both algorithms learn action values one transition at a time by
//! bootstrapping from the successor state instead of waiting for complete
//! episodes. They share everything except the bootstrap target:
//!
//! | Aspect | SARSA | Q-learning |
//! |--------|-------|------------|
//! | Policy | On-policy, learns the followed policy | Off-policy, learns Q* |
//! | Target | `Q(s', a')` for the sampled `a'` | `max_a Q(s', a)` |
//!
//! Episodes here have no step budget. The inner loop runs until the
//! environment signals `done`, so a non-terminating environment makes the
//! run unbounded; bounding it is the environment's job.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    policy::{EpsilonGreedyPolicy, build_rng},
    ports::{Environment, Step, TrainingObserver},
    stats::EpisodeStats,
    tables::QTable,
};

/// Configuration shared by the TD control algorithms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdConfig {
    /// Number of episodes to run.
    pub num_episodes: usize,
    /// Discount factor gamma in `[0, 1]`.
    pub discount_factor: f64,
    /// Exploration rate of the behavior policy, in `[0, 1]`.
    pub epsilon: f64,
    /// Learning rate in `(0, 1]`.
    pub alpha: f64,
    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            num_episodes: 500,
            discount_factor: 1.0,
            epsilon: 0.1,
            alpha: 0.5,
            seed: None,
        }
    }
}

impl TdConfig {
    /// Creates a configuration running `num_episodes` episodes with the
    /// default discount factor, exploration rate, and learning rate.
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            ..Self::default()
        }
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any field is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.num_episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "num_episodes must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "discount_factor must lie in [0, 1], got {}",
                    self.discount_factor
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon must lie in [0, 1], got {}", self.epsilon),
            });
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("alpha must lie in (0, 1], got {}", self.alpha),
            });
        }
        Ok(())
    }
}

/// SARSA runner: on-policy TD(0) control.
///
/// Update rule, applied once per transition:
///
/// `Q(s, a) += alpha * (r + gamma * Q(s', a') - Q(s, a))`
///
/// where `a'` is the action the epsilon-greedy policy actually sampled at
/// `s'`. The bootstrap term reads the table at `s'` even on terminal
/// transitions; a terminal state has no stored row and contributes zero
/// unless the environment reuses its label for a non-terminal state.
pub struct Sarsa {
    config: TdConfig,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl Sarsa {
    pub fn new(config: TdConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Attaches an observer notified once per episode.
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Runs SARSA and returns the learned table with per-episode statistics.
    ///
    /// The run completes exactly `config.num_episodes` episodes; the
    /// statistics hold one length entry and one reward entry per episode,
    /// in completion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid
    /// configuration. Environment faults abandon the run and are
    /// propagated unmodified.
    pub fn run<E>(&mut self, env: &mut E) -> Result<(QTable<E::State>, EpisodeStats)>
    where
        E: Environment,
    {
        self.config.validate()?;
        let mut rng = build_rng(self.config.seed);
        let mut q = QTable::new(env.action_count());
        let mut stats = EpisodeStats::with_capacity(self.config.num_episodes);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        for episode_idx in 0..self.config.num_episodes {
            let mut state = env.reset()?;
            let mut action =
                EpsilonGreedyPolicy::new(&q, self.config.epsilon).sample(&state, &mut rng);
            let mut steps = 0usize;
            let mut total_reward = 0.0;

            loop {
                let Step {
                    next_state,
                    reward,
                    done,
                } = env.step(action)?;
                steps += 1;
                total_reward += reward;

                let next_action =
                    EpsilonGreedyPolicy::new(&q, self.config.epsilon).sample(&next_state, &mut rng);
                let current = q.value(&state, action);
                let td_target =
                    reward + self.config.discount_factor * q.value(&next_state, next_action);
                let td_error = td_target - current;
                q.set(state, action, current + self.config.alpha * td_error);

                if done {
                    break;
                }
                state = next_state;
                action = next_action;
            }

            stats.push_episode(steps, total_reward);
            for observer in &mut self.observers {
                observer.on_episode_end(episode_idx, steps, total_reward)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok((q, stats))
    }
}

/// Q-learning runner: off-policy TD(0) control.
///
/// Update rule, applied once per transition:
///
/// `Q(s, a) += alpha * (r + gamma * max_a' Q(s', a') - Q(s, a))`
///
/// The maximizing action is picked with the randomized tie-break, so early
/// training does not systematically favor low action indices. Behavior is
/// epsilon-greedy while the target stays greedy, which is what makes the
/// method off-policy.
pub struct QLearning {
    config: TdConfig,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl QLearning {
    pub fn new(config: TdConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Attaches an observer notified once per episode.
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Runs Q-learning and returns the learned table with per-episode
    /// statistics.
    ///
    /// The run completes exactly `config.num_episodes` episodes; the
    /// statistics hold one length entry and one reward entry per episode,
    /// in completion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid
    /// configuration. Environment faults abandon the run and are
    /// propagated unmodified.
    pub fn run<E>(&mut self, env: &mut E) -> Result<(QTable<E::State>, EpisodeStats)>
    where
        E: Environment,
    {
        self.config.validate()?;
        let mut rng = build_rng(self.config.seed);
        let mut q = QTable::new(env.action_count());
        let mut stats = EpisodeStats::with_capacity(self.config.num_episodes);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        for episode_idx in 0..self.config.num_episodes {
            let mut state = env.reset()?;
            let mut steps = 0usize;
            let mut total_reward = 0.0;

            loop {
                let action =
                    EpsilonGreedyPolicy::new(&q, self.config.epsilon).sample(&state, &mut rng);
                let Step {
                    next_state,
                    reward,
                    done,
                } = env.step(action)?;
                steps += 1;
                total_reward += reward;

                let best_next = q.greedy_action(&next_state, &mut rng);
                let current = q.value(&state, action);
                let td_target =
                    reward + self.config.discount_factor * q.value(&next_state, best_next);
                let td_error = td_target - current;
                q.set(state, action, current + self.config.alpha * td_error);

                if done {
                    break;
                }
                state = next_state;
            }

            stats.push_episode(steps, total_reward);
            for observer in &mut self.observers {
                observer.on_episode_end(episode_idx, steps, total_reward)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok((q, stats))
    }
}
