//! First-visit Monte Carlo prediction and control
//!
//! Both algorithms learn from complete episodes: prediction averages
//! first-visit returns per state under a fixed policy, control averages
//! them per state-action pair while following an epsilon-greedy policy over
//! the table being learned. Policy improvement is interleaved with
//! evaluation at per-episode granularity, not batched.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    episode::{first_visit_returns, generate_episode},
    policy::{EpsilonGreedyPolicy, build_rng},
    ports::{Environment, TrainingObserver},
    tables::{QTable, ReturnAccumulator, ValueTable},
    types::Action,
};

/// Configuration for Monte Carlo prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McPredictionConfig {
    /// Number of episodes to sample.
    pub num_episodes: usize,
    /// Discount factor gamma in `[0, 1]`.
    pub discount_factor: f64,
    /// Step budget per episode; rollouts stop here even without `done`.
    pub max_steps_per_episode: usize,
    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for McPredictionConfig {
    fn default() -> Self {
        Self {
            num_episodes: 10_000,
            discount_factor: 1.0,
            max_steps_per_episode: 9_999,
            seed: None,
        }
    }
}

impl McPredictionConfig {
    /// Creates a configuration running `num_episodes` episodes with the
    /// default discount factor and step budget.
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

    pub fn with_max_steps_per_episode(mut self, max_steps_per_episode: usize) -> Self {
        self.max_steps_per_episode = max_steps_per_episode;
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
        if self.max_steps_per_episode == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_steps_per_episode must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// First-visit Monte Carlo prediction runner.
///
/// Estimates the state-value function of a fixed policy by averaging, per
/// state, the discounted returns observed at that state's first occurrence
/// within each episode.
pub struct McPrediction {
    config: McPredictionConfig,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl McPrediction {
    pub fn new(config: McPredictionConfig) -> Self {
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

    /// Runs prediction and returns the estimated state-value table.
    ///
    /// `policy` is the fixed rule being evaluated; it maps each state to
    /// the action to take there. The run samples exactly
    /// `config.num_episodes` episodes, with no early stopping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid
    /// configuration. Environment faults abandon the run and are
    /// propagated unmodified.
    pub fn run<E, P>(&mut self, env: &mut E, mut policy: P) -> Result<ValueTable<E::State>>
    where
        E: Environment,
        P: FnMut(&E::State) -> Action,
    {
        self.config.validate()?;
        let mut rng = build_rng(self.config.seed);
        let mut values = ValueTable::new();
        let mut returns: ReturnAccumulator<E::State> = ReturnAccumulator::new();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        for episode_idx in 0..self.config.num_episodes {
            let episode = generate_episode(
                env,
                |state, _| policy(state),
                self.config.max_steps_per_episode,
                &mut rng,
            )?;
            let steps = episode.len();
            let total_reward: f64 = episode.iter().map(|t| t.reward).sum();

            for (state, g) in
                first_visit_returns(&episode, self.config.discount_factor, |t| t.state.clone())
            {
                let mean = returns.record(state.clone(), g);
                values.set(state, mean);
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode_idx, steps, total_reward)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(values)
    }
}

/// Configuration for Monte Carlo control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McControlConfig {
    /// Number of episodes to sample.
    pub num_episodes: usize,
    /// Discount factor gamma in `[0, 1]`.
    pub discount_factor: f64,
    /// Exploration rate of the behavior policy, in `[0, 1]`.
    pub epsilon: f64,
    /// Step budget per episode; rollouts stop here even without `done`.
    pub max_steps_per_episode: usize,
    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for McControlConfig {
    fn default() -> Self {
        Self {
            num_episodes: 10_000,
            discount_factor: 1.0,
            epsilon: 0.1,
            max_steps_per_episode: 100,
            seed: None,
        }
    }
}

impl McControlConfig {
    /// Creates a configuration running `num_episodes` episodes with the
    /// default discount factor, exploration rate, and step budget.
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

    pub fn with_max_steps_per_episode(mut self, max_steps_per_episode: usize) -> Self {
        self.max_steps_per_episode = max_steps_per_episode;
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
        if self.max_steps_per_episode == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_steps_per_episode must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Result of a Monte Carlo control run: the learned Q-table plus the
/// exploration rate the behavior policy used.
///
/// The improving policy was a view over `q` during training; [`policy`]
/// hands back the same view over the final table.
///
/// [`policy`]: McControlOutcome::policy
#[derive(Debug)]
pub struct McControlOutcome<S: Eq + Hash> {
    /// Learned action-value table.
    pub q: QTable<S>,
    /// Exploration rate used during training.
    pub epsilon: f64,
}

impl<S: Eq + Hash> McControlOutcome<S> {
    /// Epsilon-greedy view over the learned table.
    pub fn policy(&self) -> EpsilonGreedyPolicy<'_, S> {
        EpsilonGreedyPolicy::new(&self.q, self.epsilon)
    }

    /// State values implied by acting greedily on the learned table.
    pub fn greedy_values(&self) -> ValueTable<S>
    where
        S: Clone,
    {
        self.q.greedy_values()
    }
}

/// First-visit Monte Carlo control runner with an epsilon-greedy policy.
///
/// Each episode is sampled under the policy implied by the current Q-table;
/// each first-visited (state, action) pair then has its return folded into
/// the table. The next episode's policy reflects those updates because the
/// policy is derived from the live table, never cached.
pub struct McControl {
    config: McControlConfig,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl McControl {
    pub fn new(config: McControlConfig) -> Self {
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

    /// Runs control and returns the learned table and policy.
    ///
    /// The run samples exactly `config.num_episodes` episodes, with no
    /// early stopping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid
    /// configuration. Environment faults abandon the run and are
    /// propagated unmodified.
    pub fn run<E>(&mut self, env: &mut E) -> Result<McControlOutcome<E::State>>
    where
        E: Environment,
    {
        self.config.validate()?;
        let mut rng = build_rng(self.config.seed);
        let mut q = QTable::new(env.action_count());
        let mut returns: ReturnAccumulator<(E::State, Action)> = ReturnAccumulator::new();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        for episode_idx in 0..self.config.num_episodes {
            let episode = {
                let policy = EpsilonGreedyPolicy::new(&q, self.config.epsilon);
                generate_episode(
                    env,
                    |state, rng| policy.sample(state, rng),
                    self.config.max_steps_per_episode,
                    &mut rng,
                )?
            };
            let steps = episode.len();
            let total_reward: f64 = episode.iter().map(|t| t.reward).sum();

            for ((state, action), g) in
                first_visit_returns(&episode, self.config.discount_factor, |t| {
                    (t.state.clone(), t.action)
                })
            {
                let mean = returns.record((state.clone(), action), g);
                q.set(state, action, mean);
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode_idx, steps, total_reward)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(McControlOutcome {
            q,
            epsilon: self.config.epsilon,
        })
    }
}
