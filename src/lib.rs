//! Tabular reinforcement learning over a stepwise environment port
//!
//! This crate implements four classic tabular algorithms:
//!
//! - **First-visit Monte Carlo prediction** ([`McPrediction`]) - estimates
//!   state values for a fixed policy from complete episodes
//! - **Monte Carlo control** ([`McControl`]) - learns action values and an
//!   epsilon-greedy policy by first-visit return averaging
//! - **SARSA** ([`Sarsa`]) - on-policy temporal-difference control
//! - **Q-learning** ([`QLearning`]) - off-policy temporal-difference control
//!
//! Environments are anything implementing the [`Environment`] port: reset
//! to an initial state, step through discrete actions, report rewards and
//! termination. States are generic hashable keys, so no state enumeration
//! is required up front.
//!
//! Exploration uses a shared epsilon-greedy policy ([`EpsilonGreedyPolicy`])
//! that borrows the live Q-table and breaks value ties uniformly at random
//! ([`argmax_random`]), redrawing the tie on every call.
//!
//! # Quick start
//!
//! ```
//! use tabular_rl::{Environment, QLearning, Step, TdConfig};
//!
//! /// One decision point: arm 1 pays out, arm 0 does not.
//! struct TwoArmedBandit;
//!
//! impl Environment for TwoArmedBandit {
//!     type State = ();
//!
//!     fn reset(&mut self) -> tabular_rl::Result<()> {
//!         Ok(())
//!     }
//!
//!     fn step(&mut self, action: usize) -> tabular_rl::Result<Step<()>> {
//!         Ok(Step {
//!             next_state: (),
//!             reward: if action == 1 { 1.0 } else { 0.0 },
//!             done: true,
//!         })
//!     }
//!
//!     fn action_count(&self) -> usize {
//!         2
//!     }
//! }
//!
//! let config = TdConfig::new(200).with_seed(7);
//! let (q, stats) = QLearning::new(config).run(&mut TwoArmedBandit)?;
//!
//! assert_eq!(stats.num_episodes(), 200);
//! assert!(q.value(&(), 1) > q.value(&(), 0));
//! # Ok::<(), tabular_rl::Error>(())
//! ```
//!
//! Training runs report progress through the [`TrainingObserver`] port;
//! [`observers`] ships a progress bar and an in-memory reward trace, and
//! [`export`] writes per-episode statistics to CSV for plotting elsewhere.

pub mod episode;
pub mod error;
pub mod export;
pub mod monte_carlo;
pub mod observers;
pub mod policy;
pub mod ports;
pub mod stats;
pub mod tables;
pub mod td;
pub mod types;

pub use error::{Error, Result};
pub use monte_carlo::{
    McControl, McControlConfig, McControlOutcome, McPrediction, McPredictionConfig,
};
pub use policy::{EpsilonGreedyPolicy, argmax_random};
pub use ports::{Environment, Step, TrainingObserver};
pub use stats::EpisodeStats;
pub use tables::{QTable, ReturnAccumulator, ValueTable};
pub use td::{QLearning, Sarsa, TdConfig};
