//! Environment port - the simulation boundary consumed by every algorithm
//!
//! An environment is an episodic, resettable simulator with a fixed number
//! of discrete actions. The algorithms drive it through `reset` and `step`
//! and never look inside: states are opaque table keys, rewards are plain
//! scalars.

use std::hash::Hash;

use crate::{
    Result,
    types::{Action, Reward},
};

/// Result of advancing an environment by one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    /// State the environment transitioned into.
    pub next_state: S,
    /// Immediate reward for the transition.
    pub reward: Reward,
    /// Whether this transition ended the episode.
    pub done: bool,
}

/// Stepwise simulation environment with a discrete action space.
///
/// # Contract
///
/// * `reset` starts a fresh episode and returns its initial state.
/// * `step` applies one action and reports the successor state, the reward,
///   and whether the episode just ended. Implementations may keep emitting
///   transitions after `done` or may refuse with an error; the algorithms
///   in this crate stop at the first `done` and call `reset` before the
///   next episode, so they never step a finished episode.
/// * `action_count` is fixed for the lifetime of the environment and must
///   be at least 1. Every action index in `[0, action_count)` is accepted
///   in every state.
///
/// # Examples
///
/// ```
/// use tabular_rl::{Environment, Step};
///
/// /// Two positions; action 1 advances, action 0 stays put.
/// struct TwoCell {
///     position: usize,
/// }
///
/// impl Environment for TwoCell {
///     type State = usize;
///
///     fn reset(&mut self) -> tabular_rl::Result<usize> {
///         self.position = 0;
///         Ok(self.position)
///     }
///
///     fn step(&mut self, action: usize) -> tabular_rl::Result<Step<usize>> {
///         if action == 1 {
///             self.position += 1;
///         }
///         Ok(Step {
///             next_state: self.position,
///             reward: -1.0,
///             done: self.position == 1,
///         })
///     }
///
///     fn action_count(&self) -> usize {
///         2
///     }
/// }
/// ```
pub trait Environment {
    /// State representation used to key value tables.
    type State: Clone + Eq + Hash;

    /// Begins a new episode and returns its initial state.
    ///
    /// # Errors
    ///
    /// Returns an error when the simulator cannot produce a fresh episode.
    fn reset(&mut self) -> Result<Self::State>;

    /// Applies `action` and advances the episode by one transition.
    ///
    /// # Errors
    ///
    /// Returns an error when the simulator faults; algorithm runners
    /// propagate it unmodified and abandon the run.
    fn step(&mut self, action: Action) -> Result<Step<Self::State>>;

    /// Number of discrete actions available in every state.
    fn action_count(&self) -> usize;
}
