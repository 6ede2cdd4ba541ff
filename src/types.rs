//! Shared primitive types for tabular learning
//!
//! Environments expose a fixed set of discrete actions, indexed from zero.
//! States stay fully generic: the algorithms only ever clone, compare, and
//! hash them, so a grid coordinate, an enum, or a canonical board label all
//! work as table keys.

/// Discrete action index in `[0, action_count)`.
pub type Action = usize;

/// Immediate scalar reward emitted by one environment step.
pub type Reward = f64;
