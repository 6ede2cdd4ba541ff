//! Value tables backing the tabular algorithms
//!
//! All three tables are thin wrappers over hash maps with explicit defaults:
//! a state (or state-action pair) that was never written reads as 0.0. The
//! algorithms rely on that default instead of pre-enumerating the state
//! space, so environments with unbounded or unknown state sets work without
//! any registration step.

use std::{collections::HashMap, hash::Hash};

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{policy::argmax_random, types::Action};

/// State-value table `V(s)` with a 0.0 default for unseen states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueTable<S: Eq + Hash> {
    values: HashMap<S, f64>,
}

impl<S: Eq + Hash> ValueTable<S> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Estimated value of `state`, 0.0 if the state was never written.
    pub fn value(&self, state: &S) -> f64 {
        self.values.get(state).copied().unwrap_or(0.0)
    }

    /// Stores the value estimate for `state`.
    pub fn set(&mut self, state: S, value: f64) {
        self.values.insert(state, value);
    }

    /// Iterates over all stored `(state, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> {
        self.values.iter().map(|(state, &value)| (state, value))
    }

    /// Number of states with a stored estimate.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no state has been written yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Eq + Hash> Default for ValueTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Action-value table `Q(s, a)` with zero-initialized rows.
///
/// Every state maps to a row of exactly `n_actions` values. Reading a state
/// that was never written behaves as if it held an all-zero row; writing to
/// such a state materializes the zero row first. Rows never change length,
/// so `Q(s, ·)` and the action-probability vectors derived from it always
/// agree on the action count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable<S: Eq + Hash> {
    values: HashMap<S, Vec<f64>>,
    n_actions: usize,
}

impl<S: Eq + Hash> QTable<S> {
    /// Creates an empty table whose rows hold `n_actions` entries.
    pub fn new(n_actions: usize) -> Self {
        Self {
            values: HashMap::new(),
            n_actions,
        }
    }

    /// Number of actions per row.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// The stored row for `state`, if any.
    pub fn row(&self, state: &S) -> Option<&[f64]> {
        self.values.get(state).map(Vec::as_slice)
    }

    /// Mutable access to the row for `state`, materializing a zero row for
    /// states seen for the first time.
    pub fn row_mut(&mut self, state: S) -> &mut [f64] {
        self.values
            .entry(state)
            .or_insert_with(|| vec![0.0; self.n_actions])
    }

    /// Estimated value of taking `action` in `state`.
    pub fn value(&self, state: &S, action: Action) -> f64 {
        match self.values.get(state) {
            Some(row) => row[action],
            None => 0.0,
        }
    }

    /// Stores the value estimate for one state-action pair.
    pub fn set(&mut self, state: S, action: Action, value: f64) {
        self.row_mut(state)[action] = value;
    }

    /// `max_a Q(state, a)`, 0.0 for states without a stored row.
    pub fn max_value(&self, state: &S) -> f64 {
        match self.values.get(state) {
            Some(row) => row.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            None => 0.0,
        }
    }

    /// A maximizing action for `state`, ties broken uniformly at random.
    ///
    /// States without a stored row behave as all-zero rows, where every
    /// action ties, so the draw is uniform over the whole action set.
    pub fn greedy_action(&self, state: &S, rng: &mut StdRng) -> Action {
        match self.values.get(state) {
            Some(row) => argmax_random(row, rng),
            None => rng.random_range(0..self.n_actions),
        }
    }

    /// Collapses the table into `V(s) = max_a Q(s, a)` over the stored rows.
    pub fn greedy_values(&self) -> ValueTable<S>
    where
        S: Clone,
    {
        let mut table = ValueTable::new();
        for (state, row) in &self.values {
            let best = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            table.set(state.clone(), best);
        }
        table
    }

    /// Iterates over all states with a stored row.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.values.keys()
    }

    /// Number of states with a stored row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no row has been materialized yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Running averages of first-visit returns, keyed by state or by
/// state-action pair.
///
/// `record` folds one more observed return into the average for its key and
/// hands the updated mean back, so Monte Carlo updates are a single call:
/// the caller writes the returned mean straight into its value table.
#[derive(Debug, Clone)]
pub struct ReturnAccumulator<K: Eq + Hash> {
    totals: HashMap<K, (f64, usize)>,
}

impl<K: Eq + Hash> ReturnAccumulator<K> {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            totals: HashMap::new(),
        }
    }

    /// Folds `return_value` into the average for `key` and returns the
    /// updated average.
    pub fn record(&mut self, key: K, return_value: f64) -> f64 {
        let (sum, count) = self.totals.entry(key).or_insert((0.0, 0));
        *sum += return_value;
        *count += 1;
        *sum / *count as f64
    }

    /// Number of returns recorded for `key`.
    pub fn count(&self, key: &K) -> usize {
        self.totals.get(key).map_or(0, |&(_, count)| count)
    }

    /// Current average for `key`, if any return was recorded.
    pub fn average(&self, key: &K) -> Option<f64> {
        self.totals
            .get(key)
            .map(|&(sum, count)| sum / count as f64)
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether no return has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl<K: Eq + Hash> Default for ReturnAccumulator<K> {
    fn default() -> Self {
        Self::new()
    }
}
