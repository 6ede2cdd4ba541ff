//! Epsilon-greedy action selection with randomized tie-breaking
//!
//! The policy here is a view, not a copy: it borrows a live Q-table and
//! derives action probabilities from whatever the table holds at call time.
//! Control algorithms therefore never rebuild or synchronize a policy after
//! an update; the next lookup simply sees the new values.

use std::hash::Hash;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{tables::QTable, types::Action};

/// Index of a maximal element of `values`, ties broken uniformly at random.
///
/// The tie-break is redrawn on every call: repeated calls with the same
/// tied slice move the winner between the tied indices instead of settling
/// on the lowest one.
pub fn argmax_random(values: &[f64], rng: &mut StdRng) -> Action {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<Action> = values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| (value == max).then_some(index))
        .collect();
    *tied
        .choose(rng)
        .expect("argmax requires a non-empty value slice")
}

/// Epsilon-greedy policy derived from a borrowed Q-table.
///
/// At every state the policy gives each action a baseline probability of
/// `epsilon / n` and moves the remaining `1 - epsilon` onto one greedy
/// action. The greedy action is picked with [`argmax_random`], so states
/// whose Q-row holds ties yield a different distribution from call to call
/// while always summing to 1.
#[derive(Debug)]
pub struct EpsilonGreedyPolicy<'a, S: Eq + Hash> {
    q: &'a QTable<S>,
    epsilon: f64,
}

impl<'a, S: Eq + Hash> EpsilonGreedyPolicy<'a, S> {
    /// Wraps `q` in an epsilon-greedy view with exploration rate `epsilon`.
    pub fn new(q: &'a QTable<S>, epsilon: f64) -> Self {
        Self { q, epsilon }
    }

    /// Exploration rate of this view.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Action-probability vector at `state`.
    ///
    /// The vector has exactly `n_actions` entries, each at least
    /// `epsilon / n_actions`, and sums to 1. States without a stored Q-row
    /// read as all-zero rows, where every action ties for the greedy bonus.
    pub fn distribution(&self, state: &S, rng: &mut StdRng) -> Vec<f64> {
        let n = self.q.n_actions();
        let mut probs = vec![self.epsilon / n as f64; n];
        probs[self.q.greedy_action(state, rng)] += 1.0 - self.epsilon;
        probs
    }

    /// Samples one action from the distribution at `state`.
    pub fn sample(&self, state: &S, rng: &mut StdRng) -> Action {
        sample_indexed(&self.distribution(state, rng), rng)
    }
}

/// Draws an index from a probability vector via a cumulative threshold scan.
fn sample_indexed(probs: &[f64], rng: &mut StdRng) -> Action {
    let mut threshold: f64 = rng.random();
    for (index, &p) in probs.iter().enumerate() {
        if threshold < p {
            return index;
        }
        threshold -= p;
    }
    // Rounding can leave a sliver of threshold after the last entry.
    probs.len() - 1
}

/// Seeded generator for reproducible runs, entropy-seeded otherwise.
pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}
