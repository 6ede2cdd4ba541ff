//! Episode generation and discounted-return computation
//!
//! Monte Carlo methods work on whole recorded episodes. This module rolls
//! an environment out under an arbitrary selection rule and turns the
//! recorded transitions into first-visit returns.

use std::{
    collections::HashSet,
    hash::Hash,
};

use rand::rngs::StdRng;

use crate::{
    Result,
    ports::{Environment, Step},
    types::{Action, Reward},
};

/// One recorded transition: the state an action was taken in, the action,
/// and the immediate reward it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub state: S,
    pub action: Action,
    pub reward: Reward,
}

/// A completed rollout, in transition order.
pub type Episode<S> = Vec<Transition<S>>;

/// Rolls out one episode and records every transition.
///
/// Starting from `env.reset()`, each step asks `select` for an action,
/// applies it, and appends the resulting transition. The rollout stops when
/// the environment signals `done` or after `max_steps` transitions,
/// whichever comes first, so episodes on non-terminating environments stay
/// bounded.
///
/// # Errors
///
/// Environment faults from `reset` or `step` are propagated unmodified and
/// abandon the rollout.
pub fn generate_episode<E, F>(
    env: &mut E,
    mut select: F,
    max_steps: usize,
    rng: &mut StdRng,
) -> Result<Episode<E::State>>
where
    E: Environment,
    F: FnMut(&E::State, &mut StdRng) -> Action,
{
    let mut episode = Vec::new();
    let mut state = env.reset()?;
    for _ in 0..max_steps {
        let action = select(&state, rng);
        let Step {
            next_state,
            reward,
            done,
        } = env.step(action)?;
        episode.push(Transition {
            state,
            action,
            reward,
        });
        if done {
            break;
        }
        state = next_state;
    }
    Ok(episode)
}

/// Discounted return from every index of an episode.
///
/// `returns[t] = reward[t] + discount_factor * returns[t + 1]`, computed in
/// a single backward sweep.
pub fn suffix_returns<S>(episode: &[Transition<S>], discount_factor: f64) -> Vec<f64> {
    let mut returns = vec![0.0; episode.len()];
    let mut g = 0.0;
    for t in (0..episode.len()).rev() {
        g = episode[t].reward + discount_factor * g;
        returns[t] = g;
    }
    returns
}

/// First-visit returns of an episode, keyed by `key_of`.
///
/// Yields one `(key, return)` pair per distinct key, in first-occurrence
/// order, where the return is the discounted suffix starting at that key's
/// first occurrence. Later occurrences of the same key contribute to the
/// suffix but never produce a pair of their own.
pub fn first_visit_returns<S, K, F>(
    episode: &[Transition<S>],
    discount_factor: f64,
    mut key_of: F,
) -> Vec<(K, f64)>
where
    K: Clone + Eq + Hash,
    F: FnMut(&Transition<S>) -> K,
{
    let returns = suffix_returns(episode, discount_factor);
    let mut seen = HashSet::new();
    let mut firsts = Vec::new();
    for (t, transition) in episode.iter().enumerate() {
        let key = key_of(transition);
        if seen.insert(key.clone()) {
            firsts.push((key, returns[t]));
        }
    }
    firsts
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::Error;

    struct Countdown {
        remaining: u32,
    }

    impl Environment for Countdown {
        type State = u32;

        fn reset(&mut self) -> Result<u32> {
            self.remaining = 3;
            Ok(self.remaining)
        }

        fn step(&mut self, _action: Action) -> Result<Step<u32>> {
            self.remaining -= 1;
            Ok(Step {
                next_state: self.remaining,
                reward: 1.0,
                done: self.remaining == 0,
            })
        }

        fn action_count(&self) -> usize {
            1
        }
    }

    struct FaultyStep;

    impl Environment for FaultyStep {
        type State = u8;

        fn reset(&mut self) -> Result<u8> {
            Ok(0)
        }

        fn step(&mut self, _action: Action) -> Result<Step<u8>> {
            Err(Error::Environment {
                context: "simulator disconnected".to_string(),
            })
        }

        fn action_count(&self) -> usize {
            1
        }
    }

    fn pick_zero(_state: &u32, _rng: &mut StdRng) -> Action {
        0
    }

    #[test]
    fn rollout_records_until_done() {
        let mut rng = StdRng::seed_from_u64(0);
        let episode = generate_episode(&mut Countdown { remaining: 0 }, pick_zero, 100, &mut rng)
            .unwrap();

        let states: Vec<u32> = episode.iter().map(|t| t.state).collect();
        assert_eq!(states, vec![3, 2, 1]);
        assert!(episode.iter().all(|t| t.reward == 1.0));
    }

    #[test]
    fn rollout_respects_step_cap() {
        let mut rng = StdRng::seed_from_u64(0);
        let episode =
            generate_episode(&mut Countdown { remaining: 0 }, pick_zero, 2, &mut rng).unwrap();
        assert_eq!(episode.len(), 2);
    }

    #[test]
    fn rollout_propagates_environment_fault() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = generate_episode(&mut FaultyStep, |_: &u8, _: &mut StdRng| 0, 10, &mut rng);
        assert!(matches!(result, Err(Error::Environment { .. })));
    }

    #[test]
    fn suffix_returns_discount_backwards() {
        let episode = vec![
            Transition { state: 0u8, action: 0, reward: 1.0 },
            Transition { state: 1u8, action: 0, reward: 2.0 },
            Transition { state: 2u8, action: 0, reward: 3.0 },
        ];
        assert_eq!(suffix_returns(&episode, 0.5), vec![2.75, 3.5, 3.0]);
        assert_eq!(suffix_returns(&episode, 0.0), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn repeated_state_keeps_first_occurrence_return() {
        // s0 recurs at index 2; its return must be the full suffix from
        // index 0 (1 + 2 + 3 = 6), not the later suffix (3).
        let episode = vec![
            Transition { state: "s0", action: 0, reward: 1.0 },
            Transition { state: "s1", action: 1, reward: 2.0 },
            Transition { state: "s0", action: 2, reward: 3.0 },
        ];

        let firsts = first_visit_returns(&episode, 1.0, |t| t.state);
        assert_eq!(firsts, vec![("s0", 6.0), ("s1", 5.0)]);
    }

    #[test]
    fn state_action_keys_split_repeated_states() {
        let episode = vec![
            Transition { state: "s0", action: 0, reward: 1.0 },
            Transition { state: "s0", action: 1, reward: 2.0 },
            Transition { state: "s0", action: 0, reward: 4.0 },
        ];

        let firsts = first_visit_returns(&episode, 1.0, |t| (t.state, t.action));
        assert_eq!(firsts, vec![(("s0", 0), 7.0), (("s0", 1), 6.0)]);
    }

    #[test]
    fn empty_episode_has_no_returns() {
        let episode: Episode<u8> = Vec::new();
        assert!(suffix_returns(&episode, 1.0).is_empty());
        assert!(first_visit_returns(&episode, 1.0, |t| t.state).is_empty());
    }
}
