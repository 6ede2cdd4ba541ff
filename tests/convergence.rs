//! End-to-end convergence checks for all four algorithms.

mod common;

use common::{ChainWalk, ConstantReward};
use tabular_rl::{
    Environment, Error, McControl, McControlConfig, McPrediction, McPredictionConfig, QLearning,
    Result, Sarsa, Step, TdConfig,
};

#[test]
fn mc_prediction_estimates_constant_reward_exactly() {
    let config = McPredictionConfig::new(500).with_seed(13);
    let values = McPrediction::new(config)
        .run(&mut ConstantReward { reward: 2.5 }, |_: &()| 0)
        .unwrap();

    // Every episode's return is exactly 2.5, so the running average is too.
    assert_eq!(values.value(&()), 2.5);
    assert_eq!(values.len(), 1);
}

#[test]
fn mc_prediction_discounts_along_a_fixed_path() {
    // Always-right on a 3-cell corridor: the only trajectory is
    // 0 -> 1 -> 2 -> goal with a single terminal reward of 1.
    let config = McPredictionConfig::new(3)
        .with_discount_factor(0.5)
        .with_seed(1);
    let values = McPrediction::new(config)
        .run(&mut ChainWalk::new(3), |_: &usize| 1)
        .unwrap();

    assert_eq!(values.value(&0), 0.25);
    assert_eq!(values.value(&1), 0.5);
    assert_eq!(values.value(&2), 1.0);
}

#[test]
fn mc_control_learns_to_move_right() {
    let config = McControlConfig::new(2000)
        .with_discount_factor(0.9)
        .with_epsilon(0.1)
        .with_seed(17);
    let outcome = McControl::new(config).run(&mut ChainWalk::new(2)).unwrap();

    for state in 0..2 {
        assert!(
            outcome.q.value(&state, 1) > outcome.q.value(&state, 0),
            "state {state} should prefer moving right"
        );
    }
    assert!(outcome.greedy_values().value(&1) > 0.9);
}

#[test]
fn sarsa_greedy_policy_converges_on_the_chain() {
    let config = TdConfig::new(400)
        .with_discount_factor(0.9)
        .with_epsilon(0.05)
        .with_seed(23);
    let (q, stats) = Sarsa::new(config).run(&mut ChainWalk::new(2)).unwrap();

    assert_eq!(stats.num_episodes(), 400);
    for state in 0..2 {
        assert!(
            q.value(&state, 1) > q.value(&state, 0),
            "state {state} should prefer moving right"
        );
    }
}

#[test]
fn q_learning_greedy_policy_converges_on_the_chain() {
    let config = TdConfig::new(400)
        .with_discount_factor(0.9)
        .with_epsilon(0.05)
        .with_seed(23);
    let (q, stats) = QLearning::new(config).run(&mut ChainWalk::new(2)).unwrap();

    assert_eq!(stats.num_episodes(), 400);
    for state in 0..2 {
        assert!(
            q.value(&state, 1) > q.value(&state, 0),
            "state {state} should prefer moving right"
        );
    }
}

/// Environment whose very first step faults.
struct Disconnected;

impl Environment for Disconnected {
    type State = u8;

    fn reset(&mut self) -> Result<u8> {
        Ok(0)
    }

    fn step(&mut self, _action: usize) -> Result<Step<u8>> {
        Err(Error::Environment {
            context: "connection lost".to_string(),
        })
    }

    fn action_count(&self) -> usize {
        2
    }
}

#[test]
fn environment_fault_aborts_the_run() {
    let err = QLearning::new(TdConfig::new(10).with_seed(1))
        .run(&mut Disconnected)
        .unwrap_err();
    assert!(matches!(err, Error::Environment { .. }));

    let err = McControl::new(McControlConfig::new(10).with_seed(1))
        .run(&mut Disconnected)
        .unwrap_err();
    assert!(matches!(err, Error::Environment { .. }));
}
