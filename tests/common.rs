//! Shared environment fixtures for the integration test suite.
#![allow(dead_code)]

use rand::rngs::StdRng;
use tabular_rl::{Environment, QTable, Result, Step};

/// One state, one action, fixed reward, immediate termination.
pub struct ConstantReward {
    pub reward: f64,
}

impl Environment for ConstantReward {
    type State = ();

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn step(&mut self, _action: usize) -> Result<Step<()>> {
        Ok(Step {
            next_state: (),
            reward: self.reward,
            done: true,
        })
    }

    fn action_count(&self) -> usize {
        1
    }
}

/// Deterministic corridor of `len` cells with a terminal goal past the end.
///
/// Action 1 moves right, action 0 moves left (clamped at cell 0). Entering
/// the goal cell pays 1.0 and ends the episode; every other transition pays
/// nothing. With a discount factor below 1 the shortest route is the only
/// optimal one, so a converged greedy policy moves right everywhere.
pub struct ChainWalk {
    len: usize,
    position: usize,
}

impl ChainWalk {
    pub fn new(len: usize) -> Self {
        Self { len, position: 0 }
    }
}

impl Environment for ChainWalk {
    type State = usize;

    fn reset(&mut self) -> Result<usize> {
        self.position = 0;
        Ok(self.position)
    }

    fn step(&mut self, action: usize) -> Result<Step<usize>> {
        if action == 1 {
            self.position += 1;
        } else {
            self.position = self.position.saturating_sub(1);
        }
        let done = self.position == self.len;
        Ok(Step {
            next_state: self.position,
            reward: if done { 1.0 } else { 0.0 },
            done,
        })
    }

    fn action_count(&self) -> usize {
        2
    }
}

/// The classic 4x12 cliff-walking gridworld.
///
/// The agent starts at the bottom-left corner and must reach the
/// bottom-right corner. Every move pays -1. The bottom row between start
/// and goal is a cliff: stepping into it pays -100 and teleports the agent
/// back to the start without ending the episode. Moves off the grid edge
/// leave the position unchanged on that axis.
///
/// Actions: 0 = up, 1 = right, 2 = down, 3 = left.
pub struct CliffGrid {
    position: (usize, usize),
}

pub const CLIFF_ROWS: usize = 4;
pub const CLIFF_COLS: usize = 12;

impl CliffGrid {
    pub const START: (usize, usize) = (3, 0);
    pub const GOAL: (usize, usize) = (3, 11);

    pub fn new() -> Self {
        Self {
            position: Self::START,
        }
    }

    fn is_cliff(cell: (usize, usize)) -> bool {
        cell.0 == 3 && cell.1 >= 1 && cell.1 <= 10
    }
}

impl Environment for CliffGrid {
    type State = (usize, usize);

    fn reset(&mut self) -> Result<(usize, usize)> {
        self.position = Self::START;
        Ok(self.position)
    }

    fn step(&mut self, action: usize) -> Result<Step<(usize, usize)>> {
        let (row, col) = self.position;
        let target = match action {
            0 => (row.saturating_sub(1), col),
            1 => (row, (col + 1).min(CLIFF_COLS - 1)),
            2 => ((row + 1).min(CLIFF_ROWS - 1), col),
            _ => (row, col.saturating_sub(1)),
        };

        if Self::is_cliff(target) {
            self.position = Self::START;
            return Ok(Step {
                next_state: self.position,
                reward: -100.0,
                done: false,
            });
        }

        self.position = target;
        Ok(Step {
            next_state: self.position,
            reward: -1.0,
            done: self.position == Self::GOAL,
        })
    }

    fn action_count(&self) -> usize {
        4
    }
}

/// Follows the greedy policy implied by `q` from a fresh reset.
///
/// Returns the undiscounted reward collected up to termination, or `None`
/// if the episode does not terminate within `max_steps`.
pub fn greedy_return<E: Environment>(
    env: &mut E,
    q: &QTable<E::State>,
    max_steps: usize,
    rng: &mut StdRng,
) -> Option<f64> {
    let mut state = env.reset().unwrap();
    let mut total = 0.0;
    for _ in 0..max_steps {
        let action = q.greedy_action(&state, rng);
        let step = env.step(action).unwrap();
        total += step.reward;
        if step.done {
            return Some(total);
        }
        state = step.next_state;
    }
    None
}
