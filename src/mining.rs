// src/mining.rs

//! Block-reward lottery. There are no real blocks or hashes here: each step
//! one miner wins newly issued coins with probability proportional to its
//! hash power.

use crate::agents::agent::Agent;
use crate::config::SimConfig;
use crate::types::order::AgentId;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};

/// `initial_reward / step^decay_exponent`: shrinks towards zero without ever
/// getting there, a smooth stand-in for halvings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardSchedule {
    pub initial_reward: f64,
    pub decay_exponent: f64,
}

impl RewardSchedule {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            initial_reward: config.initial_reward,
            decay_exponent: config.reward_decay_exponent,
        }
    }

    /// Steps are counted from 1; step 0 pays the same as step 1.
    pub fn reward_at(&self, step: u64) -> f64 {
        self.initial_reward / (step.max(1) as f64).powf(self.decay_exponent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockOutcome {
    pub winner: AgentId,
    /// Position of the winner in the miner population.
    pub index: usize,
    pub reward: f64,
}

/// Runs the lottery and credits the winner.
///
/// Returns `None` (and issues nothing) when there is nobody to win: no
/// miners, or no miner with any power.
pub fn mine<R: Rng + ?Sized>(miners: &mut [Agent], reward: f64, rng: &mut R) -> Option<BlockOutcome> {
    if miners.is_empty() {
        return None;
    }
    let lottery = WeightedIndex::new(miners.iter().map(Agent::mining_power)).ok()?;
    let index = lottery.sample(rng);
    let winner = &mut miners[index];
    winner.receive_reward(reward);
    Some(BlockOutcome {
        winner: winner.id(),
        index,
        reward,
    })
}

/// Each miner's share of total hash power, largest first.
pub fn hash_power_snapshot(miners: &[Agent]) -> Vec<f64> {
    let total: f64 = miners.iter().map(Agent::mining_power).sum();
    if !(total > 0.0) {
        return Vec::new();
    }
    let mut shares: Vec<f64> = miners.iter().map(|m| m.mining_power() / total).collect();
    shares.sort_by(|a, b| b.total_cmp(a));
    shares
}
