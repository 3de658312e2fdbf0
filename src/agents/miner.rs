// src/agents/miner.rs

//! Miners earn block rewards in proportion to their hash power and mostly
//! sell what they dig up.

use super::config::{MINER_BUY_MOODS, MINER_SELL_MOODS, MOOD_RANGE};
use super::pricing::{noisy_buy, noisy_sell};
use crate::config::{AgentParams, MinerParams};
use crate::types::order::OrderIntent;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct MinerState {
    mining_power: f64,
    investment_rate: f64,
    upgrade_probability: f64,
    power_scale: f64,
    power_exponent: f64,
}

impl MinerState {
    pub fn new(params: &MinerParams) -> Self {
        Self {
            mining_power: params.base_power,
            investment_rate: params.investment_rate,
            upgrade_probability: params.upgrade_probability,
            power_scale: params.power_scale,
            power_exponent: params.power_exponent,
        }
    }

    pub fn mining_power(&self) -> f64 {
        self.mining_power
    }

    /// Hash power bought by sinking `invested` capital into equipment.
    /// Superlinear: doubling the spend more than doubles the power.
    pub fn power_for_investment(&self, invested: f64) -> f64 {
        if invested <= 0.0 {
            return 0.0;
        }
        (invested / self.power_scale).powf(self.power_exponent)
    }

    /// With small probability, sinks `g·capital` into equipment.
    /// Returns `(capital_spent, power_gained)` when an upgrade happens.
    pub fn assess_equipment<R: Rng + ?Sized>(
        &mut self,
        capital: f64,
        rng: &mut R,
    ) -> Option<(f64, f64)> {
        if !rng.gen_bool(self.upgrade_probability) {
            return None;
        }
        let spent = self.investment_rate * capital.max(0.0);
        if spent <= 0.0 {
            return None;
        }
        let gained = self.power_for_investment(spent);
        self.mining_power += gained;
        Some((spent, gained))
    }
}

pub fn propose_order<R: Rng + ?Sized>(
    capital: f64,
    coins: f64,
    params: &AgentParams,
    price: f64,
    rng: &mut R,
) -> OrderIntent {
    let mood = rng.gen_range(0..MOOD_RANGE);
    if mood < MINER_BUY_MOODS {
        noisy_buy(capital, params, price, rng)
    } else if mood < MINER_BUY_MOODS + MINER_SELL_MOODS {
        noisy_sell(coins, params, price, rng)
    } else {
        OrderIntent::NoTrade
    }
}
