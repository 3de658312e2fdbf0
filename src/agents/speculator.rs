// src/agents/speculator.rs

//! Momentum traders. A speculator keeps a short rolling window of prices and
//! buys while growth over that window looks "fair", dumping otherwise.

use super::config::{MOOD_RANGE, SPECULATOR_IDLE_MOOD};
use super::pricing::{noisy_buy, noisy_sell};
use crate::config::{AgentParams, SpeculatorParams};
use crate::types::order::OrderIntent;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeculatorState {
    window: VecDeque<f64>,
    window_len: usize,
    min_growth: f64,
    max_growth: f64,
}

impl SpeculatorState {
    pub fn new(params: &SpeculatorParams) -> Self {
        Self {
            window: VecDeque::with_capacity(params.window),
            window_len: params.window,
            min_growth: params.min_growth,
            max_growth: params.max_growth,
        }
    }

    pub fn window(&self) -> &VecDeque<f64> {
        &self.window
    }

    /// Current price over the oldest remembered price; 1.0 with no memory.
    pub fn growth_ratio(&self, price: f64) -> f64 {
        match self.window.front() {
            Some(&oldest) if oldest > 0.0 => price / oldest,
            _ => 1.0,
        }
    }

    /// Buy while growth sits in the fair band, or when a slump turns up.
    pub fn wants_to_buy(&self, price: f64) -> bool {
        let ratio = self.growth_ratio(price);
        if (self.min_growth..=self.max_growth).contains(&ratio) {
            return true;
        }
        let upturn = self.window.back().is_some_and(|&last| price > last);
        ratio < self.min_growth && upturn
    }

    pub fn remember(&mut self, price: f64) {
        if self.window.len() == self.window_len {
            self.window.pop_front();
        }
        self.window.push_back(price);
    }
}

pub fn propose_order<R: Rng + ?Sized>(
    state: &mut SpeculatorState,
    capital: f64,
    coins: f64,
    params: &AgentParams,
    price: f64,
    rng: &mut R,
) -> OrderIntent {
    let mood = rng.gen_range(0..MOOD_RANGE);
    let intent = if mood >= SPECULATOR_IDLE_MOOD {
        OrderIntent::NoTrade
    } else if state.wants_to_buy(price) {
        noisy_buy(capital, params, price, rng)
    } else {
        noisy_sell(coins, params, price, rng)
    };
    // Remembered whether or not we traded.
    state.remember(price);
    intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn state() -> SpeculatorState {
        SpeculatorState::new(&SpeculatorParams {
            window: 3,
            min_growth: 1.0,
            max_growth: 1.5,
        })
    }

    #[test]
    fn window_drops_oldest_price() {
        let mut s = state();
        for p in [1.0, 2.0, 3.0, 4.0] {
            s.remember(p);
        }
        assert_eq!(s.window().iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn empty_window_reads_as_flat() {
        let s = state();
        assert_eq!(s.growth_ratio(42.0), 1.0);
        assert!(s.wants_to_buy(42.0), "Flat growth is inside the fair band.");
    }

    #[test]
    fn fair_growth_buys() {
        let mut s = state();
        s.remember(10.0);
        assert!(s.wants_to_buy(12.0), "ratio 1.2 is fair");
    }

    #[test]
    fn runaway_growth_sells() {
        let mut s = state();
        s.remember(10.0);
        s.remember(15.0);
        assert!(!s.wants_to_buy(20.0), "ratio 2.0 is a bubble");
    }

    #[test]
    fn slump_without_upturn_sells() {
        let mut s = state();
        s.remember(10.0);
        s.remember(8.0);
        assert!(!s.wants_to_buy(7.0));
    }

    #[test]
    fn slump_with_upturn_buys() {
        let mut s = state();
        s.remember(10.0);
        s.remember(6.0);
        assert!(s.wants_to_buy(7.0), "a rise off the bottom is a reversal");
    }

    #[test]
    fn every_call_records_the_price() {
        let params = SimConfig::default().speculator;
        let mut s = state();
        let mut rng = StdRng::seed_from_u64(31);

        for (i, p) in [10.0, 11.0, 12.0].into_iter().enumerate() {
            // No capital and no coins: never trades, still remembers.
            let intent = propose_order(&mut s, 0.0, 0.0, &params, p, &mut rng);
            assert_eq!(intent, OrderIntent::NoTrade);
            assert_eq!(s.window().len(), i + 1);
        }
        assert_eq!(s.window().back(), Some(&12.0));
    }
}
