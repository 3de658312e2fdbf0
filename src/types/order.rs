// src/types/order.rs

use crate::agents::agent_type::AgentType;
use serde::{Deserialize, Serialize};

pub type AgentId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// What an agent wants to do this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderIntent {
    NoTrade,
    Buy { price: f64, quantity: u64 },
    Sell { price: f64, quantity: u64 },
}

impl OrderIntent {
    /// Builds a buy, collapsing a zero quantity into `NoTrade`.
    pub fn buy(price: f64, quantity: u64) -> Self {
        if quantity == 0 || !(price > 0.0) {
            Self::NoTrade
        } else {
            Self::Buy { price, quantity }
        }
    }

    /// Builds a sell, collapsing a zero quantity into `NoTrade`.
    pub fn sell(price: f64, quantity: u64) -> Self {
        if quantity == 0 || !(price > 0.0) {
            Self::NoTrade
        } else {
            Self::Sell { price, quantity }
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Self::NoTrade => None,
            Self::Buy { .. } => Some(Side::Buy),
            Self::Sell { .. } => Some(Side::Sell),
        }
    }
}

/// Locates an agent inside the market's populations for settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentHandle {
    pub id: AgentId,
    pub kind: AgentType,
    /// Position in that variant's active population for the current step.
    pub index: usize,
}

/// A resting order. Lives for exactly one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    pub price: f64,
    pub quantity: u64,
    pub owner: AgentHandle,
}

impl Order {
    pub fn new(price: f64, quantity: u64, owner: AgentHandle) -> Self {
        Self { price, quantity, owner }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    pub price: f64,
    pub quantity: u64,
    pub buyer: AgentHandle,
    pub seller: AgentHandle,
}

impl Trade {
    /// Capital that changes hands.
    pub fn notional(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_intents_collapse_to_no_trade() {
        assert_eq!(OrderIntent::buy(10.0, 0), OrderIntent::NoTrade);
        assert_eq!(OrderIntent::sell(10.0, 0), OrderIntent::NoTrade);
    }

    #[test]
    fn non_positive_price_intents_collapse_to_no_trade() {
        assert_eq!(OrderIntent::buy(0.0, 5), OrderIntent::NoTrade);
        assert_eq!(OrderIntent::sell(f64::NAN, 5), OrderIntent::NoTrade);
    }

    #[test]
    fn intent_side_matches_variant() {
        assert_eq!(OrderIntent::buy(12.0, 5).side(), Some(Side::Buy));
        assert_eq!(OrderIntent::sell(8.0, 3).side(), Some(Side::Sell));
        assert_eq!(OrderIntent::NoTrade.side(), None);
    }
}
