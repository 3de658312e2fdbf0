// src/agents/agent.rs

use super::agent_type::AgentType;
use super::miner::MinerState;
use super::speculator::SpeculatorState;
use super::{altruist, miner, speculator};
use crate::config::{AgentParams, MinerParams, SpeculatorParams};
use crate::types::order::{AgentId, OrderIntent};
use rand::Rng;
use thiserror::Error;

/// Slack allowed when a buyer spends its whole balance and float rounding
/// leaves the cost a hair above it.
const CAPITAL_EPSILON: f64 = 1e-9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("agent {id} cannot pay {cost:.4} with capital {capital:.4}")]
    InsufficientCapital { id: AgentId, cost: f64, capital: f64 },
    #[error("agent {id} cannot deliver {quantity} coins holding {coins:.4}")]
    InsufficientCoins { id: AgentId, quantity: u64, coins: f64 },
}

/// Variant-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentKind {
    Altruist,
    Miner(MinerState),
    Speculator(SpeculatorState),
}

/// A market participant: the shared record plus its variant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    id: AgentId,
    capital: f64,
    coins: f64,
    initial_capital: f64,
    params: AgentParams,
    kind: AgentKind,
}

impl Agent {
    fn with_kind(id: AgentId, capital: f64, params: AgentParams, kind: AgentKind) -> Self {
        Self {
            id,
            capital,
            coins: 0.0,
            initial_capital: capital,
            params,
            kind,
        }
    }

    pub fn altruist(id: AgentId, capital: f64, params: AgentParams) -> Self {
        Self::with_kind(id, capital, params, AgentKind::Altruist)
    }

    pub fn miner(id: AgentId, capital: f64, params: AgentParams, mining: &MinerParams) -> Self {
        Self::with_kind(id, capital, params, AgentKind::Miner(MinerState::new(mining)))
    }

    pub fn speculator(
        id: AgentId,
        capital: f64,
        params: AgentParams,
        speculation: &SpeculatorParams,
    ) -> Self {
        Self::with_kind(
            id,
            capital,
            params,
            AgentKind::Speculator(SpeculatorState::new(speculation)),
        )
    }

    /// Starts the agent holding coins, mostly useful for seeding scenarios.
    pub fn with_coins(mut self, coins: f64) -> Self {
        self.coins = coins.max(0.0);
        self
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn coins(&self) -> f64 {
        self.coins
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn params(&self) -> &AgentParams {
        &self.params
    }

    pub fn kind(&self) -> &AgentKind {
        &self.kind
    }

    pub fn agent_type(&self) -> AgentType {
        match self.kind {
            AgentKind::Altruist => AgentType::Altruist,
            AgentKind::Miner(_) => AgentType::Miner,
            AgentKind::Speculator(_) => AgentType::Speculator,
        }
    }

    /// Zero for anything that is not a miner.
    pub fn mining_power(&self) -> f64 {
        match &self.kind {
            AgentKind::Miner(state) => state.mining_power(),
            _ => 0.0,
        }
    }

    /// Capital plus coins marked at `price`.
    pub fn wealth(&self, price: f64) -> f64 {
        self.capital + self.coins * price
    }

    /// `capital_current / capital_original`. An agent that started broke never
    /// registers a loss.
    pub fn capital_ratio(&self) -> f64 {
        if self.initial_capital > 0.0 {
            self.capital / self.initial_capital
        } else {
            1.0
        }
    }

    pub fn has_exited(&self) -> bool {
        self.capital_ratio() < 1.0 - self.params.loss_tolerance
    }

    /// Asks the variant's policy for this step's order.
    pub fn propose_order<R: Rng + ?Sized>(&mut self, price: f64, rng: &mut R) -> OrderIntent {
        let (capital, coins, params) = (self.capital, self.coins, self.params);
        match &mut self.kind {
            AgentKind::Altruist => altruist::propose_order(capital, coins, &params, price, rng),
            AgentKind::Miner(_) => miner::propose_order(capital, coins, &params, price, rng),
            AgentKind::Speculator(state) => {
                speculator::propose_order(state, capital, coins, &params, price, rng)
            }
        }
    }

    /// Gives a miner its chance to buy more hash power. Returns the power added.
    pub fn assess_equipment<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<f64> {
        match &mut self.kind {
            AgentKind::Miner(state) => {
                let (spent, gained) = state.assess_equipment(self.capital, rng)?;
                self.capital -= spent;
                Some(gained)
            }
            _ => None,
        }
    }

    /// Credits freshly mined coins.
    pub fn receive_reward(&mut self, coins: f64) {
        self.coins += coins;
    }

    pub fn can_afford(&self, quantity: u64, price: f64) -> bool {
        quantity as f64 * price <= self.capital + CAPITAL_EPSILON
    }

    pub fn can_deliver(&self, quantity: u64) -> bool {
        quantity as f64 <= self.coins
    }

    /// Buyer side of a trade: pays `q·p`, receives `q` coins.
    pub fn capital_to_coins(&mut self, quantity: u64, price: f64) -> Result<(), SettlementError> {
        let cost = quantity as f64 * price;
        if !self.can_afford(quantity, price) {
            return Err(SettlementError::InsufficientCapital {
                id: self.id,
                cost,
                capital: self.capital,
            });
        }
        self.capital = (self.capital - cost).max(0.0);
        self.coins += quantity as f64;
        Ok(())
    }

    /// Seller side of a trade: delivers `q` coins, receives `q·p`.
    pub fn coins_to_capital(&mut self, quantity: u64, price: f64) -> Result<(), SettlementError> {
        if !self.can_deliver(quantity) {
            return Err(SettlementError::InsufficientCoins {
                id: self.id,
                quantity,
                coins: self.coins,
            });
        }
        self.coins -= quantity as f64;
        self.capital += quantity as f64 * price;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn altruist_with(capital: f64) -> Agent {
        let params = AgentParams { d: 0.8, b: 0.2, loss_tolerance: 0.4 };
        Agent::altruist(7, capital, params)
    }

    #[test]
    fn buying_moves_capital_into_coins() {
        // Arrange
        let mut agent = altruist_with(1_000.0);

        // Act
        agent.capital_to_coins(3, 12.0).expect("buyer can afford the trade");

        // Assert
        assert_eq!(agent.capital(), 1_000.0 - 36.0, "Capital should drop by q*p.");
        assert_eq!(agent.coins(), 3.0, "Coins should rise by q.");
    }

    #[test]
    fn selling_moves_coins_into_capital() {
        let mut agent = altruist_with(100.0).with_coins(10.0);

        agent.coins_to_capital(4, 12.5).expect("seller holds enough coins");

        assert_eq!(agent.capital(), 150.0);
        assert_eq!(agent.coins(), 6.0);
    }

    #[test]
    fn overdrawn_buy_is_rejected_without_side_effects() {
        let mut agent = altruist_with(10.0);

        let result = agent.capital_to_coins(2, 6.0);

        assert!(matches!(result, Err(SettlementError::InsufficientCapital { .. })));
        assert_eq!(agent.capital(), 10.0, "Capital must be untouched.");
        assert_eq!(agent.coins(), 0.0, "Coins must be untouched.");
    }

    #[test]
    fn short_sell_is_rejected() {
        let mut agent = altruist_with(10.0).with_coins(1.5);
        assert!(agent.coins_to_capital(2, 1.0).is_err());
        assert_eq!(agent.coins(), 1.5);
    }

    #[test]
    fn half_capital_breaches_forty_percent_tolerance() {
        let mut agent = altruist_with(1_000.0);
        agent.capital_to_coins(50, 10.0).unwrap();

        assert!((agent.capital_ratio() - 0.5).abs() < 1e-12);
        assert!(agent.has_exited(), "Ratio 0.5 is below the 0.6 threshold.");
    }

    #[test]
    fn sixty_five_percent_capital_is_retained() {
        let mut agent = altruist_with(1_000.0);
        agent.capital_to_coins(35, 10.0).unwrap();

        assert!((agent.capital_ratio() - 0.65).abs() < 1e-12);
        assert!(!agent.has_exited(), "Ratio 0.65 is above the 0.6 threshold.");
    }

    #[test]
    fn wealth_marks_coins_at_price() {
        let agent = altruist_with(100.0).with_coins(5.0);
        assert_eq!(agent.wealth(20.0), 200.0);
    }

    #[test]
    fn only_miners_have_mining_power() {
        let config = SimConfig::default();
        let miner = Agent::miner(1, 100.0, config.miner, &config.mining);
        let speculator = Agent::speculator(2, 100.0, config.speculator, &config.speculation);

        assert_eq!(miner.mining_power(), config.mining.base_power);
        assert_eq!(speculator.mining_power(), 0.0);
        assert_eq!(miner.agent_type(), AgentType::Miner);
        assert_eq!(speculator.agent_type(), AgentType::Speculator);
    }

    #[test]
    fn zero_endowment_never_counts_as_a_loss() {
        let agent = altruist_with(0.0);
        assert_eq!(agent.capital_ratio(), 1.0);
        assert!(!agent.has_exited());
    }
}
