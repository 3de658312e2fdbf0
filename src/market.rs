// src/market.rs

use crate::agents::agent::{Agent, SettlementError};
use crate::agents::agent_type::AgentType;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::mining::{self, BlockOutcome, RewardSchedule};
use crate::population::{Admission, Population, PopulationCounts, WealthByCategory};
use crate::simulators::market_trait::Marketable;
use crate::simulators::order_book::OrderBook;
use crate::stats::PriceStats;
use crate::types::order::{AgentHandle, Trade};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPhase {
    /// Built, nothing generated yet.
    Uninitialized,
    /// Endowment pools drawn, no step taken.
    Ready,
    Running,
    Completed,
}

/// What happened during a single step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: u64,
    pub admission: Admission,
    pub block: Option<BlockOutcome>,
    pub bids: usize,
    pub asks: usize,
    pub trades: usize,
    pub volume: u64,
    /// Trades dropped because a party could no longer cover its leg.
    pub skipped_settlements: usize,
    pub price: f64,
    pub population: PopulationCounts,
}

/// The engine's outputs, handed to whatever plots or stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: u64,
    pub price_history: Vec<f64>,
    /// Per-miner share of hash power, largest first.
    pub hash_power: Vec<f64>,
    pub wealth: WealthByCategory,
    pub population_history: Vec<PopulationCounts>,
    pub total_coins_issued: f64,
}

impl RunSummary {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn price_stats(&self) -> Option<PriceStats> {
        PriceStats::from_history(&self.price_history)
    }
}

/// This is the main simulation engine. It owns the world state (price,
/// history, populations) and drives the per-step pipeline:
/// admit → mine → collect orders → match and settle → prune → record.
pub struct Market {
    config: SimConfig,
    seed: u64,
    rng: StdRng,
    phase: MarketPhase,
    population: Population,
    rewards: RewardSchedule,
    current_price: f64,
    price_history: Vec<f64>,
    step: u64,
    coins_issued: f64,
}

impl Market {
    /// Stores the configuration and seeds the generator. No agents are drawn
    /// until `initialize` (or the first step) runs.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let population = Population::from_pools(&config, Vec::new(), Vec::new(), Vec::new());
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            phase: MarketPhase::Uninitialized,
            population,
            rewards: RewardSchedule::from_config(&config),
            current_price: config.starting_price,
            price_history: Vec::new(),
            step: 0,
            coins_issued: 0.0,
            config,
        }
    }

    /// A market over a hand-built population, already `Ready`. The
    /// configuration is validated here since `initialize` will not run.
    pub fn with_population(config: SimConfig, seed: u64, population: Population) -> SimResult<Self> {
        config.validate()?;
        let mut market = Self::new(config, seed);
        market.population = population;
        market.phase = MarketPhase::Ready;
        Ok(market)
    }

    /// Validates the configuration and draws every endowment pool.
    pub fn initialize(&mut self) -> SimResult<()> {
        if self.phase != MarketPhase::Uninitialized {
            return Ok(());
        }
        self.config.validate()?;
        self.population = Population::generate(&self.config, &mut self.rng)?;
        self.phase = MarketPhase::Ready;
        log::info!(
            "market ready: {} agents per pool, starting price {}",
            self.config.pool_size,
            self.current_price
        );
        Ok(())
    }

    /// Runs `step_count` steps and returns the outputs.
    pub fn run(&mut self, step_count: u64) -> SimResult<RunSummary> {
        if self.phase == MarketPhase::Completed {
            return Err(SimError::AlreadyCompleted);
        }
        self.initialize()?;
        log::info!("starting simulation for {step_count} steps (seed {})", self.seed);

        for _ in 0..step_count {
            self.step_once()?;
        }
        self.phase = MarketPhase::Completed;

        let summary = self.summary();
        log::info!(
            "simulation complete: price {:.4}, {} agents active, {} retired, {:.2} coins issued",
            self.current_price,
            self.population.active_count(),
            self.population.retired().len(),
            self.coins_issued
        );
        Ok(summary)
    }

    /// One full step. The order of the stages matters: entry reads the price
    /// history up to the previous step, and miners must hold this step's
    /// reward before they decide whether to sell.
    pub fn step_once(&mut self) -> SimResult<StepReport> {
        match self.phase {
            MarketPhase::Completed => return Err(SimError::AlreadyCompleted),
            MarketPhase::Uninitialized => self.initialize()?,
            MarketPhase::Ready | MarketPhase::Running => {}
        }
        self.phase = MarketPhase::Running;
        self.step += 1;
        let step = self.step;

        // 1. new arrivals
        let admission = self
            .population
            .admit_new_agents(step, &self.price_history, &mut self.rng);

        // 2. block reward
        let reward = self.rewards.reward_at(step);
        let block = mining::mine(
            self.population.active_mut(AgentType::Miner),
            reward,
            &mut self.rng,
        );
        match &block {
            Some(b) => {
                self.coins_issued += b.reward;
                log::trace!("step {step}: miner {} mined {:.4} coins", b.winner, b.reward);
            }
            None => log::debug!("step {step}: no active miners, block reward skipped"),
        }

        // 3. order collection
        let book = self.collect_orders();
        let (bids, asks) = (book.bids().len(), book.asks().len());

        // 4. matching and settlement; residuals die with the outcome
        let outcome = book.match_orders(self.current_price);
        let mut skipped_settlements = 0;
        for trade in &outcome.trades {
            if let Err(e) = self.settle(trade) {
                log::warn!("step {step}: trade skipped: {e}");
                skipped_settlements += 1;
            }
        }
        self.current_price = outcome.price;

        // 5. exits
        let population = self.population.prune_exited_agents(step);

        // 6. history
        self.price_history.push(self.current_price);

        let report = StepReport {
            step,
            admission,
            block,
            bids,
            asks,
            trades: outcome.trades.len(),
            volume: outcome.volume(),
            skipped_settlements,
            price: self.current_price,
            population,
        };
        log::debug!(
            "step {step}: {bids} bids, {asks} asks, {} trades ({} coins), price {:.4}, {} active",
            report.trades,
            report.volume,
            report.price,
            self.population.active_count()
        );
        Ok(report)
    }

    fn collect_orders(&mut self) -> OrderBook {
        let price = self.current_price;
        let upgrades = self.config.equipment_upgrades;
        let mut book = OrderBook::with_capacity(self.population.active_count());

        for kind in AgentType::ALL {
            for (index, agent) in self.population.active_mut(kind).iter_mut().enumerate() {
                if upgrades && kind == AgentType::Miner {
                    if let Some(gained) = agent.assess_equipment(&mut self.rng) {
                        log::trace!("miner {} bought {gained:.4} hash power", agent.id());
                    }
                }
                let intent = agent.propose_order(price, &mut self.rng);
                let owner = AgentHandle {
                    id: agent.id(),
                    kind,
                    index,
                };
                book.submit(intent, owner);
            }
        }
        book
    }

    /// Applies both legs of a trade, or neither.
    fn settle(&mut self, trade: &Trade) -> Result<(), SettlementError> {
        let buyer = self.agent(&trade.buyer);
        if !buyer.can_afford(trade.quantity, trade.price) {
            return Err(SettlementError::InsufficientCapital {
                id: buyer.id(),
                cost: trade.notional(),
                capital: buyer.capital(),
            });
        }
        let seller = self.agent(&trade.seller);
        if !seller.can_deliver(trade.quantity) {
            return Err(SettlementError::InsufficientCoins {
                id: seller.id(),
                quantity: trade.quantity,
                coins: seller.coins(),
            });
        }

        self.agent_mut(&trade.buyer)
            .capital_to_coins(trade.quantity, trade.price)?;
        self.agent_mut(&trade.seller)
            .coins_to_capital(trade.quantity, trade.price)?;
        log::trace!(
            "{} {} bought {} from {} {} at {:.4}",
            trade.buyer.kind,
            trade.buyer.id,
            trade.quantity,
            trade.seller.kind,
            trade.seller.id,
            trade.price
        );
        Ok(())
    }

    fn agent(&self, handle: &AgentHandle) -> &Agent {
        &self.population.active(handle.kind)[handle.index]
    }

    fn agent_mut(&mut self, handle: &AgentHandle) -> &mut Agent {
        &mut self.population.active_mut(handle.kind)[handle.index]
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> MarketPhase {
        self.phase
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    pub fn price_history(&self) -> &[f64] {
        &self.price_history
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_history(&self) -> &[PopulationCounts] {
        self.population.history()
    }

    pub fn altruists(&self) -> &[Agent] {
        self.population.active(AgentType::Altruist)
    }

    pub fn miners(&self) -> &[Agent] {
        self.population.active(AgentType::Miner)
    }

    pub fn speculators(&self) -> &[Agent] {
        self.population.active(AgentType::Speculator)
    }

    pub fn coins_issued(&self) -> f64 {
        self.coins_issued
    }

    pub fn hash_power_snapshot(&self) -> Vec<f64> {
        mining::hash_power_snapshot(self.miners())
    }

    pub fn wealth_by_category(&self) -> WealthByCategory {
        self.population.wealth_by_category(self.current_price)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.step,
            price_history: self.price_history.clone(),
            hash_power: self.hash_power_snapshot(),
            wealth: self.wealth_by_category(),
            population_history: self.population.history().to_vec(),
            total_coins_issued: self.coins_issued,
        }
    }
}

impl Marketable for Market {
    fn step(&mut self) -> f64 {
        match self.step_once() {
            Ok(report) => report.price,
            Err(e) => {
                log::warn!("step ignored: {e}");
                self.current_price
            }
        }
    }

    fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Rebuilds the market from its configuration and seed, so the same
    /// price path replays.
    fn reset(&mut self) {
        *self = Market::new(self.config.clone(), self.seed);
    }
}
