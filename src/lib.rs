// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod agents;
pub mod config;
pub mod error;
pub mod market;
pub mod mining;
pub mod population;
pub mod simulators;
pub mod stats;
pub mod types;

// === 2. Re-export the public-facing components ===

// --- From `agents` ---
pub use agents::agent::{Agent, AgentKind, SettlementError};
pub use agents::agent_type::AgentType;
pub use agents::miner::MinerState;
pub use agents::speculator::SpeculatorState;

// --- Configuration and errors ---
pub use config::{AgentParams, EntryRange, MinerParams, SimConfig, SpeculatorParams};
pub use error::{SimError, SimResult};

// --- From our `market` engine ---
pub use market::{Market, MarketPhase, RunSummary, StepReport};
pub use mining::{BlockOutcome, RewardSchedule};
pub use population::{Admission, Population, PopulationCounts, WealthByCategory};

// --- From `simulators` ---
pub use simulators::market_trait::Marketable;
pub use simulators::order_book::{MatchOutcome, OrderBook, match_orders};

// --- From `stats` and `types` ---
pub use stats::{PriceStats, gini, wealth_shares};
pub use types::order::{AgentHandle, AgentId, Order, OrderIntent, Side, Trade};
