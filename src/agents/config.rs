// src/agents/config.rs

//! A centralized place for tuning agent behavior parameters.
//! `SimConfig::default()` is assembled from these.

// --- General ---
pub const STARTING_PRICE: f64 = 10.0;
/// Every mood is drawn uniformly from `0..MOOD_RANGE`.
pub const MOOD_RANGE: u32 = 10;

// --- Endowments ---
// Capitals follow a Pareto tail: most agents are small, a handful are whales.
pub const ENDOWMENT_PARETO_SCALE: f64 = 1_000.0;
pub const ENDOWMENT_PARETO_SHAPE: f64 = 1.16;
pub const ENDOWMENT_POOL_SIZE: usize = 5_000;

// --- Price noise ---
// A buyer may overpay by up to 80% of d·p and underbid by 50% of d·p.
// Sellers mirror that, which is what lets the two sides cross.
pub const BUY_NOISE_LOW: f64 = -0.5;
pub const BUY_NOISE_HIGH: f64 = 0.8;
pub const SELL_NOISE_LOW: f64 = -0.8;
pub const SELL_NOISE_HIGH: f64 = 0.5;
// Jitter applied to b, also scaled by d.
pub const BUY_FRACTION_LOW: f64 = -0.05;
pub const BUY_FRACTION_HIGH: f64 = 0.1;
pub const SELL_FRACTION_LOW: f64 = -0.1;
pub const SELL_FRACTION_HIGH: f64 = 0.05;

// --- Altruist (plain users of the coin) ---
pub const ALTRUIST_D: f64 = 0.8;
pub const ALTRUIST_B: f64 = 0.2;
pub const ALTRUIST_LOSS_TOLERANCE: f64 = 0.6;
pub const ALTRUIST_BUY_MOODS: u32 = 1; // mood 0
pub const ALTRUIST_SELL_MOODS: u32 = 1; // mood 1
pub const ALTRUIST_ENTRY_MIN: u32 = 2;
pub const ALTRUIST_ENTRY_MAX: u32 = 10;

// --- Miner ---
pub const MINER_D: f64 = 0.5;
pub const MINER_B: f64 = 0.5;
pub const MINER_LOSS_TOLERANCE: f64 = 0.7;
pub const MINER_BUY_MOODS: u32 = 1; // mood 0
pub const MINER_SELL_MOODS: u32 = 6; // moods 1..=6
pub const MINER_ENTRY_MIN: u32 = 0;
pub const MINER_ENTRY_MAX: u32 = 3;
pub const MINER_BASE_POWER: f64 = 1.0;
/// Share of capital sunk into equipment on an upgrade.
pub const MINER_INVESTMENT_RATE: f64 = 0.1;
pub const MINER_UPGRADE_PROB: f64 = 0.02;
/// Capital that buys one unit of hash power at the linear point of the curve.
pub const MINER_POWER_SCALE: f64 = 500.0;
/// Above 1 so that power grows faster than the money thrown at it.
pub const MINER_POWER_EXPONENT: f64 = 1.3;

// --- Speculator ---
pub const SPECULATOR_D: f64 = 0.6;
pub const SPECULATOR_B: f64 = 0.4;
pub const SPECULATOR_LOSS_TOLERANCE: f64 = 0.5;
/// Moods at or above this sit the step out.
pub const SPECULATOR_IDLE_MOOD: u32 = 8;
pub const SPECULATOR_WINDOW: usize = 5;
pub const SPECULATOR_MIN_GROWTH: f64 = 1.0;
pub const SPECULATOR_MAX_GROWTH: f64 = 1.5;
/// Momentum used for speculator entry when momentum behaviour is switched off.
pub const FIXED_MOMENTUM: u32 = 1;

// --- Block reward ---
pub const INITIAL_BLOCK_REWARD: f64 = 50.0;
pub const REWARD_DECAY_EXPONENT: f64 = 0.5;
