// src/config.rs

//! Run-level configuration. Defaults live in `agents::config`.

use crate::agents::config::*;
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Parameters every agent variant carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    /// Price-deviation noise coefficient.
    pub d: f64,
    /// Share of wealth put behind a single order.
    pub b: f64,
    /// Fractional capital drawdown at which the agent walks away.
    pub loss_tolerance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinerParams {
    pub base_power: f64,
    /// `g`: fraction of capital sunk on an upgrade.
    pub investment_rate: f64,
    pub upgrade_probability: f64,
    pub power_scale: f64,
    pub power_exponent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeculatorParams {
    pub window: usize,
    pub min_growth: f64,
    pub max_growth: f64,
}

/// Inclusive range of agents admitted per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub starting_price: f64,
    pub pool_size: usize,
    pub pareto_scale: f64,
    pub pareto_shape: f64,
    pub altruist_entry: EntryRange,
    pub miner_entry: EntryRange,
    /// When off, speculator entry uses `fixed_momentum` instead of the price streak.
    pub momentum_enabled: bool,
    pub fixed_momentum: u32,
    /// Lets miners reinvest capital into hash power.
    pub equipment_upgrades: bool,
    pub initial_reward: f64,
    pub reward_decay_exponent: f64,
    pub altruist: AgentParams,
    pub miner: AgentParams,
    pub speculator: AgentParams,
    pub mining: MinerParams,
    pub speculation: SpeculatorParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_price: STARTING_PRICE,
            pool_size: ENDOWMENT_POOL_SIZE,
            pareto_scale: ENDOWMENT_PARETO_SCALE,
            pareto_shape: ENDOWMENT_PARETO_SHAPE,
            altruist_entry: EntryRange {
                min: ALTRUIST_ENTRY_MIN,
                max: ALTRUIST_ENTRY_MAX,
            },
            miner_entry: EntryRange {
                min: MINER_ENTRY_MIN,
                max: MINER_ENTRY_MAX,
            },
            momentum_enabled: true,
            fixed_momentum: FIXED_MOMENTUM,
            equipment_upgrades: true,
            initial_reward: INITIAL_BLOCK_REWARD,
            reward_decay_exponent: REWARD_DECAY_EXPONENT,
            altruist: AgentParams {
                d: ALTRUIST_D,
                b: ALTRUIST_B,
                loss_tolerance: ALTRUIST_LOSS_TOLERANCE,
            },
            miner: AgentParams {
                d: MINER_D,
                b: MINER_B,
                loss_tolerance: MINER_LOSS_TOLERANCE,
            },
            speculator: AgentParams {
                d: SPECULATOR_D,
                b: SPECULATOR_B,
                loss_tolerance: SPECULATOR_LOSS_TOLERANCE,
            },
            mining: MinerParams {
                base_power: MINER_BASE_POWER,
                investment_rate: MINER_INVESTMENT_RATE,
                upgrade_probability: MINER_UPGRADE_PROB,
                power_scale: MINER_POWER_SCALE,
                power_exponent: MINER_POWER_EXPONENT,
            },
            speculation: SpeculatorParams {
                window: SPECULATOR_WINDOW,
                min_growth: SPECULATOR_MIN_GROWTH,
                max_growth: SPECULATOR_MAX_GROWTH,
            },
        }
    }
}

fn check(ok: bool, msg: impl FnOnce() -> String) -> SimResult<()> {
    if ok {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(msg()))
    }
}

/// Strictly positive and finite.
fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn unit_interval(name: &str, v: f64) -> SimResult<()> {
    check((0.0..=1.0).contains(&v), || format!("{name} must be in [0, 1], got {v}"))
}

impl AgentParams {
    fn validate(&self, who: &str) -> SimResult<()> {
        unit_interval(&format!("{who}.d"), self.d)?;
        unit_interval(&format!("{who}.b"), self.b)?;
        unit_interval(&format!("{who}.loss_tolerance"), self.loss_tolerance)
    }
}

impl SimConfig {
    /// Parses a JSON document; missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects anything that would leave a distribution or range undefined.
    pub fn validate(&self) -> SimResult<()> {
        check(positive(self.starting_price), || {
            format!("starting_price must be positive, got {}", self.starting_price)
        })?;
        check(positive(self.pareto_scale) && positive(self.pareto_shape), || {
            format!(
                "pareto parameters must be positive, got scale={} shape={}",
                self.pareto_scale, self.pareto_shape
            )
        })?;
        for (name, range) in [("altruist_entry", self.altruist_entry), ("miner_entry", self.miner_entry)] {
            check(range.min <= range.max, || {
                format!("{name} min {} exceeds max {}", range.min, range.max)
            })?;
        }
        check(positive(self.initial_reward), || {
            format!("initial_reward must be positive, got {}", self.initial_reward)
        })?;
        check(self.reward_decay_exponent.is_finite() && self.reward_decay_exponent >= 0.0, || {
            format!(
                "reward_decay_exponent must be non-negative, got {}",
                self.reward_decay_exponent
            )
        })?;

        self.altruist.validate("altruist")?;
        self.miner.validate("miner")?;
        self.speculator.validate("speculator")?;

        let m = &self.mining;
        check(positive(m.base_power), || format!("base_power must be positive, got {}", m.base_power))?;
        unit_interval("mining.investment_rate", m.investment_rate)?;
        unit_interval("mining.upgrade_probability", m.upgrade_probability)?;
        check(positive(m.power_scale), || format!("power_scale must be positive, got {}", m.power_scale))?;
        check(m.power_exponent.is_finite() && m.power_exponent > 1.0, || {
            format!("power_exponent must exceed 1, got {}", m.power_exponent)
        })?;

        let s = &self.speculation;
        check(s.window > 0, || "speculation.window must be at least 1".to_string())?;
        check(positive(s.min_growth) && s.max_growth.is_finite() && s.min_growth <= s.max_growth, || {
            format!(
                "growth band must satisfy 0 < min <= max, got [{}, {}]",
                s.min_growth, s.max_growth
            )
        })
    }
}
