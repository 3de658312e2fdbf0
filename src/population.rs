// src/population.rs

//! Who is in the market. Agents are pre-generated into finite endowment
//! pools, admitted a few at a time, and retired for good once their capital
//! falls past their loss tolerance.

use crate::agents::agent::Agent;
use crate::agents::agent_type::AgentType;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::types::order::AgentId;
use rand::Rng;
use rand::distributions::Distribution;
use rand_distr::Pareto;
use serde::{Deserialize, Serialize};

/// Number of strictly rising steps at the end of `history`.
pub fn consecutive_growth(history: &[f64]) -> u32 {
    history
        .windows(2)
        .rev()
        .take_while(|w| w[1] > w[0])
        .count() as u32
}

/// Agents let in during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    pub altruists: usize,
    pub miners: usize,
    pub speculators: usize,
}

impl Admission {
    pub fn total(&self) -> usize {
        self.altruists + self.miners + self.speculators
    }
}

/// Population sizes recorded at the end of a step, after pruning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub step: u64,
    pub altruists: usize,
    pub miners: usize,
    pub speculators: usize,
    pub exited: usize,
}

/// Capital plus coins at the closing price, summed per variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WealthByCategory {
    pub altruists: f64,
    pub miners: f64,
    pub speculators: f64,
}

impl WealthByCategory {
    pub fn total(&self) -> f64 {
        self.altruists + self.miners + self.speculators
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    config: SimConfig,
    // Pools are popped from the back; they are stored reversed so agents
    // enter in id order.
    altruist_pool: Vec<Agent>,
    miner_pool: Vec<Agent>,
    speculator_pool: Vec<Agent>,
    altruists: Vec<Agent>,
    miners: Vec<Agent>,
    speculators: Vec<Agent>,
    retired: Vec<Agent>,
    history: Vec<PopulationCounts>,
}

impl Population {
    /// Draws every endowment up front from a Pareto distribution.
    pub fn generate<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> SimResult<Self> {
        let pareto = Pareto::new(config.pareto_scale, config.pareto_shape)
            .map_err(|e| SimError::Distribution(format!("endowment pareto: {e:?}")))?;

        let mut next_id: AgentId = 0;
        let mut pool = |kind: AgentType, rng: &mut R| -> Vec<Agent> {
            let mut agents: Vec<Agent> = (0..config.pool_size)
                .map(|_| {
                    let id = next_id;
                    next_id += 1;
                    let capital = pareto.sample(rng);
                    match kind {
                        AgentType::Altruist => Agent::altruist(id, capital, config.altruist),
                        AgentType::Miner => Agent::miner(id, capital, config.miner, &config.mining),
                        AgentType::Speculator => {
                            Agent::speculator(id, capital, config.speculator, &config.speculation)
                        }
                    }
                })
                .collect();
            agents.reverse();
            agents
        };

        let altruist_pool = pool(AgentType::Altruist, rng);
        let miner_pool = pool(AgentType::Miner, rng);
        let speculator_pool = pool(AgentType::Speculator, rng);

        Ok(Self::from_pools(config, altruist_pool, miner_pool, speculator_pool))
    }

    /// Builds a population from explicit pools; the last element enters first.
    pub fn from_pools(
        config: &SimConfig,
        altruist_pool: Vec<Agent>,
        miner_pool: Vec<Agent>,
        speculator_pool: Vec<Agent>,
    ) -> Self {
        Self {
            config: config.clone(),
            altruist_pool,
            miner_pool,
            speculator_pool,
            altruists: Vec::new(),
            miners: Vec::new(),
            speculators: Vec::new(),
            retired: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn active(&self, kind: AgentType) -> &[Agent] {
        match kind {
            AgentType::Altruist => &self.altruists,
            AgentType::Miner => &self.miners,
            AgentType::Speculator => &self.speculators,
        }
    }

    pub fn active_mut(&mut self, kind: AgentType) -> &mut [Agent] {
        match kind {
            AgentType::Altruist => &mut self.altruists,
            AgentType::Miner => &mut self.miners,
            AgentType::Speculator => &mut self.speculators,
        }
    }

    fn pool_mut(&mut self, kind: AgentType) -> &mut Vec<Agent> {
        match kind {
            AgentType::Altruist => &mut self.altruist_pool,
            AgentType::Miner => &mut self.miner_pool,
            AgentType::Speculator => &mut self.speculator_pool,
        }
    }

    fn active_vec_mut(&mut self, kind: AgentType) -> &mut Vec<Agent> {
        match kind {
            AgentType::Altruist => &mut self.altruists,
            AgentType::Miner => &mut self.miners,
            AgentType::Speculator => &mut self.speculators,
        }
    }

    pub fn pool_remaining(&self, kind: AgentType) -> usize {
        match kind {
            AgentType::Altruist => self.altruist_pool.len(),
            AgentType::Miner => self.miner_pool.len(),
            AgentType::Speculator => self.speculator_pool.len(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.altruists.len() + self.miners.len() + self.speculators.len()
    }

    /// Agents that have left the market, in the order they left.
    pub fn retired(&self) -> &[Agent] {
        &self.retired
    }

    pub fn history(&self) -> &[PopulationCounts] {
        &self.history
    }

    /// Momentum driving speculator entry: the current price streak, or the
    /// configured constant when momentum is switched off.
    pub fn momentum(&self, price_history: &[f64]) -> u32 {
        if self.config.momentum_enabled {
            consecutive_growth(price_history)
        } else {
            self.config.fixed_momentum
        }
    }

    /// Moves up to `wanted` agents from the pool into the active set.
    /// A dry pool simply admits fewer.
    fn admit(&mut self, kind: AgentType, wanted: usize) -> usize {
        let pool = self.pool_mut(kind);
        let take = wanted.min(pool.len());
        let entering = pool.split_off(pool.len() - take);
        self.active_vec_mut(kind).extend(entering.into_iter().rev());
        take
    }

    pub fn admit_new_agents<R: Rng + ?Sized>(
        &mut self,
        step: u64,
        price_history: &[f64],
        rng: &mut R,
    ) -> Admission {
        let altruist_entry = self.config.altruist_entry;
        let miner_entry = self.config.miner_entry;
        let wanted_altruists = rng.gen_range(altruist_entry.min..=altruist_entry.max) as usize;
        let wanted_miners = rng.gen_range(miner_entry.min..=miner_entry.max) as usize;

        let momentum = u64::from(self.momentum(price_history));
        let wanted_speculators = rng.gen_range(0..=momentum * momentum) as usize;

        let admission = Admission {
            altruists: self.admit(AgentType::Altruist, wanted_altruists),
            miners: self.admit(AgentType::Miner, wanted_miners),
            speculators: self.admit(AgentType::Speculator, wanted_speculators),
        };
        log::debug!(
            "step {step}: momentum {momentum}, admitted {} altruists, {} miners, {} speculators",
            admission.altruists,
            admission.miners,
            admission.speculators
        );
        admission
    }

    /// Retires every agent whose capital ratio is under `1 - loss_tolerance`
    /// and records the surviving population for `step`.
    pub fn prune_exited_agents(&mut self, step: u64) -> PopulationCounts {
        let mut exited = 0;
        for kind in AgentType::ALL {
            let active = std::mem::take(self.active_vec_mut(kind));
            let (gone, kept): (Vec<Agent>, Vec<Agent>) =
                active.into_iter().partition(Agent::has_exited);
            exited += gone.len();
            *self.active_vec_mut(kind) = kept;
            self.retired.extend(gone);
        }

        let counts = PopulationCounts {
            step,
            altruists: self.altruists.len(),
            miners: self.miners.len(),
            speculators: self.speculators.len(),
            exited,
        };
        if exited > 0 {
            log::debug!("step {step}: {exited} agents exited");
        }
        self.history.push(counts);
        counts
    }

    pub fn wealth_by_category(&self, price: f64) -> WealthByCategory {
        let total = |agents: &[Agent]| agents.iter().map(|a| a.wealth(price)).sum::<f64>();
        WealthByCategory {
            altruists: total(&self.altruists),
            miners: total(&self.miners),
            speculators: total(&self.speculators),
        }
    }

    /// Coins held by everyone who ever entered, active or retired.
    pub fn coins_in_circulation(&self) -> f64 {
        self.altruists
            .iter()
            .chain(&self.miners)
            .chain(&self.speculators)
            .chain(&self.retired)
            .map(Agent::coins)
            .sum()
    }
}
