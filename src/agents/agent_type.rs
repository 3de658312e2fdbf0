// src/agents/agent_type.rs

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentType {
    Altruist,
    Miner,
    Speculator,
}

impl AgentType {
    pub const ALL: [AgentType; 3] = [AgentType::Altruist, AgentType::Miner, AgentType::Speculator];
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentType::Altruist => "altruist",
            AgentType::Miner => "miner",
            AgentType::Speculator => "speculator",
        };
        f.write_str(name)
    }
}
