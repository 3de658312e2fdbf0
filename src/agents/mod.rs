// src/agents/mod.rs

pub mod agent;
pub mod agent_type;
pub mod altruist;
pub mod config;
pub mod miner;
pub mod pricing;
pub mod speculator;
