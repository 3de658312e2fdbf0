// src/types/mod.rs

pub mod order;

pub use order::{AgentHandle, AgentId, Order, OrderIntent, Side, Trade};
