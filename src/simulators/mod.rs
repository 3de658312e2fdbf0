// src/simulators/mod.rs

pub mod market_trait;
pub mod order_book;
