// src/error.rs

use thiserror::Error;

/// Everything that can stop a simulation from being built or run.
///
/// Conditions that arise *inside* a step (no miners, an empty book, an
/// exhausted endowment pool, a zero-sized order) are not errors: the engine
/// absorbs them and keeps going.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not build distribution: {0}")]
    Distribution(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("market has already completed its run")]
    AlreadyCompleted,
}

pub type SimResult<T> = std::result::Result<T, SimError>;
