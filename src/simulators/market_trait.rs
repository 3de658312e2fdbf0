// src/simulators/market_trait.rs

/// A seeded coin market that advances one step at a time.
///
/// Implementors own their generator, so replaying after `reset` yields the
/// same clearing prices.
pub trait Marketable {
    /// Runs one full step (entry, block reward, auction, exits) and returns
    /// the clearing price. A market that can no longer step returns its last
    /// price unchanged.
    fn step(&mut self) -> f64;

    /// The last clearing price, or the starting price before any step.
    fn current_price(&self) -> f64;

    /// Back to the configured starting state and seed, with no agents drawn.
    fn reset(&mut self);
}
