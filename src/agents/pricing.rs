// src/agents/pricing.rs

//! Limit-price noise and order sizing shared by every policy.

use super::config::{
    BUY_FRACTION_HIGH, BUY_FRACTION_LOW, BUY_NOISE_HIGH, BUY_NOISE_LOW, SELL_FRACTION_HIGH,
    SELL_FRACTION_LOW, SELL_NOISE_HIGH, SELL_NOISE_LOW,
};
use crate::config::AgentParams;
use crate::types::order::OrderIntent;
use rand::Rng;

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low { rng.gen_range(low..high) } else { low }
}

/// Buyers are allowed to overpay more than they underbid.
pub fn buy_limit<R: Rng + ?Sized>(price: f64, d: f64, rng: &mut R) -> f64 {
    price + jitter(rng, BUY_NOISE_LOW * d * price, BUY_NOISE_HIGH * d * price)
}

/// Sellers are allowed to undercut more than they mark up.
pub fn sell_limit<R: Rng + ?Sized>(price: f64, d: f64, rng: &mut R) -> f64 {
    price + jitter(rng, SELL_NOISE_LOW * d * price, SELL_NOISE_HIGH * d * price)
}

pub fn buy_fraction<R: Rng + ?Sized>(params: &AgentParams, rng: &mut R) -> f64 {
    let d = params.d;
    (params.b + jitter(rng, BUY_FRACTION_LOW * d, BUY_FRACTION_HIGH * d)).clamp(0.0, 1.0)
}

pub fn sell_fraction<R: Rng + ?Sized>(params: &AgentParams, rng: &mut R) -> f64 {
    let d = params.d;
    (params.b + jitter(rng, SELL_FRACTION_LOW * d, SELL_FRACTION_HIGH * d)).clamp(0.0, 1.0)
}

/// Whole units of coin affordable with `fraction` of `capital` at `limit`.
pub fn buy_quantity(fraction: f64, capital: f64, limit: f64) -> u64 {
    if !(limit > 0.0) || !(capital > 0.0) {
        return 0;
    }
    floor_units(fraction * capital / limit)
}

/// Whole units of coin making up `fraction` of the holdings.
pub fn sell_quantity(fraction: f64, coins: f64) -> u64 {
    if !(coins > 0.0) {
        return 0;
    }
    floor_units(fraction * coins)
}

#[inline]
fn floor_units(x: f64) -> u64 {
    if x.is_finite() && x >= 1.0 { x.floor() as u64 } else { 0 }
}

/// A noisy buy sized off capital. Empty wallets come back as `NoTrade`.
pub fn noisy_buy<R: Rng + ?Sized>(
    capital: f64,
    params: &AgentParams,
    price: f64,
    rng: &mut R,
) -> OrderIntent {
    let limit = buy_limit(price, params.d, rng);
    let fraction = buy_fraction(params, rng);
    OrderIntent::buy(limit, buy_quantity(fraction, capital, limit))
}

/// A noisy sell sized off coin holdings. Empty wallets come back as `NoTrade`.
pub fn noisy_sell<R: Rng + ?Sized>(
    coins: f64,
    params: &AgentParams,
    price: f64,
    rng: &mut R,
) -> OrderIntent {
    let limit = sell_limit(price, params.d, rng);
    let fraction = sell_fraction(params, rng);
    OrderIntent::sell(limit, sell_quantity(fraction, coins))
}
