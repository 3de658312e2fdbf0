// src/agents/altruist.rs

//! Plain users of the coin. They trade rarely and with no view on the price.

use super::config::{ALTRUIST_BUY_MOODS, ALTRUIST_SELL_MOODS, MOOD_RANGE};
use super::pricing::{noisy_buy, noisy_sell};
use crate::config::AgentParams;
use crate::types::order::OrderIntent;
use rand::Rng;

pub fn propose_order<R: Rng + ?Sized>(
    capital: f64,
    coins: f64,
    params: &AgentParams,
    price: f64,
    rng: &mut R,
) -> OrderIntent {
    let mood = rng.gen_range(0..MOOD_RANGE);
    if mood < ALTRUIST_BUY_MOODS {
        noisy_buy(capital, params, price, rng)
    } else if mood < ALTRUIST_BUY_MOODS + ALTRUIST_SELL_MOODS {
        noisy_sell(coins, params, price, rng)
    } else {
        OrderIntent::NoTrade
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn altruists_mostly_sit_out() {
        let params = SimConfig::default().altruist;
        let mut rng = StdRng::seed_from_u64(11);

        let (mut buys, mut sells, mut idle) = (0, 0, 0);
        for _ in 0..10_000 {
            match propose_order(10_000.0, 100.0, &params, 10.0, &mut rng) {
                OrderIntent::Buy { .. } => buys += 1,
                OrderIntent::Sell { .. } => sells += 1,
                OrderIntent::NoTrade => idle += 1,
            }
        }

        assert!(idle > 7_000, "Altruists should idle ~80% of the time, idled {idle}");
        assert!(buys > 700 && sells > 700, "Buys ({buys}) and sells ({sells}) should be roughly even");
    }

    #[test]
    fn altruist_without_coins_never_sells() {
        let params = SimConfig::default().altruist;
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..1_000 {
            let intent = propose_order(1_000.0, 0.0, &params, 10.0, &mut rng);
            assert!(!matches!(intent, OrderIntent::Sell { .. }));
        }
    }
}
