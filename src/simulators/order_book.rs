// src/simulators/order_book.rs

use crate::types::order::{AgentHandle, Order, OrderIntent, Side, Trade};
use std::cmp::Ordering;

/// Everything one matching pass produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub trades: Vec<Trade>,
    /// Price after the pass: the last trade, the best ask on a dead book,
    /// or the previous price on an empty one.
    pub price: f64,
    /// Unfilled bids, ascending. Dropped at the end of the step.
    pub residual_bids: Vec<Order>,
    /// Unfilled asks, ascending. Dropped at the end of the step.
    pub residual_asks: Vec<Order>,
}

impl MatchOutcome {
    pub fn traded(&self) -> bool {
        !self.trades.is_empty()
    }

    pub fn volume(&self) -> u64 {
        self.trades.iter().map(|t| t.quantity).sum()
    }
}

/// Price first, then agent id so equal quotes keep a stable order.
fn book_order(a: &Order, b: &Order) -> Ordering {
    a.price
        .total_cmp(&b.price)
        .then_with(|| a.owner.id.cmp(&b.owner.id))
}

/// A single-step book: both sides ascending by limit price. Nothing rests
/// across steps, so the book is built, matched once and thrown away.
#[derive(Debug, Default, Clone)]
pub struct OrderBook {
    bids: Vec<Order>,
    asks: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bids: Vec::with_capacity(capacity),
            asks: Vec::with_capacity(capacity),
        }
    }

    /// Turns an intent into a resting order. `NoTrade` is ignored.
    pub fn submit(&mut self, intent: OrderIntent, owner: AgentHandle) -> Option<Side> {
        match intent {
            OrderIntent::NoTrade => None,
            OrderIntent::Buy { price, quantity } => {
                self.add_limit_order(Side::Buy, Order::new(price, quantity, owner))
            }
            OrderIntent::Sell { price, quantity } => {
                self.add_limit_order(Side::Sell, Order::new(price, quantity, owner))
            }
        }
    }

    /// Sorted insert; equal keys land after the ones already there.
    pub fn add_limit_order(&mut self, side: Side, order: Order) -> Option<Side> {
        if order.quantity == 0 || !(order.price > 0.0) {
            return None;
        }
        let book_side = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let at = book_side.partition_point(|o| book_order(o, &order) != Ordering::Greater);
        book_side.insert(at, order);
        Some(side)
    }

    /// Merges a batch collected elsewhere, re-sorting once.
    pub fn extend(&mut self, side: Side, orders: impl IntoIterator<Item = Order>) {
        let book_side = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        book_side.extend(orders.into_iter().filter(|o| o.quantity > 0 && o.price > 0.0));
        book_side.sort_by(book_order);
    }

    pub fn bids(&self) -> &[Order] {
        &self.bids
    }

    pub fn asks(&self) -> &[Order] {
        &self.asks
    }

    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.last()
    }

    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.first()
    }

    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Runs the crossing pass and consumes the book.
    pub fn match_orders(self, current_price: f64) -> MatchOutcome {
        match_orders(self.bids, self.asks, current_price)
    }
}

/// Single-pass double auction over two ascending order lists.
///
/// Walks down from the highest bid and up from the lowest ask while they
/// cross. Each fill clears at the bid's limit and exhausts at least one of
/// the two orders. If nothing crosses the price drops to the best ask.
pub fn match_orders(mut bids: Vec<Order>, mut asks: Vec<Order>, current_price: f64) -> MatchOutcome {
    let mut trades = Vec::new();
    let mut price = current_price;

    // `i` is one past the best live bid, `j` is the best live ask.
    let mut i = bids.len();
    let mut j = 0;

    while i > 0 && j < asks.len() {
        let bid = &mut bids[i - 1];
        let ask = &mut asks[j];
        if bid.price < ask.price {
            break;
        }

        let quantity = bid.quantity.min(ask.quantity);
        bid.quantity -= quantity;
        ask.quantity -= quantity;

        trades.push(Trade {
            price: bid.price,
            quantity,
            buyer: bid.owner,
            seller: ask.owner,
        });
        price = bid.price;

        if bid.quantity == 0 {
            i -= 1;
        }
        if ask.quantity == 0 {
            j += 1;
        }
    }

    if trades.is_empty() {
        if let Some(best_ask) = asks.first() {
            price = best_ask.price;
        }
    }

    bids.truncate(i);
    let residual_asks = asks.split_off(j);

    MatchOutcome {
        trades,
        price,
        residual_bids: bids,
        residual_asks,
    }
}
