//! `OrderBook` - a pair of priority queues per base asset, transient for the
//! lifetime of a single matching run.

use std::collections::HashMap;

use crate::priority::OrderPriorityQueue;

/// Bid/ask priority queues for a single base asset (`virtual_token`).
#[derive(Debug, Default)]
pub struct BookSide {
    pub bids: OrderPriorityQueue,
    pub asks: OrderPriorityQueue,
}

/// A transient order book, keyed on the base asset's token address. Built
/// fresh at the start of every matching run and discarded at the end; it is
/// never persisted. Deliberately keyed on base only - orders for the same
/// base but different quote assets are considered crossable against each
/// other, a known simplification inherited from the source this crate was
/// modeled on (see the open question in the design notes).
#[derive(Debug, Default)]
pub struct OrderBook {
    books: HashMap<String, BookSide>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the book side for `virtual_token`, creating an empty one if
    /// this is the first order seen for that base asset in this run.
    pub fn side_mut(&mut self, virtual_token: &str) -> &mut BookSide {
        self.books.entry(virtual_token.to_string()).or_default()
    }
}
