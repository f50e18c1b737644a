//! `OrderPriorityQueue` - a side-homogeneous ordered container over open
//! orders.
//!
//! This is deliberately not a binary heap: the matching engine needs
//! index-based `peek`/`remove` while walking the book (see
//! [`crate::matching::match_single_order`]), which a heap cannot offer
//! without breaking its invariant on every removal. A sorted `Vec` with a
//! binary-search insertion point gives O(log n) insert, O(1) indexed access,
//! and O(n) removal - the same shape as the reference source's
//! sort-on-insert slice.

use std::cmp::Ordering;

use crate::models::Order;

/// Orders in priority order: `peek(0)` is always the best available order
/// for whichever side this queue represents.
#[derive(Debug, Default)]
pub struct OrderPriorityQueue {
    orders: Vec<Order>,
}

impl OrderPriorityQueue {
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Returns the i-th highest-priority order without removing it.
    pub fn peek(&self, i: usize) -> &Order {
        &self.orders[i]
    }

    /// Returns a mutable reference to the i-th highest-priority order.
    pub fn peek_mut(&mut self, i: usize) -> &mut Order {
        &mut self.orders[i]
    }

    /// Deletes the i-th element, preserving the relative order of the rest.
    pub fn remove(&mut self, i: usize) -> Order {
        self.orders.remove(i)
    }

    /// Inserts `order`, preserving priority order. Equal-priority orders
    /// keep their relative insertion order (stable), which is how time
    /// priority at equal prices falls out of the queue without the queue
    /// itself tracking timestamps: callers insert orders pre-sorted by
    /// `(timestamp, asset_id)`.
    pub fn push(&mut self, order: Order) {
        let idx = self
            .orders
            .partition_point(|existing| priority_cmp(existing, &order) != Ordering::Greater);
        self.orders.insert(idx, order);
    }
}

/// Total ordering over two orders from the strict-weak-order rule in
/// `OrderPriorityQueue`'s contract: `Less` means `a` has strictly higher
/// priority (sorts earlier) than `b`.
///
/// - Two asks: lower price wins (best ask is cheapest).
/// - Two bids: higher price wins (best bid pays the most).
/// - Mixed sides never actually get compared by the engine (each queue only
///   ever holds one side), but the ordering must still be total; asks are
///   arbitrarily placed before bids.
fn priority_cmp(a: &Order, b: &Order) -> Ordering {
    match (a.is_up_for_sale, b.is_up_for_sale) {
        (true, true) => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        (false, false) => b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, MatchedStatus};
    use chrono::Utc;

    fn order(id: i64, is_ask: bool, price: f64) -> Order {
        Order {
            order_id: id,
            trader: format!("0x{id:040x}"),
            is_up_for_sale: is_ask,
            status: MatchedStatus::Init,
            price,
            assets: vec![
                Asset {
                    id: 0,
                    orderbook_id: id,
                    virtual_token: "0xbase".to_string(),
                    value: "100".to_string(),
                },
                Asset {
                    id: 0,
                    orderbook_id: id,
                    virtual_token: "0xquote".to_string(),
                    value: "100".to_string(),
                },
            ],
            fills: "0".to_string(),
            timestamp: Utc::now(),
            created_at: 0,
        }
    }

    #[test]
    fn asks_sorted_lowest_price_first() {
        let mut q = OrderPriorityQueue::new();
        q.push(order(1, true, 12.0));
        q.push(order(2, true, 10.0));
        q.push(order(3, true, 11.0));
        assert_eq!(q.peek(0).order_id, 2);
        assert_eq!(q.peek(1).order_id, 3);
        assert_eq!(q.peek(2).order_id, 1);
    }

    #[test]
    fn bids_sorted_highest_price_first() {
        let mut q = OrderPriorityQueue::new();
        q.push(order(1, false, 10.0));
        q.push(order(2, false, 12.0));
        q.push(order(3, false, 11.0));
        assert_eq!(q.peek(0).order_id, 2);
        assert_eq!(q.peek(1).order_id, 3);
        assert_eq!(q.peek(2).order_id, 1);
    }

    #[test]
    fn equal_price_preserves_insertion_order() {
        let mut q = OrderPriorityQueue::new();
        q.push(order(1, true, 10.0));
        q.push(order(2, true, 10.0));
        assert_eq!(q.peek(0).order_id, 1);
        assert_eq!(q.peek(1).order_id, 2);
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut q = OrderPriorityQueue::new();
        q.push(order(1, true, 10.0));
        q.push(order(2, true, 11.0));
        q.push(order(3, true, 12.0));
        let removed = q.remove(1);
        assert_eq!(removed.order_id, 2);
        assert_eq!(q.len(), 2);
        assert_eq!(q.peek(0).order_id, 1);
        assert_eq!(q.peek(1).order_id, 3);
    }
}
