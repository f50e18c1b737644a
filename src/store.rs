//! The order store: an opaque repository the core consumes but does not
//! define. This module declares the [`OrderStore`] trait the rest of the
//! crate is written against, plus an in-memory reference implementation so
//! the crate is runnable and testable without a database.
//!
//! A production deployment swaps in its own Postgres-backed (or similar)
//! implementation behind the same trait; nothing above this layer needs to
//! change.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{MatchedStatus, Order};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("nil order, illegal entry")]
    NilOrder,
    #[error("order {0} not found")]
    NotFound(i64),
}

impl From<StoreError> for crate::errors::EngineError {
    fn from(err: StoreError) -> Self {
        crate::errors::EngineError::StoreUnavailable(err.to_string())
    }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order, assigning its `order_id` and each asset's row id.
    async fn add_order(&self, order: &mut Order) -> Result<(), StoreError>;

    /// Returns every order whose status is in `statuses`, sorted by
    /// `(timestamp ascending, asset-id ascending)`, each with its two assets
    /// attached.
    async fn get_priority_list(&self, statuses: &[MatchedStatus]) -> Result<Vec<Order>, StoreError>;

    /// Persists a single order's mutated fields in one transaction.
    async fn update_order(&self, order: &Order) -> Result<(), StoreError>;
}

struct Table {
    orders: Vec<Order>,
    next_order_id: i64,
    next_asset_id: u64,
}

/// An in-memory [`OrderStore`]. Guarded by a single `tokio::sync::Mutex`
/// over the whole table rather than per-row locking, since there's no
/// database here to provide that isolation - see the open question recorded
/// in DESIGN.md.
pub struct InMemoryOrderStore {
    table: Mutex<Table>,
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                orders: Vec::new(),
                next_order_id: 1,
                next_asset_id: 1,
            }),
        }
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn add_order(&self, order: &mut Order) -> Result<(), StoreError> {
        let mut table = self.table.lock().await;
        order.order_id = table.next_order_id;
        table.next_order_id += 1;
        for asset in order.assets.iter_mut() {
            asset.orderbook_id = order.order_id;
            asset.id = table.next_asset_id;
            table.next_asset_id += 1;
        }
        table.orders.push(order.clone());
        Ok(())
    }

    async fn get_priority_list(&self, statuses: &[MatchedStatus]) -> Result<Vec<Order>, StoreError> {
        let table = self.table.lock().await;
        let mut matching: Vec<Order> = table
            .orders
            .iter()
            .filter(|o| statuses.contains(&o.status))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.assets[0].id.cmp(&b.assets[0].id))
        });
        Ok(matching)
    }

    async fn update_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut table = self.table.lock().await;
        let slot = table
            .orders
            .iter_mut()
            .find(|o| o.order_id == order.order_id)
            .ok_or(StoreError::NotFound(order.order_id))?;
        *slot = order.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Asset;
    use chrono::{Duration, Utc};

    fn new_order(trader: &str, is_ask: bool, ts_offset_secs: i64) -> Order {
        Order {
            order_id: 0,
            trader: trader.to_string(),
            is_up_for_sale: is_ask,
            status: MatchedStatus::Init,
            price: 1.0,
            assets: vec![
                Asset {
                    id: 0,
                    orderbook_id: 0,
                    virtual_token: "0xbase".into(),
                    value: "100".into(),
                },
                Asset {
                    id: 0,
                    orderbook_id: 0,
                    virtual_token: "0xquote".into(),
                    value: "100".into(),
                },
            ],
            fills: "0".into(),
            timestamp: Utc::now() + Duration::seconds(ts_offset_secs),
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn add_then_retrieve_round_trip() {
        let store = InMemoryOrderStore::new();
        let mut order = new_order("0xAAA", true, 0);
        store.add_order(&mut order).await.unwrap();
        assert_eq!(order.order_id, 1);
        assert_eq!(order.assets[0].orderbook_id, 1);

        let list = store
            .get_priority_list(&[MatchedStatus::Init])
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].order_id, 1);
    }

    #[tokio::test]
    async fn priority_list_filters_by_status_and_sorts_by_timestamp() {
        let store = InMemoryOrderStore::new();
        let mut later = new_order("0xAAA", true, 10);
        let mut earlier = new_order("0xBBB", false, 0);
        store.add_order(&mut later).await.unwrap();
        store.add_order(&mut earlier).await.unwrap();

        let list = store
            .get_priority_list(&[MatchedStatus::Init])
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].order_id, earlier.order_id);
        assert_eq!(list[1].order_id, later.order_id);

        let mut fully_matched = earlier.clone();
        fully_matched.status = MatchedStatus::FullMatchConfirmed;
        store.update_order(&fully_matched).await.unwrap();

        let list = store
            .get_priority_list(&[MatchedStatus::Init])
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].order_id, later.order_id);
    }

    #[tokio::test]
    async fn update_unknown_order_fails() {
        let store = InMemoryOrderStore::new();
        let order = new_order("0xAAA", true, 0);
        assert!(store.update_order(&order).await.is_err());
    }
}
