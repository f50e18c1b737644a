//! The driver loop: one tick finds matches, settles each, and persists the
//! resulting order states, then sleeps. This is a one-shot pass per tick,
//! not an internal retry loop - the next tick is what picks up anything the
//! previous one didn't finish.

use std::sync::Arc;
use std::time::Duration;

use crate::errors::EngineError;
use crate::matching;
use crate::settlement::SettlementExecutor;
use crate::store::OrderStore;

/// Runs the matching/settlement cycle forever, sleeping `interval` between
/// ticks. Intended to be spawned as a background task alongside the HTTP
/// server; never returns under normal operation.
pub async fn run(
    store: Arc<dyn OrderStore>,
    executor: Arc<dyn SettlementExecutor>,
    interval: Duration,
) {
    loop {
        if let Err(err) = tick(store.as_ref(), executor.as_ref()).await {
            tracing::error!(error = %err, "driver tick failed");
        }
        tokio::time::sleep(interval).await;
    }
}

/// Runs exactly one matching/settlement cycle.
///
/// A `get_priority_list` failure aborts the whole tick (nothing was found,
/// nothing to settle). A settlement failure on any match aborts the whole
/// batch: no order is marked updated for that match or any match after it
/// in this tick, and the error propagates to `run`, which logs it and
/// retries on the next interval. A store-update failure after a successful
/// settlement is logged and the loop moves on - the ledger transfer already
/// happened and cannot be undone, so refusing to continue would only
/// compound the problem.
pub async fn tick(store: &dyn OrderStore, executor: &dyn SettlementExecutor) -> Result<(), EngineError> {
    let matches = matching::find_matches(store).await?;

    for m in &matches {
        if let Err(err) = executor.settle(m).await {
            tracing::error!(
                make_order_id = m.make_order.order_id,
                take_order_id = m.take_order.order_id,
                error = %err,
                "settlement failed, aborting the rest of this batch"
            );
            return Err(EngineError::SettlementFailure(err.to_string()));
        }

        if let Err(err) = store.update_order(&m.make_order).await {
            tracing::error!(order_id = m.make_order.order_id, error = %err, "failed to persist maker order update");
        }
        if let Err(err) = store.update_order(&m.take_order).await {
            tracing::error!(order_id = m.take_order.order_id, error = %err, "failed to persist taker order update");
        }
    }

    Ok(())
}
