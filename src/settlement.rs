//! Settlement: executes the two-leg transfer implied by a [`Match`] against
//! an on-chain (or otherwise external) ledger.
//!
//! The quote leg is deliberately computed in `f64` and truncated to an
//! integer rather than carried through as a `BigInt` - this mirrors the
//! reference transfer math exactly and is a known precision loss, not a bug
//! to fix here.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Match;

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("transfer failed: {0}")]
    TransferFailed(String),
}

#[async_trait]
pub trait SettlementExecutor: Send + Sync {
    /// Moves both legs of `m` between `m.make_order.trader` and
    /// `m.take_order.trader`. Implementations should treat this as a single
    /// unit: if either leg fails, return an error and transfer nothing.
    async fn settle(&self, m: &Match) -> Result<(), SettlementError>;
}

/// Computes `(taker_sends, maker_sends)`: the amounts that move from taker
/// to maker and from maker to taker. One leg is always exactly
/// `m.new_fills` (the base-denominated amount already computed by the fill
/// calculator); the other leg is `new_fills` converted to its quote value by
/// dividing the float-narrowed fill amount by the relevant side's price and
/// truncating to an integer. Which side carries which leg, and whose price
/// is used as the divisor, depends on whether the taker is the seller.
fn transfer_amounts(m: &Match) -> (i64, i64) {
    use num_traits::ToPrimitive;

    let fills_float = m.new_fills.to_f64().unwrap_or(0.0);
    let base_amount = m.new_fills.to_i64().unwrap_or(i64::MAX);

    if m.take_order.is_up_for_sale {
        let maker_sends = (fills_float / m.take_order.price) as i64;
        (base_amount, maker_sends)
    } else {
        let taker_sends = (fills_float / m.make_order.price) as i64;
        (taker_sends, base_amount)
    }
}

/// A logging-only [`SettlementExecutor`]: records the transfer it would make
/// without touching any ledger. Useful as a default so the crate runs
/// end-to-end without a chain connection configured.
#[derive(Debug, Default)]
pub struct LoggingSettlementExecutor;

#[async_trait]
impl SettlementExecutor for LoggingSettlementExecutor {
    async fn settle(&self, m: &Match) -> Result<(), SettlementError> {
        let (taker_sends, maker_sends) = transfer_amounts(m);
        let taker = &m.take_order.trader;
        let maker = &m.make_order.trader;

        tracing::info!(
            from = %taker,
            to = %maker,
            amount = taker_sends,
            "leg 1: taker sends"
        );
        tracing::info!(
            from = %maker,
            to = %taker,
            amount = maker_sends,
            "leg 2: maker sends"
        );
        Ok(())
    }
}
