//! Order-intake validation and price derivation.

use chrono::Utc;

use crate::bignum;
use crate::errors::EngineError;
use crate::models::{MatchedStatus, Order};
use crate::store::OrderStore;

/// Rejects malformed orders: missing assets, missing trader, or the wrong
/// number of assets.
pub fn validate_order(order: &Order) -> Result<(), EngineError> {
    if order.trader.is_empty() {
        return Err(EngineError::InvalidOrder("missing order trader".into()));
    }
    if order.assets.len() != 2 {
        return Err(EngineError::InvalidOrder("missing order assets".into()));
    }
    Ok(())
}

/// Computes the quoted price for one unit of the base currency:
/// `quote_value / base_value`, dividing in arbitrary-precision decimal space
/// and narrowing only the quotient to `f64`, so neither operand is rounded
/// before the divide.
pub fn calculate_price(base_value: &str, quote_value: &str) -> Result<f64, EngineError> {
    use bigdecimal::BigDecimal;
    use num_traits::ToPrimitive;

    let base = bignum::parse_decimal(base_value)?;
    let quote = bignum::parse_decimal(quote_value)?;
    if base == BigDecimal::from(0) {
        return Err(EngineError::InvalidOrder(
            "base asset value must be non-zero".into(),
        ));
    }
    let price = quote / base;
    price
        .to_f64()
        .ok_or_else(|| EngineError::InvalidOrder("price out of representable range".into()))
}

/// Validates, derives the price, and persists a newly submitted order.
/// Returns the persisted order (with its store-assigned `order_id`).
pub async fn add_order(store: &dyn OrderStore, mut incoming: Order) -> Result<Order, EngineError> {
    validate_order(&incoming)?;

    let price = calculate_price(&incoming.base_asset().value, &incoming.quote_asset().value)?;

    incoming.status = MatchedStatus::Init;
    incoming.fills = "0".to_string();
    incoming.price = price;
    if incoming.created_at == 0 {
        incoming.timestamp = Utc::now();
        incoming.created_at = incoming.timestamp.timestamp();
    }

    store.add_order(&mut incoming).await?;

    Ok(incoming)
}
