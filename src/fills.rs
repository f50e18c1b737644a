//! Fill calculator - given two crossing orders, computes the transferred
//! base units and advances both orders' filled amounts.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::bignum;
use crate::errors::EngineError;
use crate::models::Order;

/// Matches `left` against `right`, mutating each order's `fills` field in
/// place. Returns `(left_remaining_after, right_remaining_after,
/// transferred)`. There is no significance to which order is `left` and
/// which is `right`.
pub fn fill_orders(
    left: &mut Order,
    right: &mut Order,
) -> Result<(BigInt, BigInt, BigInt), EngineError> {
    let left_fill = left.fills_as_bigint()?;
    let right_fill = right.fills_as_bigint()?;

    let left_target = left.base_asset().value_as_bigint()?;
    let right_target = right.base_asset().value_as_bigint()?;

    let left_remaining = &left_target - &left_fill;
    let right_remaining = &right_target - &right_fill;

    let transferred = if bignum::less_than(&right_remaining, &left_remaining) {
        right_remaining.clone()
    } else {
        left_remaining.clone()
    };

    if bignum::less_than_or_equal(&transferred, &BigInt::zero()) {
        // Should never happen as long as exhausted orders are removed from
        // the book before they're offered as a counterparty again.
        tracing::warn!(
            left_order_id = left.order_id,
            left_fill = %left_fill,
            right_order_id = right.order_id,
            right_fill = %right_fill,
            "matched orders resulted in no fill"
        );
    }

    let new_left_fill = &left_fill + &transferred;
    left.set_fills(&new_left_fill);
    let new_right_fill = &right_fill + &transferred;
    right.set_fills(&new_right_fill);

    let left_remaining_after = &left_remaining - &transferred;
    let right_remaining_after = &right_remaining - &transferred;

    Ok((left_remaining_after, right_remaining_after, transferred))
}
