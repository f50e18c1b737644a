//! The matching engine: `find_matches`, `do_find_matches`,
//! `match_single_order`.
//!
//! This is a straight-line, single-pass crossing algorithm over a transient
//! [`OrderBook`] rebuilt from a time-priority-sorted slice on every run. It
//! intentionally does not loop: a `for { ... }` that runs once is the
//! reference behavior (see the design notes on the re-run loop), and this
//! implementation reproduces that rather than inventing the validate/prune
//! iteration the surrounding comment in the source hints at.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::bignum;
use crate::errors::EngineError;
use crate::fills::fill_orders;
use crate::models::{MatchedStatus, Order};
use crate::orderbook::OrderBook;
use crate::store::OrderStore;

/// Matching runs never emit more than this many candidate matches.
pub const MAX_MATCHES_PER_RUN: usize = 5;

/// Fetches the current matchable pool from the store, deep-copies it so the
/// walk below never mutates what the store handed back, and runs the
/// matching algorithm over the copy.
pub async fn find_matches(store: &dyn OrderStore) -> Result<Vec<crate::models::Match>, EngineError> {
    const ALL_STATUSES: [MatchedStatus; 3] = [
        MatchedStatus::Init,
        MatchedStatus::PartialMatchConfirmed,
        MatchedStatus::FullMatchConfirmed,
    ];
    let statuses: Vec<MatchedStatus> = ALL_STATUSES.into_iter().filter(|s| s.is_matchable()).collect();
    let orders = store
        .get_priority_list(&statuses)
        .await
        .map_err(|e| EngineError::RetrievalFailure(e.to_string()))?;

    tracing::info!(count = orders.len(), "length of outstanding orders in store");

    // Deep copy: matching mutates fills/status on the orders it walks. The
    // store already hands back owned, independent `Order` values (not
    // references into its internal table), so this list is already safe to
    // mutate without touching what's persisted - nothing is written back
    // until settlement explicitly calls `update_order`.
    tracing::info!(
        max_matches = MAX_MATCHES_PER_RUN,
        candidates = orders.len(),
        "searching for matches"
    );
    let matches = do_find_matches(orders, MAX_MATCHES_PER_RUN);
    tracing::info!(count = matches.len(), "identified matches");
    Ok(matches)
}

/// Runs the matching algorithm against `orders`, assumed already sorted in
/// priority order (time ascending, then asset id). Stops as soon as
/// `max_matches` candidates have been produced.
pub fn do_find_matches(orders: Vec<Order>, max_matches: usize) -> Vec<crate::models::Match> {
    let mut matches = Vec::new();
    let mut book = OrderBook::new();

    for order in orders {
        let base_token = order.base_asset().virtual_token.clone();
        let side = book.side_mut(&base_token);
        matches.extend(match_single_order(order, side));

        if matches.len() >= max_matches {
            matches.truncate(max_matches);
            break;
        }
    }

    matches
}

/// Attempts to match a single order against its opposing queue in `side`,
/// adding it to its own queue if it cannot be entirely matched. Returns the
/// resulting matches.
pub fn match_single_order(
    mut order: Order,
    side: &mut crate::orderbook::BookSide,
) -> Vec<crate::models::Match> {
    let mut matches = Vec::new();

    let own_is_asks = order.is_up_for_sale;

    let mut order_remaining = match (order.base_asset().value_as_bigint(), order.fills_as_bigint())
    {
        (Ok(target), Ok(fills)) => target - fills,
        _ => return matches,
    };

    let opp_len = |s: &crate::orderbook::BookSide| if own_is_asks { s.bids.len() } else { s.asks.len() };

    let mut i = 0usize;
    while i < opp_len(side) && bignum::greater_than(&order_remaining, &BigInt::zero()) {
        let counterparty_price = if own_is_asks {
            side.bids.peek(i).price
        } else {
            side.asks.peek(i).price
        };
        let counterparty_trader = if own_is_asks {
            side.bids.peek(i).trader.clone()
        } else {
            side.asks.peek(i).trader.clone()
        };
        let counterparty_order_id = if own_is_asks {
            side.bids.peek(i).order_id
        } else {
            side.asks.peek(i).order_id
        };

        // Price check: a cross only occurs when bid.price >= ask.price.
        // Once we see one unsuitable price, everything further down the
        // book is only worse, so stop walking.
        if (!own_is_asks && order.price < counterparty_price)
            || (own_is_asks && order.price > counterparty_price)
        {
            tracing::info!(
                order_id = order.order_id,
                "not matched further (price unsuitable)"
            );
            break;
        }

        // Self-trade prevention: skip this slot, do not advance i again -
        // the loop's own increment handles that.
        if order.trader == counterparty_trader {
            tracing::info!(
                order_id = order.order_id,
                counterparty_order_id,
                "not matched (same trader)"
            );
            i += 1;
            continue;
        }

        let (order_rem_after, counterparty_rem_after, new_fills) = {
            let counterparty = if own_is_asks {
                side.bids.peek_mut(i)
            } else {
                side.asks.peek_mut(i)
            };
            match fill_orders(&mut order, counterparty) {
                Ok(v) => v,
                Err(_) => break,
            }
        };
        order_remaining = order_rem_after;
        order.status = MatchedStatus::PartialMatchConfirmed;

        let counterparty_exhausted = bignum::less_than_or_equal(&counterparty_rem_after, &BigInt::zero());
        let new_counterparty_status = if counterparty_exhausted {
            // Status inflation quirk (intentional, preserved from the
            // source): the counterparty being exhausted promotes *both*
            // orders to FullMatchConfirmed, even though the incoming order
            // may still have order_remaining > 0.
            order.status = MatchedStatus::FullMatchConfirmed;
            MatchedStatus::FullMatchConfirmed
        } else {
            MatchedStatus::PartialMatchConfirmed
        };
        if own_is_asks {
            side.bids.peek_mut(i).status = new_counterparty_status;
        } else {
            side.asks.peek_mut(i).status = new_counterparty_status;
        }

        let make_order = if counterparty_exhausted {
            if own_is_asks {
                side.bids.remove(i)
            } else {
                side.asks.remove(i)
            }
        } else if own_is_asks {
            side.bids.peek(i).clone()
        } else {
            side.asks.peek(i).clone()
        };

        matches.push(crate::models::Match {
            make_order,
            take_order: order.clone(),
            new_fills,
        });

        if !counterparty_exhausted {
            i += 1;
        }
        // If exhausted, the removal already shifted the next element into
        // slot i, so i stays put.
    }

    if bignum::greater_than(&order_remaining, &BigInt::zero()) {
        if own_is_asks {
            side.asks.push(order);
        } else {
            side.bids.push(order);
        }
    }

    matches
}
