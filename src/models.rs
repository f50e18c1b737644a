//! The core data model: `Order`, `Asset`, `Match`.

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::bignum;
use crate::core_types::{AssetRowId, EpochSecond, OrderId};
use crate::errors::EngineError;

/// Index of the base asset within `Order::assets`.
pub const ASSET_BASE: usize = 0;
/// Index of the quote asset within `Order::assets`.
pub const ASSET_QUOTE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum MatchedStatus {
    /// Validated and propagated; ready to be matched.
    Init = 1,
    /// Has been partially matched.
    PartialMatchConfirmed = 2,
    /// Has been fully matched.
    FullMatchConfirmed = 3,
}

impl MatchedStatus {
    /// Whether an order in this status still belongs in the matchable pool.
    pub fn is_matchable(self) -> bool {
        matches!(self, MatchedStatus::Init | MatchedStatus::PartialMatchConfirmed)
    }
}

/// A token balance attached to an order: either its base or its quote leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: AssetRowId,
    #[serde(default)]
    pub orderbook_id: OrderId,
    pub virtual_token: String,
    pub value: String,
}

impl Asset {
    pub fn value_as_bigint(&self) -> Result<BigInt, EngineError> {
        bignum::parse_amount(&self.value)
    }
}

/// A resting or incoming limit order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, rename = "id")]
    pub order_id: OrderId,
    pub trader: String,
    pub is_up_for_sale: bool,
    #[serde(default = "default_status")]
    pub status: MatchedStatus,
    #[serde(default)]
    pub price: f64,
    /// Exactly two elements: `[base, quote]`. See [`ASSET_BASE`]/[`ASSET_QUOTE`].
    pub assets: Vec<Asset>,
    #[serde(default = "default_fills")]
    pub fills: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub created_at: EpochSecond,
}

fn default_status() -> MatchedStatus {
    MatchedStatus::Init
}

fn default_fills() -> String {
    "0".to_string()
}

impl Order {
    pub fn base_asset(&self) -> &Asset {
        &self.assets[ASSET_BASE]
    }

    pub fn quote_asset(&self) -> &Asset {
        &self.assets[ASSET_QUOTE]
    }

    pub fn fills_as_bigint(&self) -> Result<BigInt, EngineError> {
        bignum::parse_amount(&self.fills)
    }

    pub fn set_fills(&mut self, value: &BigInt) {
        self.fills = bignum::format_amount(value);
    }
}

/// A candidate match produced by the matching engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub make_order: Order,
    pub take_order: Order,
    #[serde(with = "bigint_as_string")]
    pub new_fills: BigInt,
}

mod bigint_as_string {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigInt, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BigInt, D::Error> {
        let raw = String::deserialize(d)?;
        BigInt::from_str(&raw).map_err(serde::de::Error::custom)
    }
}
