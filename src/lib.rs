//! orders_manager - a limit-order matching engine core for a simple
//! on-chain spot exchange.
//!
//! # Modules
//!
//! - [`core_types`] - shared id/time type aliases
//! - [`bignum`] - arbitrary-precision amount parsing and comparison
//! - [`errors`] - the crate-wide error enum and its HTTP mapping
//! - [`models`] - `Order`, `Asset`, `Match`
//! - [`priority`] - the index-addressable order priority queue
//! - [`orderbook`] - the transient per-base-asset order book
//! - [`fills`] - the fill calculator
//! - [`matching`] - the matching engine itself
//! - [`intake`] - order validation, price derivation, and submission
//! - [`store`] - the order repository trait and an in-memory reference impl
//! - [`settlement`] - the settlement executor trait and a logging reference impl
//! - [`driver`] - the background matching/settlement loop
//! - [`gateway`] - the HTTP ingress
//! - [`config`] - environment-based runtime configuration
//! - [`logging`] - structured logging setup

// Core types - must be first!
pub mod core_types;

pub mod bignum;
pub mod errors;
pub mod models;

pub mod fills;
pub mod orderbook;
pub mod priority;
pub mod matching;

pub mod intake;
pub mod store;
pub mod settlement;
pub mod driver;
pub mod gateway;

pub mod config;
pub mod logging;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use errors::EngineError;
pub use models::{Asset, Match, MatchedStatus, Order};
pub use settlement::SettlementExecutor;
pub use store::OrderStore;
