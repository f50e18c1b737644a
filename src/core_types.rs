//! Core type aliases used throughout the crate.
//!
//! Kept separate from [`crate::models`] so the numeric representation of an
//! id can change without every module that threads one through changing too.

/// Store-assigned primary key for an `Order`, immutable once assigned.
pub type OrderId = i64;

/// Store-assigned primary key for an `Asset` row.
pub type AssetRowId = u64;

/// Unix epoch seconds.
pub type EpochSecond = i64;
