//! Error kinds shared by every layer of the crate.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the matching core and the services wrapped around it.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed order: nil input, missing assets, missing trader, an
    /// unparseable amount, or a zero base amount. Surfaced to HTTP callers
    /// as `400`.
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// The order store could not be reached. Fatal at startup; logged and
    /// skipped at runtime.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// `get_priority_list` failed; the current matching cycle is abandoned
    /// and retried on the next tick.
    #[error("failed to retrieve orders: {0}")]
    RetrievalFailure(String),

    /// A ledger transfer failed; the current settlement run is aborted.
    #[error("settlement failed: {0}")]
    SettlementFailure(String),

    /// Anything else - logged as a warning, never surfaced to a caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for EngineError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            EngineError::InvalidOrder(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}
