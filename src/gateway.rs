//! HTTP ingress: `POST /orders` and `GET /health`.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::errors::EngineError;
use crate::intake;
use crate::models::Order;
use crate::store::OrderStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
}

/// Builds the router: CORS matches the reference service exactly
/// (`GET, POST, PUT, HEAD, OPTIONS`, `X-Requested-With`/`Content-Type`
/// headers, any origin) since order submission is meant to be called
/// directly from a browser wallet.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::HEAD,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::HeaderName::from_static("x-requested-with"),
            axum::http::header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/orders", post(submit_order))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    axum::http::StatusCode::OK
}

async fn submit_order(
    State(state): State<AppState>,
    Json(order): Json<Order>,
) -> Result<impl IntoResponse, EngineError> {
    let persisted = intake::add_order(state.store.as_ref(), order).await?;
    Ok((axum::http::StatusCode::CREATED, Json(persisted)))
}
