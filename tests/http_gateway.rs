//! HTTP-layer coverage for the gateway: CORS preflight headers, exercised
//! from outside the crate the way a real client would see them.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use orders_manager::gateway::{self, AppState};
use orders_manager::store::InMemoryOrderStore;
use tower::util::ServiceExt;

fn app() -> axum::Router {
    gateway::router(AppState {
        store: Arc::new(InMemoryOrderStore::new()),
    })
}

#[tokio::test]
async fn preflight_request_gets_cors_headers() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/orders")
                .header(header::ORIGIN, "https://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn health_endpoint_is_reachable() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
