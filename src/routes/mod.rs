//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the `drawings` collection endpoints and a health check under a
//! single Axum router. `HttpDrawingStore` is the matching client.

pub mod drawings;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the service router over `state`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/drawings", get(drawings::list_lat_range).post(drawings::create_drawing))
        .route("/api/drawings/nearby", get(drawings::list_nearby))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
