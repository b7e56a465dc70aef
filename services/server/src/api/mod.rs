//! HTTP API handlers and routing.

mod auth;
mod data;
pub mod error;
mod health;

use axum::{
    http::{header, HeaderName, Method},
    middleware, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub use auth::PIN_HEADER;

/// Create the main API router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(PIN_HEADER)])
        .allow_origin(Any);

    // Every /api route sits behind the PIN gate.
    let api = data::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_pin,
    ));

    Router::new()
        // Health endpoints (no auth required)
        .merge(health::routes())
        // Document API
        .nest("/api", api)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Application state
        .with_state(state)
}
