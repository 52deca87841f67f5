//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Path the checkout trigger posts carts to
pub const CREATE_SESSION_PATH: &str = "/api/stripe/create-session";

/// Create the main application router
///
/// Routes:
/// - POST /api/stripe/create-session - Cart to hosted checkout session
/// - GET  /health, /                 - Health check
/// - GET  /order/success             - Success landing page
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route(CREATE_SESSION_PATH, post(handlers::create_session))
        .route("/order/success", get(handlers::order_success))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
