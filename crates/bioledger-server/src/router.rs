use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::state::AppState;

/// Build the axum router with all BioLedger endpoints.
pub fn build_router(state: AppState) -> Router {
    let limiter = RateLimiter::new(state.config.rate_limit.clone());

    Router::new()
        .route("/", get(handler::info_handler))
        .route("/health", get(handler::health_handler))
        .route("/register_biometric", post(handler::register_handler))
        .route("/verify_biometric", post(handler::verify_handler))
        .route("/status", get(handler::status_handler))
        .route("/validate", get(handler::validate_handler))
        .route("/chain", get(handler::chain_handler))
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
