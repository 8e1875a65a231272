//! HTTP route handlers for the lookup API.
//!
//! All API responses carry `Cache-Control: no-store`; the dataset can be
//! reloaded between requests, so intermediaries must not cache.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod county_data;
pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_API;
use crate::error::AppError;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Structured 405 for known paths hit with the wrong method. Axum's
/// default has an empty body; the API promises a JSON error envelope.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Structured 404 for unknown paths.
async fn unknown_endpoint() -> AppError {
    AppError::NotFound("no such endpoint".to_string())
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/county_data", post(county_data::lookup))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_API),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(unknown_endpoint)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
