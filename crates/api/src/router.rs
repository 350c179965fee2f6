//! Application router builder.
//!
//! [`build_app_router`] is shared by the binary and the integration tests so
//! both exercise the same middleware stack.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::config::ServerConfig;
use crate::middleware;
use crate::routes;
use crate::routing::{Dispatcher, Router};
use crate::state::AppState;

/// Prefix for every resource route.
pub const API_PREFIX: &str = "/api/v1";

/// Register middlewares and routes, then freeze them with `state`.
///
/// Middlewares run in registration order, outermost first:
///
/// 1. Panic recovery
/// 2. Request logging
/// 3. Request timeout
pub fn build_dispatcher(state: AppState) -> Dispatcher<AppState> {
    let mut root = Router::new();
    root.middleware(middleware::recover)
        .middleware(middleware::log_requests)
        .middleware(middleware::timeout(Duration::from_secs(
            state.config.request_timeout_secs,
        )));

    let api = root.group(API_PREFIX);
    routes::mount(&api);

    root.into_dispatcher(state)
}

/// Host the dispatcher in an axum router with CORS and request-id layers.
///
/// Layers are applied bottom-up:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Propagate request ID to the response
pub fn build_app_router(state: AppState) -> axum::Router {
    let cors = build_cors_layer(&state.config);
    let request_id_header = HeaderName::from_static("x-request-id");

    axum::Router::new()
        .fallback_service(build_dispatcher(state))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
}

/// Build the CORS middleware layer from server configuration.
///
/// Panics at startup if any configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
