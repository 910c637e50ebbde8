// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the marketplace
//! API server.

pub mod handlers;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use handlers::{
    connection_status_handler, create_asset_handler, get_asset_handler, get_profile_handler,
    health_handler, list_assets_handler, list_notifications_handler, place_bid_handler,
    platform_stats_handler, purchase_asset_handler, run_connection_test_handler,
    update_profile_handler,
};

use crate::{
    metrics::{metrics_handler, track_requests},
    middleware::{RateLimiter, rate_limiting_middleware},
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes with conditional rate limiting
#[allow(clippy::needless_pass_by_value)] // We need to clone the rate limiter for middleware
pub fn create_routes(rate_limiter: RateLimiter) -> Router<ServerState> {
    // Health and metrics endpoints are not rate limited for monitoring purposes
    let ops_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    // Documentation endpoints are not rate limited
    let docs_routes = Router::new()
        .route("/api-docs/openapi.json", get(openapi_spec))
        .route("/docs", get(swagger_ui));

    // API endpoints - conditionally apply rate limiting
    let mut api_routes = Router::new()
        .route("/status", get(connection_status_handler))
        .route("/status/test", post(run_connection_test_handler))
        .route(
            "/assets",
            get(list_assets_handler).post(create_asset_handler),
        )
        .route("/assets/{id}", get(get_asset_handler))
        .route("/assets/{id}/bids", post(place_bid_handler))
        .route("/assets/{id}/purchase", post(purchase_asset_handler))
        .route("/stats", get(platform_stats_handler))
        .route("/profiles/{wallet}", get(get_profile_handler))
        .route("/profiles", put(update_profile_handler))
        .route("/notifications/{wallet}", get(list_notifications_handler));

    // Only apply rate limiting middleware if enabled
    if rate_limiter.is_enabled() {
        api_routes = api_routes.layer(middleware::from_fn_with_state(
            rate_limiter.clone(),
            rate_limiting_middleware,
        ));
    }

    let v1 = Router::new().nest("/v1", api_routes);

    Router::new()
        .merge(ops_routes)
        .merge(docs_routes)
        .merge(v1)
        .layer(middleware::from_fn(track_requests))
}
