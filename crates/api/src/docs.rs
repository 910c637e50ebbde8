// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition
//!
//! Collects every handler and schema into the specification served at
//! `/api-docs/openapi.json`.

use utoipa::OpenApi;

/// `OpenAPI` documentation for the marketplace API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace API",
        description = "Data access and resilience layer for the marketplace: asset catalog, bids, purchases, profiles and backing-service health.",
        license(name = "Apache-2.0")
    ),
    paths(
        crate::routes::handlers::health_handler,
        crate::routes::handlers::connection_status_handler,
        crate::routes::handlers::run_connection_test_handler,
        crate::routes::handlers::list_assets_handler,
        crate::routes::handlers::get_asset_handler,
        crate::routes::handlers::create_asset_handler,
        crate::routes::handlers::place_bid_handler,
        crate::routes::handlers::purchase_asset_handler,
        crate::routes::handlers::platform_stats_handler,
        crate::routes::handlers::get_profile_handler,
        crate::routes::handlers::update_profile_handler,
        crate::routes::handlers::list_notifications_handler,
    ),
    components(schemas(
        crate::routes::handlers::ConnectionStatusView,
        crate::routes::handlers::PurchaseRequest,
        crate::state::HealthCheck,
        crate::config::Environment,
        marketplace_types::Asset,
        marketplace_types::AssetCategory,
        marketplace_types::Bid,
        marketplace_types::NewAsset,
        marketplace_types::NewBid,
        marketplace_types::PricePoint,
        marketplace_types::ActivityEvent,
        marketplace_types::ActivityKind,
        marketplace_types::Notification,
        marketplace_types::PlatformStats,
        marketplace_types::UserProfile,
        marketplace_types::UserSummary,
        marketplace_types::ProfileUpdate,
        service_client::ConnectionStatusSnapshot,
        service_client::HealthReport,
        service_client::TableStatus,
    )),
    tags(
        (name = "health", description = "Process liveness"),
        (name = "status", description = "Backing-service connection health"),
        (name = "assets", description = "Asset catalog, bids and purchases"),
        (name = "stats", description = "Marketplace-wide statistics"),
        (name = "profiles", description = "User profiles and notifications")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_includes_all_routes() {
        let doc = ApiDoc::openapi();

        for path in [
            "/health",
            "/v1/status",
            "/v1/status/test",
            "/v1/assets",
            "/v1/assets/{id}",
            "/v1/assets/{id}/bids",
            "/v1/assets/{id}/purchase",
            "/v1/stats",
            "/v1/profiles/{wallet}",
            "/v1/profiles",
            "/v1/notifications/{wallet}",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path: {path}"
            );
        }
    }

    #[test]
    fn openapi_document_serializes() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("Marketplace API"));
        assert!(json.contains("ConnectionStatusView"));
    }
}
