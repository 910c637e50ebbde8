// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides HTTP request handlers for the marketplace API server.
//! Read handlers lean on the catalog's degradation guarantees and never fail;
//! write handlers surface validation and store errors as client-visible
//! statuses.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use marketplace_types::{
    Asset, Bid, NewAsset, NewBid, Notification, PlatformStats, ProfileUpdate, UserProfile,
};
use serde::{Deserialize, Serialize};
use service_client::ConnectionStatusSnapshot;
use utoipa::ToSchema;

use crate::{
    error::ServerError,
    extractors::JsonExtractor,
    metrics::record_probe,
    state::{HealthCheck, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns process liveness, version and environment information, plus whether a backing-service connection test has run since startup. Never touches the backing services itself.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> Json<HealthCheck> {
    Json(state.health_check().await)
}

/// Connection status of the backing services plus wallet configuration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectionStatusView {
    /// Latest probe reports per service
    #[serde(flatten)]
    pub snapshot: ConnectionStatusSnapshot,
    /// Whether a probe round is currently running
    pub testing: bool,
}

/// Current connection status
#[utoipa::path(
    get,
    path = "/v1/status",
    tag = "status",
    summary = "Current connection status",
    description = "Returns the most recent probe reports for the relational store, the chain RPC endpoint and the pinning service, without running new probes. Reports are absent until the first test.",
    responses(
        (status = 200, description = "Current connection snapshot", body = ConnectionStatusView)
    )
)]
pub async fn connection_status_handler(
    State(state): State<ServerState>,
) -> Json<ConnectionStatusView> {
    let monitor = state.monitor();

    Json(ConnectionStatusView {
        snapshot: monitor.current().await,
        testing: monitor.is_testing(),
    })
}

/// Run a full connection test round
#[utoipa::path(
    post,
    path = "/v1/status/test",
    tag = "status",
    summary = "Probe all backing services",
    description = "Probes the relational store, the chain RPC endpoint and the pinning service concurrently and returns the refreshed snapshot. Unconfigured services are reported as such without network traffic.",
    responses(
        (status = 200, description = "Refreshed connection snapshot", body = ConnectionStatusView)
    )
)]
pub async fn run_connection_test_handler(
    State(state): State<ServerState>,
) -> Json<ConnectionStatusView> {
    let monitor = state.monitor();
    let snapshot = monitor.test_all().await;

    for (service, report) in [
        ("store", snapshot.store.as_ref()),
        ("chain", snapshot.chain.as_ref()),
        ("pinning", snapshot.pinning.as_ref()),
    ] {
        if let Some(report) = report {
            record_probe(service, report);
        }
    }

    Json(ConnectionStatusView {
        snapshot,
        testing: monitor.is_testing(),
    })
}

/// List all marketplace assets
#[utoipa::path(
    get,
    path = "/v1/assets",
    tag = "assets",
    summary = "List marketplace assets",
    description = "Returns the full asset catalog, newest first, with owner, creator, bid and activity data attached. Serves the built-in fallback collection when the store is unconfigured or unreachable.",
    responses(
        (status = 200, description = "Asset catalog", body = Vec<Asset>)
    )
)]
pub async fn list_assets_handler(State(state): State<ServerState>) -> Json<Vec<Asset>> {
    Json(state.catalog().fetch_all().await)
}

/// Fetch a single asset by id
#[utoipa::path(
    get,
    path = "/v1/assets/{id}",
    tag = "assets",
    summary = "Fetch one asset",
    description = "Returns one fully assembled asset. Falls back to the built-in collection when the store cannot serve the id.",
    params(
        ("id" = String, Path, description = "Asset identifier")
    ),
    responses(
        (status = 200, description = "The requested asset", body = Asset),
        (status = 404, description = "No such asset", body = String)
    )
)]
pub async fn get_asset_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Asset>, ServerError> {
    let asset = state
        .catalog()
        .fetch_one(&id)
        .await
        .ok_or_else(|| ServerError::not_found(format!("asset {id}")))?;

    Ok(Json(asset))
}

/// Mint a new asset listing
#[utoipa::path(
    post,
    path = "/v1/assets",
    tag = "assets",
    summary = "Mint a new asset",
    description = "Validates and persists a new asset listing. The creator wallet becomes the initial owner and the asset is listed immediately.",
    request_body = NewAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Invalid draft", body = String),
        (status = 502, description = "Store rejected the write", body = String)
    )
)]
pub async fn create_asset_handler(
    State(state): State<ServerState>,
    JsonExtractor(draft): JsonExtractor<NewAsset>,
) -> Result<(StatusCode, Json<Asset>), ServerError> {
    let asset = state.catalog().create_asset(draft).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Place a bid on an asset
#[utoipa::path(
    post,
    path = "/v1/assets/{id}/bids",
    tag = "assets",
    summary = "Place a bid",
    description = "Records a bid against an existing asset and notifies the owner. The bid amount must be a positive finite number.",
    params(
        ("id" = String, Path, description = "Asset identifier")
    ),
    request_body = NewBid,
    responses(
        (status = 201, description = "Bid recorded", body = Bid),
        (status = 400, description = "Invalid bid", body = String),
        (status = 404, description = "No such asset", body = String),
        (status = 502, description = "Store rejected the write", body = String)
    )
)]
pub async fn place_bid_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonExtractor(draft): JsonExtractor<NewBid>,
) -> Result<(StatusCode, Json<Bid>), ServerError> {
    let bid = state.catalog().place_bid(&id, draft).await?;
    Ok((StatusCode::CREATED, Json(bid)))
}

/// Purchase request body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    /// Wallet buying the asset
    #[schema(example = "0x1234567890abcdef1234567890abcdef12345678")]
    pub buyer_wallet: String,
}

/// Purchase an asset
#[utoipa::path(
    post,
    path = "/v1/assets/{id}/purchase",
    tag = "assets",
    summary = "Purchase an asset",
    description = "Transfers ownership of a listed asset to the buyer, delists it, and records the transaction, sale activity and notifications for both parties.",
    params(
        ("id" = String, Path, description = "Asset identifier")
    ),
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Updated asset after the sale", body = Asset),
        (status = 400, description = "Asset not listed or buyer already owns it", body = String),
        (status = 404, description = "No such asset", body = String),
        (status = 502, description = "Store rejected the transfer", body = String)
    )
)]
pub async fn purchase_asset_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<PurchaseRequest>,
) -> Result<Json<Asset>, ServerError> {
    let asset = state
        .catalog()
        .purchase_asset(&id, &request.buyer_wallet)
        .await?;

    Ok(Json(asset))
}

/// Marketplace-wide statistics
#[utoipa::path(
    get,
    path = "/v1/stats",
    tag = "stats",
    summary = "Marketplace statistics",
    description = "Returns aggregate marketplace counters. Serves representative fallback numbers when the store cannot be read.",
    responses(
        (status = 200, description = "Aggregate statistics", body = PlatformStats)
    )
)]
pub async fn platform_stats_handler(State(state): State<ServerState>) -> Json<PlatformStats> {
    Json(state.catalog().platform_stats().await)
}

/// Fetch a user profile by wallet
#[utoipa::path(
    get,
    path = "/v1/profiles/{wallet}",
    tag = "profiles",
    summary = "Fetch a user profile",
    description = "Returns the stored profile for a wallet address.",
    params(
        ("wallet" = String, Path, description = "Wallet address")
    ),
    responses(
        (status = 200, description = "The stored profile", body = UserProfile),
        (status = 404, description = "No profile for this wallet", body = String)
    )
)]
pub async fn get_profile_handler(
    State(state): State<ServerState>,
    Path(wallet): Path<String>,
) -> Result<Json<UserProfile>, ServerError> {
    let profile = state
        .catalog()
        .profile(&wallet)
        .await
        .ok_or_else(|| ServerError::not_found(format!("profile {wallet}")))?;

    Ok(Json(profile))
}

/// Create or update a user profile
#[utoipa::path(
    put,
    path = "/v1/profiles",
    tag = "profiles",
    summary = "Upsert a user profile",
    description = "Creates or updates the profile keyed by wallet address. Absent fields are left unchanged.",
    request_body = ProfileUpdate,
    responses(
        (status = 204, description = "Profile stored"),
        (status = 400, description = "Missing wallet address", body = String),
        (status = 502, description = "Store rejected the write", body = String)
    )
)]
pub async fn update_profile_handler(
    State(state): State<ServerState>,
    JsonExtractor(update): JsonExtractor<ProfileUpdate>,
) -> Result<StatusCode, ServerError> {
    state.catalog().update_profile(update).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List notifications for a wallet
#[utoipa::path(
    get,
    path = "/v1/notifications/{wallet}",
    tag = "profiles",
    summary = "List notifications",
    description = "Returns the notifications addressed to a wallet, newest first. An unreachable store yields an empty list.",
    params(
        ("wallet" = String, Path, description = "Wallet address")
    ),
    responses(
        (status = 200, description = "Notifications for the wallet", body = Vec<Notification>)
    )
)]
pub async fn list_notifications_handler(
    State(state): State<ServerState>,
    Path(wallet): Path<String>,
) -> Json<Vec<Notification>> {
    Json(state.catalog().notifications(&wallet).await)
}
