// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Relational store connector speaking the PostgREST dialect
//!
//! Every table the marketplace persists lives behind a single REST endpoint
//! (`{base}/rest/v1/{table}`). Reads are equality/ordering filters expressed
//! as query parameters; writes are single-row inserts and upserts. Functional
//! reads and secondary writes route through [`SafeCaller`] so they degrade to
//! fallback values instead of surfacing errors; primary writes return their
//! errors to the caller so the UI can prompt a retry.

use std::{sync::Arc, time::Instant};

use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use service_client::{
    ErrorSink, HealthReport, SafeCaller, ServiceConnector, ServiceError, TableStatus,
};
use tracing::{debug, warn};

use crate::{USER_AGENT, elapsed_ms};

/// Default request timeout for store calls
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Table probed first during a connection test; its reachability is also the
/// write-capability proxy (no write probe is issued during health checks)
const PRIMARY_TABLE: &str = "assets";

/// Tables a fully provisioned store is expected to expose
pub const EXPECTED_TABLES: [&str; 9] = [
    "assets",
    "users",
    "bids",
    "activities",
    "notifications",
    "transactions",
    "price_history",
    "platform_stats",
    "profiles",
];

/// Configuration for the relational store connector
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store deployment (without the `/rest/v1` suffix)
    pub base_url: String,
    /// Anonymous API key sent as both `apikey` and bearer token
    pub anon_key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            anon_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl StoreConfig {
    /// Whether both the base URL and the anon key are present
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// HTTP client for the relational store
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    config: StoreConfig,
    safe: SafeCaller,
}

impl StoreClient {
    /// Create a new store client
    ///
    /// An unconfigured `config` is legal; every call will then short-circuit
    /// with [`ServiceError::NotConfigured`] before touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: StoreConfig, sink: Arc<dyn ErrorSink>) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ServiceError::Internal(anyhow::Error::new(e)))?;

        Ok(Self {
            client,
            config,
            safe: SafeCaller::new("store", sink),
        })
    }

    /// Whether the store credentials are present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.base_url.trim_end_matches('/'))
    }

    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
    }

    fn ensure_configured(&self) -> Result<(), ServiceError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ServiceError::not_configured("store URL or anon key not set"))
        }
    }

    async fn fetch_rows<T>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ServiceError>
    where
        T: DeserializeOwned,
    {
        self.ensure_configured()?;

        debug!(table, "fetching rows from store");

        let response = self
            .request(Method::GET, table)
            .query(query)
            .send()
            .await
            .map_err(request_error)?;
        let response = check_response(response, table).await?;

        response.json::<Vec<T>>().await.map_err(|e| {
            ServiceError::transport(format!("invalid response body from {table}: {e}"))
        })
    }

    async fn insert_row<T>(&self, table: &str, payload: &T) -> Result<(), ServiceError>
    where
        T: Serialize + Sync,
    {
        self.ensure_configured()?;

        let response = self
            .request(Method::POST, table)
            .header("prefer", "return=minimal")
            .json(payload)
            .send()
            .await
            .map_err(request_error)?;
        check_response(response, table).await?;
        Ok(())
    }

    async fn insert_returning<T, R>(&self, table: &str, payload: &T) -> Result<R, ServiceError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        self.ensure_configured()?;

        let response = self
            .request(Method::POST, table)
            .header("prefer", "return=representation")
            .json(payload)
            .send()
            .await
            .map_err(request_error)?;
        let response = check_response(response, table).await?;

        let rows: Vec<R> = response.json().await.map_err(|e| {
            ServiceError::transport(format!("invalid response body from {table}: {e}"))
        })?;
        rows.into_iter().next().ok_or_else(|| {
            ServiceError::transport(format!("insert into {table} returned no representation"))
        })
    }

    // ---- Safe reads (degrade to fallback values) ----

    /// Fetch all asset rows, newest first; empty on any failure
    pub async fn fetch_asset_rows(&self) -> Vec<AssetRow> {
        self.safe
            .execute(
                "fetch_assets",
                async {
                    self.fetch_rows("assets", &[("select", "*"), ("order", "created_at.desc")])
                        .await
                        .map(Some)
                },
                Vec::new(),
            )
            .await
    }

    /// Fetch a single asset row by id; `None` when absent or on failure
    pub async fn fetch_asset_row(&self, asset_id: &str) -> Option<AssetRow> {
        self.safe
            .execute(
                "fetch_asset",
                async {
                    let filter = format!("eq.{asset_id}");
                    let rows: Vec<AssetRow> = self
                        .fetch_rows(
                            "assets",
                            &[("select", "*"), ("id", filter.as_str()), ("limit", "1")],
                        )
                        .await?;
                    Ok(rows.into_iter().next().map(Some))
                },
                None,
            )
            .await
    }

    /// Fetch the user row for a wallet; `None` when absent or on failure
    pub async fn fetch_user_row(&self, wallet: &str) -> Option<UserRow> {
        self.safe
            .execute(
                "fetch_user",
                async {
                    let filter = format!("eq.{wallet}");
                    let rows: Vec<UserRow> = self
                        .fetch_rows(
                            "users",
                            &[
                                ("select", "*"),
                                ("wallet_address", filter.as_str()),
                                ("limit", "1"),
                            ],
                        )
                        .await?;
                    Ok(rows.into_iter().next().map(Some))
                },
                None,
            )
            .await
    }

    /// Fetch bids on an asset, highest amount first; empty on any failure
    pub async fn fetch_bid_rows(&self, asset_id: &str) -> Vec<BidRow> {
        self.safe
            .execute(
                "fetch_bids",
                async {
                    let filter = format!("eq.{asset_id}");
                    self.fetch_rows(
                        "bids",
                        &[
                            ("select", "*"),
                            ("asset_id", filter.as_str()),
                            ("order", "amount.desc"),
                        ],
                    )
                    .await
                    .map(Some)
                },
                Vec::new(),
            )
            .await
    }

    /// Fetch activity events for an asset, newest first; empty on any failure
    pub async fn fetch_activity_rows(&self, asset_id: &str) -> Vec<ActivityRow> {
        self.safe
            .execute(
                "fetch_activities",
                async {
                    let filter = format!("eq.{asset_id}");
                    self.fetch_rows(
                        "activities",
                        &[
                            ("select", "*"),
                            ("asset_id", filter.as_str()),
                            ("order", "created_at.desc"),
                        ],
                    )
                    .await
                    .map(Some)
                },
                Vec::new(),
            )
            .await
    }

    /// Fetch the price history of an asset, oldest first; empty on any failure
    pub async fn fetch_price_history_rows(&self, asset_id: &str) -> Vec<PricePointRow> {
        self.safe
            .execute(
                "fetch_price_history",
                async {
                    let filter = format!("eq.{asset_id}");
                    self.fetch_rows(
                        "price_history",
                        &[
                            ("select", "*"),
                            ("asset_id", filter.as_str()),
                            ("order", "recorded_at.asc"),
                        ],
                    )
                    .await
                    .map(Some)
                },
                Vec::new(),
            )
            .await
    }

    /// Fetch the platform statistics row; `None` when absent or on failure
    pub async fn fetch_stats_row(&self) -> Option<StatsRow> {
        self.safe
            .execute(
                "fetch_stats",
                async {
                    let rows: Vec<StatsRow> = self
                        .fetch_rows("platform_stats", &[("select", "*"), ("limit", "1")])
                        .await?;
                    Ok(rows.into_iter().next().map(Some))
                },
                None,
            )
            .await
    }

    /// Fetch the profile row for a wallet; `None` when absent or on failure
    pub async fn fetch_profile_row(&self, wallet: &str) -> Option<ProfileRow> {
        self.safe
            .execute(
                "fetch_profile",
                async {
                    let filter = format!("eq.{wallet}");
                    let rows: Vec<ProfileRow> = self
                        .fetch_rows(
                            "profiles",
                            &[
                                ("select", "*"),
                                ("wallet_address", filter.as_str()),
                                ("limit", "1"),
                            ],
                        )
                        .await?;
                    Ok(rows.into_iter().next().map(Some))
                },
                None,
            )
            .await
    }

    /// Fetch notifications for a wallet, newest first; empty on any failure
    pub async fn fetch_notification_rows(&self, wallet: &str) -> Vec<NotificationRow> {
        self.safe
            .execute(
                "fetch_notifications",
                async {
                    let filter = format!("eq.{wallet}");
                    self.fetch_rows(
                        "notifications",
                        &[
                            ("select", "*"),
                            ("wallet_address", filter.as_str()),
                            ("order", "created_at.desc"),
                        ],
                    )
                    .await
                    .map(Some)
                },
                Vec::new(),
            )
            .await
    }

    /// Fetch a single asset row with errors surfaced
    ///
    /// Write paths need to tell "asset absent" apart from "store failing";
    /// unlike [`Self::fetch_asset_row`] this does not degrade to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unconfigured or the read fails.
    pub async fn find_asset_row(&self, asset_id: &str) -> Result<Option<AssetRow>, ServiceError> {
        let filter = format!("eq.{asset_id}");
        let rows: Vec<AssetRow> = self
            .fetch_rows(
                "assets",
                &[("select", "*"), ("id", filter.as_str()), ("limit", "1")],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    // ---- Primary writes (errors surface to the caller) ----

    /// Insert a new asset row and return the stored representation
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unconfigured, the insert is rejected,
    /// or the response carries no representation of the stored row.
    pub async fn insert_asset(&self, row: &NewAssetRow) -> Result<AssetRow, ServiceError> {
        self.insert_returning("assets", row).await
    }

    /// Insert a new bid row and return the stored representation
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unconfigured or the insert is rejected.
    pub async fn insert_bid(&self, row: &NewBidRow) -> Result<BidRow, ServiceError> {
        self.insert_returning("bids", row).await
    }

    /// Move ownership of a still-listed asset to a new wallet and delist it
    ///
    /// The update filters on the listed flag as well as the id, so when two
    /// transfers race only the first matches the row. A transfer that matches
    /// nothing resolves to `None` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unconfigured or the update is rejected.
    pub async fn transfer_asset_owner(
        &self,
        asset_id: &str,
        new_owner: &str,
    ) -> Result<Option<AssetRow>, ServiceError> {
        self.ensure_configured()?;

        let filter = format!("eq.{asset_id}");
        let response = self
            .request(Method::PATCH, "assets")
            .query(&[("id", filter.as_str()), ("is_listed", "eq.true")])
            .header("prefer", "return=representation")
            .json(&serde_json::json!({ "owner_wallet": new_owner, "is_listed": false }))
            .send()
            .await
            .map_err(request_error)?;
        let response = check_response(response, "assets").await?;

        let rows: Vec<AssetRow> = response.json().await.map_err(|e| {
            ServiceError::transport(format!("invalid response body from assets: {e}"))
        })?;
        Ok(rows.into_iter().next())
    }

    /// Insert or update the profile row keyed by wallet address
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unconfigured or the upsert is rejected.
    pub async fn upsert_profile_row(&self, row: &ProfileUpsertRow) -> Result<(), ServiceError> {
        self.ensure_configured()?;

        let response = self
            .request(Method::POST, "profiles")
            .query(&[("on_conflict", "wallet_address")])
            .header("prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await
            .map_err(request_error)?;
        check_response(response, "profiles").await?;
        Ok(())
    }

    // ---- Secondary writes (best-effort bookkeeping) ----

    /// Record an activity event; failures are captured and swallowed
    pub async fn record_activity(&self, row: NewActivityRow) {
        self.safe
            .execute(
                "insert_activity",
                async { self.insert_row("activities", &row).await.map(|()| Some(())) },
                (),
            )
            .await;
    }

    /// Record a notification; failures are captured and swallowed
    pub async fn record_notification(&self, row: NewNotificationRow) {
        self.safe
            .execute(
                "insert_notification",
                async { self.insert_row("notifications", &row).await.map(|()| Some(())) },
                (),
            )
            .await;
    }

    /// Record a completed transaction; failures are captured and swallowed
    pub async fn record_transaction(&self, row: NewTransactionRow) {
        self.safe
            .execute(
                "insert_transaction",
                async { self.insert_row("transactions", &row).await.map(|()| Some(())) },
                (),
            )
            .await;
    }

    /// Record a price history point; failures are captured and swallowed
    pub async fn record_price_point(&self, row: NewPricePointRow) {
        self.safe
            .execute(
                "insert_price_point",
                async { self.insert_row("price_history", &row).await.map(|()| Some(())) },
                (),
            )
            .await;
    }

    // ---- Probing ----

    async fn probe_table(&self, table: &str) -> Result<(), ServiceError> {
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*"), ("limit", "1")])
            .send()
            .await
            .map_err(request_error)?;
        check_response(response, table).await?;
        Ok(())
    }

    async fn probe_expected_tables(&self) -> Vec<TableStatus> {
        let mut tables = Vec::with_capacity(EXPECTED_TABLES.len());
        for table in EXPECTED_TABLES {
            if table == PRIMARY_TABLE {
                // just probed by the caller
                tables.push(TableStatus::reachable(table));
                continue;
            }
            match self.probe_table(table).await {
                Ok(()) => tables.push(TableStatus::reachable(table)),
                Err(error) => tables.push(TableStatus::unreachable(table, error.to_string())),
            }
        }
        tables
    }
}

impl ServiceConnector for StoreClient {
    fn name(&self) -> &'static str {
        "store"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn test_connection(&self) -> Result<HealthReport, ServiceError> {
        if !self.is_configured() {
            return Ok(HealthReport::unconfigured("store URL or anon key not set"));
        }

        debug!("probing store connection");

        let started = Instant::now();
        match self.probe_table(PRIMARY_TABLE).await {
            Ok(()) => {
                let latency = elapsed_ms(started);
                let tables = self.probe_expected_tables().await;
                Ok(HealthReport::connected(latency)
                    .with_capabilities(true, true)
                    .with_tables(tables))
            }
            Err(error) => {
                warn!(error = %error, "store probe failed");
                Ok(HealthReport::failed(error.to_string())
                    .with_latency(elapsed_ms(started))
                    .with_capabilities(false, false))
            }
        }
    }
}

fn request_error(error: reqwest::Error) -> ServiceError {
    if error.is_timeout() {
        ServiceError::transport(format!("store request timed out: {error}"))
    } else {
        ServiceError::transport(format!("store request failed: {error}"))
    }
}

async fn check_response(response: Response, table: &str) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(classify_store_error(status, table, &body))
}

/// Classify a non-success store response into the error taxonomy
///
/// PostgREST reports missing tables as `42P01`/`PGRST205` and row-level policy
/// denials as `42501`; both also appear as recognizable message text when the
/// code field is absent.
fn classify_store_error(status: StatusCode, table: &str, body: &str) -> ServiceError {
    let parsed: StoreErrorBody = serde_json::from_str(body).unwrap_or_default();
    let detail = parsed.message.unwrap_or_else(|| excerpt(body));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ServiceError::permission(format!("permission denied for {table}: {detail}"))
        }
        StatusCode::NOT_FOUND => {
            ServiceError::schema(format!("tables missing: {table} not found: {detail}"))
        }
        _ if matches!(parsed.code.as_deref(), Some("42P01" | "PGRST205"))
            || detail.contains("does not exist") =>
        {
            ServiceError::schema(format!("tables missing: {detail}"))
        }
        _ if matches!(parsed.code.as_deref(), Some("42501"))
            || detail.contains("permission denied") =>
        {
            ServiceError::permission(format!("permission denied: {detail}"))
        }
        _ => ServiceError::transport(format!("store returned {status} for {table}: {detail}")),
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

/// Error body shape returned by the store on failed calls
#[derive(Debug, Default, Deserialize)]
struct StoreErrorBody {
    code: Option<String>,
    message: Option<String>,
}

// ---- Raw rows ----
//
// Field-for-field mirrors of the store schema. Everything except the insert
// payloads is `Option` so one incomplete row degrades at the mapping step
// instead of failing the whole response decode.

/// Raw asset row as stored
#[derive(Debug, Clone, Deserialize)]
pub struct AssetRow {
    /// Row identifier
    pub id: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Long-form description
    pub description: Option<String>,
    /// Category label
    pub category: Option<String>,
    /// Image URL
    pub image_url: Option<String>,
    /// Listed price
    pub price: Option<f64>,
    /// Creator royalty percentage
    pub royalty_percent: Option<f64>,
    /// Wallet currently owning the asset
    pub owner_wallet: Option<String>,
    /// Wallet that minted the asset
    pub creator_wallet: Option<String>,
    /// Whether the asset is listed for sale
    pub is_listed: Option<bool>,
    /// Creation timestamp (RFC 3339)
    pub created_at: Option<String>,
}

/// Raw user row as stored
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    /// Wallet address keying the user
    pub wallet_address: Option<String>,
    /// Display name
    pub username: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
}

/// Raw bid row as stored
#[derive(Debug, Clone, Deserialize)]
pub struct BidRow {
    /// Row identifier
    pub id: Option<String>,
    /// Asset the bid was placed on
    pub asset_id: Option<String>,
    /// Wallet that placed the bid
    pub bidder_wallet: Option<String>,
    /// Bid amount
    pub amount: Option<f64>,
    /// Placement timestamp (RFC 3339)
    pub created_at: Option<String>,
}

/// Raw activity event row as stored
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRow {
    /// Row identifier
    pub id: Option<String>,
    /// Asset the event belongs to
    pub asset_id: Option<String>,
    /// Event kind label (`minted`, `listed`, `bid_placed`, `sale`, `transfer`)
    pub kind: Option<String>,
    /// Wallet that performed the action
    pub actor_wallet: Option<String>,
    /// Amount involved, when the event carries one
    pub amount: Option<f64>,
    /// Event timestamp (RFC 3339)
    pub created_at: Option<String>,
}

/// Raw price history row as stored
#[derive(Debug, Clone, Deserialize)]
pub struct PricePointRow {
    /// Recorded price
    pub price: Option<f64>,
    /// Recording timestamp (RFC 3339)
    pub recorded_at: Option<String>,
}

/// Raw platform statistics row as stored
#[derive(Debug, Clone, Deserialize)]
pub struct StatsRow {
    /// Total number of assets
    pub total_assets: Option<i64>,
    /// Total number of users
    pub total_users: Option<i64>,
    /// Total traded volume
    pub total_volume: Option<f64>,
    /// Average sale price
    pub average_price: Option<f64>,
    /// Last update timestamp (RFC 3339)
    pub updated_at: Option<String>,
}

/// Raw profile row as stored
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    /// Wallet address keying the profile
    pub wallet_address: Option<String>,
    /// Display name
    pub username: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Biography text
    pub bio: Option<String>,
    /// Last write timestamp (RFC 3339)
    pub updated_at: Option<String>,
}

/// Raw notification row as stored
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRow {
    /// Row identifier
    pub id: Option<String>,
    /// Wallet the notification addresses
    pub wallet_address: Option<String>,
    /// Human-readable message
    pub message: Option<String>,
    /// Notification kind label
    pub kind: Option<String>,
    /// Whether the notification has been read
    pub read: Option<bool>,
    /// Creation timestamp (RFC 3339)
    pub created_at: Option<String>,
}

/// Insert payload for a new asset; the store assigns id and timestamp
#[derive(Debug, Clone, Serialize)]
pub struct NewAssetRow {
    /// Display name
    pub name: String,
    /// Long-form description
    pub description: String,
    /// Category label
    pub category: String,
    /// Image URL
    pub image_url: Option<String>,
    /// Listed price
    pub price: f64,
    /// Creator royalty percentage
    pub royalty_percent: f64,
    /// Wallet owning the asset at mint time
    pub owner_wallet: String,
    /// Wallet minting the asset
    pub creator_wallet: String,
    /// Whether the asset is listed for sale
    pub is_listed: bool,
}

/// Insert payload for a new bid
#[derive(Debug, Clone, Serialize)]
pub struct NewBidRow {
    /// Asset the bid is placed on
    pub asset_id: String,
    /// Wallet placing the bid
    pub bidder_wallet: String,
    /// Bid amount
    pub amount: f64,
}

/// Insert payload for an activity event
#[derive(Debug, Clone, Serialize)]
pub struct NewActivityRow {
    /// Asset the event belongs to
    pub asset_id: String,
    /// Event kind label
    pub kind: String,
    /// Wallet that performed the action
    pub actor_wallet: String,
    /// Amount involved, when the event carries one
    pub amount: Option<f64>,
}

/// Insert payload for a notification
#[derive(Debug, Clone, Serialize)]
pub struct NewNotificationRow {
    /// Wallet the notification addresses
    pub wallet_address: String,
    /// Human-readable message
    pub message: String,
    /// Notification kind label
    pub kind: String,
}

/// Insert payload for a completed transaction
#[derive(Debug, Clone, Serialize)]
pub struct NewTransactionRow {
    /// Asset that changed hands
    pub asset_id: String,
    /// Wallet selling the asset
    pub seller_wallet: String,
    /// Wallet buying the asset
    pub buyer_wallet: String,
    /// Sale amount
    pub amount: f64,
}

/// Insert payload for a price history point
#[derive(Debug, Clone, Serialize)]
pub struct NewPricePointRow {
    /// Asset the price belongs to
    pub asset_id: String,
    /// Recorded price
    pub price: f64,
}

/// Upsert payload for a profile keyed by wallet address
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpsertRow {
    /// Wallet address keying the profile
    pub wallet_address: String,
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// New biography text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use service_client::RecordingSink;

    fn unconfigured_client() -> StoreClient {
        StoreClient::new(StoreConfig::default(), Arc::new(RecordingSink::new())).unwrap()
    }

    #[test]
    fn default_config_is_unconfigured() {
        let config = StoreConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn whitespace_credentials_count_as_unconfigured() {
        let config = StoreConfig {
            base_url: "   ".to_string(),
            anon_key: "key".to_string(),
            timeout_seconds: 5,
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        let client = StoreClient::new(
            StoreConfig {
                base_url: "https://store.example.com/".to_string(),
                anon_key: "anon".to_string(),
                timeout_seconds: 5,
            },
            Arc::new(RecordingSink::new()),
        )
        .unwrap();
        assert_eq!(
            client.table_url("assets"),
            "https://store.example.com/rest/v1/assets"
        );
    }

    #[test]
    fn missing_table_classified_as_schema_error() {
        let body = r#"{"code":"42P01","message":"relation \"public.assets\" does not exist"}"#;
        let error = classify_store_error(StatusCode::BAD_REQUEST, "assets", body);
        assert!(matches!(error, ServiceError::Schema { .. }));
        assert!(error.to_string().contains("tables missing"));
    }

    #[test]
    fn stale_schema_cache_classified_as_schema_error() {
        let body = r#"{"code":"PGRST205","message":"Could not find the table 'public.bids' in the schema cache"}"#;
        let error = classify_store_error(StatusCode::NOT_FOUND, "bids", body);
        assert!(matches!(error, ServiceError::Schema { .. }));
    }

    #[test]
    fn policy_denial_classified_as_permission_error() {
        let body = r#"{"code":"42501","message":"permission denied for table assets"}"#;
        let error = classify_store_error(StatusCode::BAD_REQUEST, "assets", body);
        assert!(matches!(error, ServiceError::Permission { .. }));
        assert!(error.to_string().contains("permission denied"));
    }

    #[test]
    fn unauthorized_status_classified_as_permission_error() {
        let error = classify_store_error(StatusCode::UNAUTHORIZED, "assets", "Invalid API key");
        assert!(matches!(error, ServiceError::Permission { .. }));
    }

    #[test]
    fn unrecognized_failure_classified_as_transport_error() {
        let error = classify_store_error(StatusCode::INTERNAL_SERVER_ERROR, "assets", "boom");
        assert!(matches!(error, ServiceError::Transport { .. }));
        assert!(error.to_string().contains("500"));
    }

    #[tokio::test]
    async fn unconfigured_probe_short_circuits() {
        let client = unconfigured_client();
        let report = client.test_connection().await.unwrap();
        assert!(!report.configured);
        assert!(!report.connected);
        assert!(report.latency_ms.is_none());
        assert!(report.error.is_some());
    }

    #[tokio::test]
    async fn unconfigured_read_returns_fallback() {
        let client = unconfigured_client();
        assert!(client.fetch_asset_rows().await.is_empty());
        assert!(client.fetch_asset_row("asset-1").await.is_none());
    }

    #[tokio::test]
    async fn unconfigured_primary_write_surfaces_error() {
        let client = unconfigured_client();
        let result = client
            .insert_bid(&NewBidRow {
                asset_id: "asset-1".to_string(),
                bidder_wallet: "0xabc".to_string(),
                amount: 1.5,
            })
            .await;
        assert!(matches!(result, Err(ServiceError::NotConfigured { .. })));
    }
}
