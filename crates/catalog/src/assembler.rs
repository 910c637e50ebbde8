// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Catalog orchestration over the store connector
//!
//! `Catalog` joins raw store rows into normalized domain assets, resolving
//! owner, creator, bids, activity, and price history concurrently per asset.
//! Read paths degrade to the bundled fallback dataset and never error; write
//! paths perform one authoritative insert or update, then fire best-effort
//! bookkeeping writes whose failures are logged and swallowed.

use chrono::{DateTime, Utc};
use connectors::{
    ActivityRow, AssetRow, BidRow, NewActivityRow, NewAssetRow, NewBidRow, NewNotificationRow,
    NewPricePointRow, NewTransactionRow, NotificationRow, PricePointRow, ProfileRow,
    ProfileUpsertRow, StatsRow, StoreClient, UserRow,
};
use marketplace_types::{
    ActivityEvent, ActivityKind, Asset, AssetCategory, Bid, NewAsset, NewBid, Notification,
    PlatformStats, PricePoint, ProfileUpdate, UserProfile, UserSummary,
};
use service_client::ServiceError;
use tracing::{debug, instrument, warn};

use crate::{
    error::{CatalogError, CatalogResult},
    fallback::{fallback_asset, fallback_assets, fallback_stats},
};

/// Normalized read and write facade over the relational store
///
/// Cloning is cheap; all clones share the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: StoreClient,
}

impl Catalog {
    /// Create a catalog over the given store client
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Fetch the full asset list, enriched and in store order
    ///
    /// Serves the fallback dataset when the store is unconfigured, the fetch
    /// fails, or no fetched row survives mapping. Per-asset enrichment runs
    /// concurrently; the outer list order is preserved.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Vec<Asset> {
        if !self.store.is_configured() {
            debug!("store unconfigured; serving fallback catalog");
            return fallback_assets();
        }

        let rows = self.store.fetch_asset_rows().await;
        if rows.is_empty() {
            debug!("store returned no asset rows; serving fallback catalog");
            return fallback_assets();
        }

        let total = rows.len();
        let mut handles = Vec::with_capacity(total);
        for row in rows {
            let store = self.store.clone();
            handles.push(tokio::spawn(async move { assemble_asset(&store, row).await }));
        }

        let mut assets = Vec::with_capacity(total);
        for handle in handles {
            match handle.await {
                Ok(Ok(asset)) => assets.push(asset),
                Ok(Err(error)) => warn!(error = %error, "dropping asset that failed to map"),
                Err(error) => warn!(error = %error, "asset enrichment task failed"),
            }
        }

        if assets.is_empty() {
            warn!(total, "no fetched asset survived mapping; serving fallback catalog");
            return fallback_assets();
        }
        assets
    }

    /// Fetch one enriched asset
    ///
    /// Falls back to the matching fallback asset on any failure, or `None`
    /// when the id is known to neither the store nor the fallback set.
    #[instrument(skip(self))]
    pub async fn fetch_one(&self, asset_id: &str) -> Option<Asset> {
        if !self.store.is_configured() {
            return fallback_asset(asset_id);
        }

        match self.store.fetch_asset_row(asset_id).await {
            Some(row) => match assemble_asset(&self.store, row).await {
                Ok(asset) => Some(asset),
                Err(error) => {
                    warn!(asset_id, error = %error, "asset failed to map; trying fallback");
                    fallback_asset(asset_id)
                }
            },
            None => fallback_asset(asset_id),
        }
    }

    /// Fetch platform statistics, falling back to the bundled numbers
    pub async fn platform_stats(&self) -> PlatformStats {
        if !self.store.is_configured() {
            return fallback_stats();
        }
        match self.store.fetch_stats_row().await {
            Some(row) => map_stats(row),
            None => fallback_stats(),
        }
    }

    /// Fetch the profile for a wallet
    ///
    /// `None` means no profile exists (or the store is unavailable); profiles
    /// have no fallback representation.
    pub async fn profile(&self, wallet: &str) -> Option<UserProfile> {
        if !self.store.is_configured() {
            return None;
        }
        let row = self.store.fetch_profile_row(wallet).await?;
        Some(map_profile(wallet, row))
    }

    /// Fetch notifications for a wallet, newest first
    pub async fn notifications(&self, wallet: &str) -> Vec<Notification> {
        if !self.store.is_configured() {
            return Vec::new();
        }
        self.store
            .fetch_notification_rows(wallet)
            .await
            .into_iter()
            .filter_map(|row| map_notification(wallet, row))
            .collect()
    }

    /// Mint a new asset
    ///
    /// The insert is authoritative; the activity entry and the initial price
    /// point are best-effort bookkeeping. The returned asset reflects the
    /// stored row, enriched when the relation reads succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the store rejects the insert.
    #[instrument(skip(self, draft), fields(name = %draft.name, creator = %draft.creator_wallet))]
    pub async fn create_asset(&self, draft: NewAsset) -> CatalogResult<Asset> {
        validate_new_asset(&draft)?;

        let row = NewAssetRow {
            name: draft.name.trim().to_string(),
            description: draft.description.clone(),
            category: draft.category.label().to_string(),
            image_url: draft.image_url.clone(),
            price: draft.price,
            royalty_percent: draft.royalty_percent,
            owner_wallet: draft.creator_wallet.clone(),
            creator_wallet: draft.creator_wallet.clone(),
            is_listed: true,
        };
        let stored = self.store.insert_asset(&row).await?;
        let asset_id = stored
            .id
            .clone()
            .ok_or_else(|| ServiceError::mapping("stored asset carried no id"))?;

        debug!(asset_id, "asset created");

        self.store
            .record_activity(NewActivityRow {
                asset_id: asset_id.clone(),
                kind: ActivityKind::Minted.label().to_string(),
                actor_wallet: draft.creator_wallet.clone(),
                amount: None,
            })
            .await;
        self.store
            .record_price_point(NewPricePointRow {
                asset_id: asset_id.clone(),
                price: draft.price,
            })
            .await;

        match assemble_asset(&self.store, stored).await {
            Ok(asset) => Ok(asset),
            Err(error) => {
                warn!(asset_id, error = %error, "stored asset failed to map; returning minimal view");
                Ok(Asset::minimal(
                    asset_id,
                    row.name,
                    draft.category,
                    draft.price,
                    UserSummary::from_wallet(draft.creator_wallet.clone()),
                    UserSummary::from_wallet(draft.creator_wallet),
                ))
            }
        }
    }

    /// Place a bid on a listed asset
    ///
    /// The bid insert is authoritative; the activity entry and the owner
    /// notification are best-effort bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the asset does not exist in the
    /// store, or the store rejects the insert.
    #[instrument(skip(self, draft), fields(bidder = %draft.bidder_wallet))]
    pub async fn place_bid(&self, asset_id: &str, draft: NewBid) -> CatalogResult<Bid> {
        if draft.bidder_wallet.trim().is_empty() {
            return Err(CatalogError::validation("bidder wallet must not be empty"));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CatalogError::validation("bid amount must be positive"));
        }

        let row = self
            .store
            .find_asset_row(asset_id)
            .await?
            .ok_or_else(|| CatalogError::asset_not_found(asset_id))?;

        let stored = self
            .store
            .insert_bid(&NewBidRow {
                asset_id: asset_id.to_string(),
                bidder_wallet: draft.bidder_wallet.clone(),
                amount: draft.amount,
            })
            .await?;
        let bid = map_bid(stored).ok_or_else(|| {
            CatalogError::from(ServiceError::mapping("stored bid representation was incomplete"))
        })?;

        self.store
            .record_activity(NewActivityRow {
                asset_id: asset_id.to_string(),
                kind: ActivityKind::BidPlaced.label().to_string(),
                actor_wallet: draft.bidder_wallet.clone(),
                amount: Some(draft.amount),
            })
            .await;
        if let Some(owner) = row.owner_wallet.filter(|w| !w.trim().is_empty()) {
            let name = row.name.unwrap_or_else(|| "your asset".to_string());
            self.store
                .record_notification(NewNotificationRow {
                    wallet_address: owner,
                    message: format!("New bid of {} ETH on {name}", draft.amount),
                    kind: "bid".to_string(),
                })
                .await;
        }

        Ok(bid)
    }

    /// Transfer ownership of a listed asset to the buyer
    ///
    /// The ownership update is authoritative and conditional on the row still
    /// being listed, so of two racing purchases exactly one wins. The
    /// transaction record, sale activity, price point, and notifications are
    /// best-effort bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the asset does not exist in the
    /// store, the asset is not listed (or a concurrent sale took it), or the
    /// store rejects the update.
    #[instrument(skip(self))]
    pub async fn purchase_asset(&self, asset_id: &str, buyer_wallet: &str) -> CatalogResult<Asset> {
        if buyer_wallet.trim().is_empty() {
            return Err(CatalogError::validation("buyer wallet must not be empty"));
        }

        let row = self
            .store
            .find_asset_row(asset_id)
            .await?
            .ok_or_else(|| CatalogError::asset_not_found(asset_id))?;

        if !row.is_listed.unwrap_or(false) {
            return Err(CatalogError::validation("asset is not listed for sale"));
        }
        let seller = row.owner_wallet.clone().unwrap_or_default();
        if seller == buyer_wallet {
            return Err(CatalogError::validation("buyer already owns this asset"));
        }
        let price = row.price.unwrap_or_default();
        let name = row.name.clone().unwrap_or_else(|| "the asset".to_string());

        let transferred = self
            .store
            .transfer_asset_owner(asset_id, buyer_wallet)
            .await?
            .ok_or_else(|| CatalogError::validation("asset is no longer listed for sale"))?;

        debug!(asset_id, buyer_wallet, "ownership transferred");

        self.store
            .record_transaction(NewTransactionRow {
                asset_id: asset_id.to_string(),
                seller_wallet: seller.clone(),
                buyer_wallet: buyer_wallet.to_string(),
                amount: price,
            })
            .await;
        self.store
            .record_activity(NewActivityRow {
                asset_id: asset_id.to_string(),
                kind: ActivityKind::Sale.label().to_string(),
                actor_wallet: buyer_wallet.to_string(),
                amount: Some(price),
            })
            .await;
        self.store
            .record_price_point(NewPricePointRow {
                asset_id: asset_id.to_string(),
                price,
            })
            .await;
        if !seller.trim().is_empty() {
            self.store
                .record_notification(NewNotificationRow {
                    wallet_address: seller,
                    message: format!("Your asset {name} sold for {price} ETH"),
                    kind: "sale".to_string(),
                })
                .await;
        }
        self.store
            .record_notification(NewNotificationRow {
                wallet_address: buyer_wallet.to_string(),
                message: format!("You now own {name}"),
                kind: "purchase".to_string(),
            })
            .await;

        match assemble_asset(&self.store, transferred).await {
            Ok(asset) => Ok(asset),
            Err(error) => {
                warn!(asset_id, error = %error, "purchased asset failed to map; returning minimal view");
                Ok(minimal_after_purchase(row, asset_id, buyer_wallet))
            }
        }
    }

    /// Insert or update the caller's profile
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the store rejects the upsert.
    #[instrument(skip(self, update), fields(wallet = %update.wallet_address))]
    pub async fn update_profile(&self, update: ProfileUpdate) -> CatalogResult<UserProfile> {
        if update.wallet_address.trim().is_empty() {
            return Err(CatalogError::validation("wallet address must not be empty"));
        }

        self.store
            .upsert_profile_row(&ProfileUpsertRow {
                wallet_address: update.wallet_address.clone(),
                username: update.username.clone(),
                avatar_url: update.avatar_url.clone(),
                bio: update.bio.clone(),
            })
            .await?;

        // Serve the stored row when the re-read works, otherwise echo the
        // update so the caller still sees what was written.
        match self.profile(&update.wallet_address).await {
            Some(profile) => Ok(profile),
            None => {
                let fallback = UserSummary::from_wallet(update.wallet_address.clone());
                Ok(UserProfile {
                    wallet_address: update.wallet_address,
                    username: update.username.unwrap_or(fallback.username),
                    avatar_url: update.avatar_url,
                    bio: update.bio,
                    updated_at: None,
                })
            }
        }
    }
}

/// Resolve the five relations of one raw asset concurrently and map the lot
async fn assemble_asset(store: &StoreClient, row: AssetRow) -> Result<Asset, ServiceError> {
    let asset_id = row
        .id
        .clone()
        .ok_or_else(|| ServiceError::mapping("asset row missing id"))?;
    let owner_wallet = row.owner_wallet.clone().unwrap_or_default();
    let creator_wallet = row.creator_wallet.clone().unwrap_or_default();

    let (owner_row, creator_row, bid_rows, activity_rows, price_rows) = tokio::join!(
        store.fetch_user_row(&owner_wallet),
        store.fetch_user_row(&creator_wallet),
        store.fetch_bid_rows(&asset_id),
        store.fetch_activity_rows(&asset_id),
        store.fetch_price_history_rows(&asset_id),
    );

    map_asset(row, owner_row, creator_row, bid_rows, activity_rows, price_rows)
}

/// Map one raw asset and its resolved relations into the domain model
///
/// Fails only on fields the UI cannot render around: id, a non-empty name, a
/// finite non-negative price, and a parseable creation timestamp. Everything
/// else degrades to a default, and malformed relation rows are dropped
/// individually.
fn map_asset(
    row: AssetRow,
    owner_row: Option<UserRow>,
    creator_row: Option<UserRow>,
    bid_rows: Vec<BidRow>,
    activity_rows: Vec<ActivityRow>,
    price_rows: Vec<PricePointRow>,
) -> Result<Asset, ServiceError> {
    let id = row
        .id
        .ok_or_else(|| ServiceError::mapping("asset row missing id"))?;
    let name = row.name.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(ServiceError::mapping(format!("asset {id} has no name")));
    }
    let price = row.price.unwrap_or_default();
    if !price.is_finite() || price < 0.0 {
        return Err(ServiceError::mapping(format!(
            "asset {id} has invalid price {price}"
        )));
    }
    let created_at = parse_timestamp(row.created_at.as_deref()).ok_or_else(|| {
        ServiceError::mapping(format!("asset {id} has no parseable creation time"))
    })?;

    let owner_wallet = row.owner_wallet.unwrap_or_default();
    let creator_wallet = row.creator_wallet.unwrap_or_default();

    Ok(Asset {
        id,
        name,
        description: row.description.unwrap_or_default(),
        category: AssetCategory::from_label(row.category.as_deref().unwrap_or_default()),
        image_url: row.image_url,
        price,
        royalty_percent: row.royalty_percent.filter(|r| r.is_finite()).unwrap_or(0.0),
        is_listed: row.is_listed.unwrap_or(true),
        created_at,
        owner: user_summary(owner_row, &owner_wallet),
        creator: user_summary(creator_row, &creator_wallet),
        bids: bid_rows.into_iter().filter_map(map_bid).collect(),
        activity: activity_rows.into_iter().filter_map(map_activity).collect(),
        price_history: price_rows.into_iter().filter_map(map_price_point).collect(),
    })
}

/// Project a user row onto the embedded summary, falling back to the wallet
fn user_summary(row: Option<UserRow>, wallet: &str) -> UserSummary {
    match row {
        Some(user) => {
            let wallet_address = user.wallet_address.unwrap_or_else(|| wallet.to_string());
            match user.username.filter(|name| !name.trim().is_empty()) {
                Some(username) => UserSummary::new(wallet_address, username, user.avatar_url),
                None => UserSummary::from_wallet(wallet_address),
            }
        }
        None => UserSummary::from_wallet(wallet),
    }
}

fn map_bid(row: BidRow) -> Option<Bid> {
    let id = row.id?;
    let asset_id = row.asset_id?;
    let amount = row.amount.filter(|a| a.is_finite() && *a > 0.0)?;
    let placed_at = parse_timestamp(row.created_at.as_deref())?;
    Some(Bid {
        id,
        asset_id,
        bidder: UserSummary::from_wallet(row.bidder_wallet.unwrap_or_default()),
        amount,
        placed_at,
    })
}

fn map_activity(row: ActivityRow) -> Option<ActivityEvent> {
    let id = row.id?;
    let asset_id = row.asset_id?;
    // Unknown event kinds drop the single event, never the asset.
    let kind = row.kind.as_deref()?.parse::<ActivityKind>().ok()?;
    let occurred_at = parse_timestamp(row.created_at.as_deref())?;
    Some(ActivityEvent {
        id,
        asset_id,
        kind,
        actor_wallet: row.actor_wallet.unwrap_or_default(),
        amount: row.amount.filter(|a| a.is_finite()),
        occurred_at,
    })
}

fn map_price_point(row: PricePointRow) -> Option<PricePoint> {
    let price = row.price.filter(|p| p.is_finite() && *p >= 0.0)?;
    let recorded_at = parse_timestamp(row.recorded_at.as_deref())?;
    Some(PricePoint { price, recorded_at })
}

fn map_notification(wallet: &str, row: NotificationRow) -> Option<Notification> {
    let id = row.id?;
    let message = row.message.filter(|m| !m.trim().is_empty())?;
    let created_at = parse_timestamp(row.created_at.as_deref())?;
    Some(Notification {
        id,
        wallet_address: row.wallet_address.unwrap_or_else(|| wallet.to_string()),
        message,
        kind: row.kind.unwrap_or_else(|| "general".to_string()),
        read: row.read.unwrap_or(false),
        created_at,
    })
}

fn map_profile(wallet: &str, row: ProfileRow) -> UserProfile {
    UserProfile {
        wallet_address: row.wallet_address.unwrap_or_else(|| wallet.to_string()),
        username: row
            .username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UserSummary::from_wallet(wallet).username),
        avatar_url: row.avatar_url,
        bio: row.bio,
        updated_at: parse_timestamp(row.updated_at.as_deref()),
    }
}

fn map_stats(row: StatsRow) -> PlatformStats {
    PlatformStats {
        total_assets: clamp_count(row.total_assets),
        total_users: clamp_count(row.total_users),
        total_volume: row.total_volume.filter(|v| v.is_finite()).unwrap_or(0.0),
        average_price: row.average_price.filter(|v| v.is_finite()).unwrap_or(0.0),
        updated_at: parse_timestamp(row.updated_at.as_deref()),
    }
}

fn clamp_count(raw: Option<i64>) -> u64 {
    raw.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn minimal_after_purchase(row: AssetRow, asset_id: &str, buyer_wallet: &str) -> Asset {
    let mut asset = Asset::minimal(
        asset_id,
        row.name.unwrap_or_default(),
        AssetCategory::from_label(row.category.as_deref().unwrap_or_default()),
        row.price.unwrap_or_default(),
        UserSummary::from_wallet(buyer_wallet),
        UserSummary::from_wallet(row.creator_wallet.unwrap_or_default()),
    );
    asset.is_listed = false;
    asset
}

fn validate_new_asset(draft: &NewAsset) -> CatalogResult<()> {
    if draft.name.trim().is_empty() {
        return Err(CatalogError::validation("asset name must not be empty"));
    }
    if !draft.price.is_finite() || draft.price < 0.0 {
        return Err(CatalogError::validation(
            "asset price must be a non-negative number",
        ));
    }
    if !draft.royalty_percent.is_finite() || !(0.0..=100.0).contains(&draft.royalty_percent) {
        return Err(CatalogError::validation(
            "royalty percent must be between 0 and 100",
        ));
    }
    if draft.creator_wallet.trim().is_empty() {
        return Err(CatalogError::validation("creator wallet must not be empty"));
    }
    Ok(())
}
