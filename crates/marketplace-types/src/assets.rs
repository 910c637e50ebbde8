// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Asset types and their embedded relations
//!
//! `Asset` is the normalized output of the entity assembler: one record
//! joining the raw asset row with its owner, creator, bids, activity, and
//! price history. Every list field defaults to an empty vector so consumers
//! can iterate without null checks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{activity::ActivityEvent, users::UserSummary};

/// Marketplace category an asset is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    /// Digital art
    Art,
    /// Music and audio
    Music,
    /// Photography
    Photography,
    /// Collectible items
    Collectible,
    /// Virtual worlds and items
    Virtual,
    /// Anything the store labels with an unrecognized category
    #[default]
    Other,
}

impl AssetCategory {
    /// Parse a store-side category label, mapping unknown labels to `Other`
    ///
    /// An unrecognized category must not void an otherwise valid asset.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "art" => Self::Art,
            "music" => Self::Music,
            "photography" => Self::Photography,
            "collectible" | "collectibles" => Self::Collectible,
            "virtual" | "virtual_worlds" => Self::Virtual,
            _ => Self::Other,
        }
    }

    /// Returns the store-side label for this category
    pub const fn label(self) -> &'static str {
        match self {
            Self::Art => "art",
            Self::Music => "music",
            Self::Photography => "photography",
            Self::Collectible => "collectible",
            Self::Virtual => "virtual",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A bid on an asset with the bidder resolved to a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Bid {
    /// Bid identifier
    pub id: String,
    /// Asset the bid was placed on
    pub asset_id: String,
    /// Who placed the bid
    pub bidder: UserSummary,
    /// Bid amount in the listing currency
    pub amount: f64,
    /// When the bid was placed
    pub placed_at: DateTime<Utc>,
}

/// One point of an asset's price history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricePoint {
    /// Price at this point
    pub price: f64,
    /// When the price was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Normalized marketplace asset
///
/// The list fields are always present; an asset with no bids carries an
/// empty vector, never a null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    /// Asset identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description text
    pub description: String,
    /// Listing category
    pub category: AssetCategory,
    /// Artwork/preview image URL (if set)
    pub image_url: Option<String>,
    /// Current listing price
    pub price: f64,
    /// Royalty percentage paid to the creator on sales
    pub royalty_percent: f64,
    /// Whether the asset is currently listed for sale
    pub is_listed: bool,
    /// When the asset was created
    pub created_at: DateTime<Utc>,
    /// Current owner
    pub owner: UserSummary,
    /// Original creator
    pub creator: UserSummary,
    /// Bids placed on the asset
    #[serde(default)]
    pub bids: Vec<Bid>,
    /// Activity history, most recent first
    #[serde(default)]
    pub activity: Vec<ActivityEvent>,
    /// Price history, oldest first
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

impl Asset {
    /// Create an asset with empty relation lists
    ///
    /// Used when an asset must be produced without enrichment, for example
    /// right after a write when the re-read came back empty.
    pub fn minimal(
        id: impl Into<String>,
        name: impl Into<String>,
        category: AssetCategory,
        price: f64,
        owner: UserSummary,
        creator: UserSummary,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            image_url: None,
            price,
            royalty_percent: 0.0,
            is_listed: true,
            created_at: Utc::now(),
            owner,
            creator,
            bids: Vec::new(),
            activity: Vec::new(),
            price_history: Vec::new(),
        }
    }

    /// Highest bid currently on the asset, if any
    pub fn top_bid(&self) -> Option<&Bid> {
        self.bids
            .iter()
            .max_by(|a, b| a.amount.total_cmp(&b.amount))
    }

    /// Whether the given wallet currently owns the asset
    pub fn is_owned_by(&self, wallet: &str) -> bool {
        self.owner.wallet_address == wallet
    }
}

/// Input draft for creating an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewAsset {
    /// Display name
    pub name: String,
    /// Description text
    pub description: String,
    /// Listing category
    pub category: AssetCategory,
    /// Artwork/preview image URL (if available)
    pub image_url: Option<String>,
    /// Initial listing price
    pub price: f64,
    /// Royalty percentage paid to the creator on sales
    pub royalty_percent: f64,
    /// Wallet creating (and initially owning) the asset
    pub creator_wallet: String,
}

/// Input draft for placing a bid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewBid {
    /// Wallet placing the bid
    pub bidder_wallet: String,
    /// Bid amount in the listing currency
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_asset() -> Asset {
        Asset::minimal(
            "asset-1",
            "Chromatic Dusk",
            AssetCategory::Art,
            2.5,
            UserSummary::from_wallet("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            UserSummary::from_wallet("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
        )
    }

    #[test]
    fn minimal_asset_has_empty_lists() {
        let asset = sample_asset();
        assert!(asset.bids.is_empty());
        assert!(asset.activity.is_empty());
        assert!(asset.price_history.is_empty());
    }

    #[test]
    fn category_parsing_is_lenient() {
        assert_eq!(AssetCategory::from_label("Art"), AssetCategory::Art);
        assert_eq!(
            AssetCategory::from_label("collectibles"),
            AssetCategory::Collectible
        );
        assert_eq!(
            AssetCategory::from_label("something-new"),
            AssetCategory::Other
        );
    }

    #[test]
    fn top_bid_picks_highest_amount() {
        let mut asset = sample_asset();
        for (id, amount) in [("bid-1", 1.0), ("bid-2", 3.5), ("bid-3", 2.0)] {
            asset.bids.push(Bid {
                id: id.to_string(),
                asset_id: asset.id.clone(),
                bidder: UserSummary::from_wallet("0xcccccccccccccccccccccccccccccccccccccccc"),
                amount,
                placed_at: Utc::now(),
            });
        }
        assert_eq!(asset.top_bid().map(|b| b.id.as_str()), Some("bid-2"));
    }

    #[test]
    fn top_bid_on_empty_list_is_none() {
        assert!(sample_asset().top_bid().is_none());
    }

    #[test]
    fn asset_deserializes_with_missing_lists() {
        let json = serde_json::json!({
            "id": "asset-9",
            "name": "Solitude",
            "description": "",
            "category": "photography",
            "image_url": null,
            "price": 0.8,
            "royalty_percent": 5.0,
            "is_listed": true,
            "created_at": "2026-01-10T12:00:00Z",
            "owner": {"wallet_address": "0xabc", "username": "0xabc", "avatar_url": null},
            "creator": {"wallet_address": "0xdef", "username": "0xdef", "avatar_url": null}
        });
        let asset: Asset = serde_json::from_value(json).unwrap();
        assert!(asset.bids.is_empty());
        assert!(asset.activity.is_empty());
        assert!(asset.price_history.is_empty());
    }
}
