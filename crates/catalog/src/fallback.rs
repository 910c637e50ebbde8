// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Bundled reference dataset
//!
//! Served whenever the store is unconfigured, unreachable, or returns no
//! usable rows. The app promises the UI a browsable catalog under every
//! failure mode; this dataset is what keeps that promise.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use marketplace_types::{
    ActivityEvent, ActivityKind, Asset, AssetCategory, Bid, PlatformStats, PricePoint, UserSummary,
};

static FALLBACK_ASSETS: LazyLock<Vec<Asset>> = LazyLock::new(build_assets);
static FALLBACK_STATS: LazyLock<PlatformStats> = LazyLock::new(build_stats);

/// The full fallback asset list, in display order
pub fn fallback_assets() -> Vec<Asset> {
    FALLBACK_ASSETS.clone()
}

/// Look up a single fallback asset by id
pub fn fallback_asset(asset_id: &str) -> Option<Asset> {
    FALLBACK_ASSETS
        .iter()
        .find(|asset| asset.id == asset_id)
        .cloned()
}

/// Platform statistics matching the fallback dataset
pub fn fallback_stats() -> PlatformStats {
    FALLBACK_STATS.clone()
}

fn sample_users() -> [UserSummary; 3] {
    [
        UserSummary::new(
            "0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063",
            "nova_fields",
            Some("https://images.artmint.example/avatars/nova.png".to_string()),
        ),
        UserSummary::new(
            "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174",
            "kaito.eth",
            None,
        ),
        UserSummary::new(
            "0x7ceB23fD6bC0adD59E62ac25578270cFf1b9f619",
            "mirelle",
            Some("https://images.artmint.example/avatars/mirelle.png".to_string()),
        ),
    ]
}

fn build_assets() -> Vec<Asset> {
    let [nova, kaito, mirelle] = sample_users();

    vec![
        Asset {
            id: "fallback-001".to_string(),
            name: "Aurora Drift".to_string(),
            description: "Generative aurora field rendered from magnetometer data.".to_string(),
            category: AssetCategory::Art,
            image_url: Some("https://images.artmint.example/assets/aurora-drift.png".to_string()),
            price: 2.4,
            royalty_percent: 5.0,
            is_listed: true,
            created_at: ts("2026-01-05T09:30:00Z"),
            owner: nova.clone(),
            creator: mirelle.clone(),
            bids: vec![
                Bid {
                    id: "fallback-bid-001".to_string(),
                    asset_id: "fallback-001".to_string(),
                    bidder: kaito.clone(),
                    amount: 2.1,
                    placed_at: ts("2026-01-08T14:12:00Z"),
                },
                Bid {
                    id: "fallback-bid-002".to_string(),
                    asset_id: "fallback-001".to_string(),
                    bidder: mirelle.clone(),
                    amount: 2.35,
                    placed_at: ts("2026-01-09T10:47:00Z"),
                },
            ],
            activity: vec![
                ActivityEvent {
                    id: "fallback-act-003".to_string(),
                    asset_id: "fallback-001".to_string(),
                    kind: ActivityKind::BidPlaced,
                    actor_wallet: kaito.wallet_address.clone(),
                    amount: Some(2.1),
                    occurred_at: ts("2026-01-08T14:12:00Z"),
                },
                ActivityEvent {
                    id: "fallback-act-002".to_string(),
                    asset_id: "fallback-001".to_string(),
                    kind: ActivityKind::Listed,
                    actor_wallet: nova.wallet_address.clone(),
                    amount: Some(2.4),
                    occurred_at: ts("2026-01-06T08:00:00Z"),
                },
                ActivityEvent {
                    id: "fallback-act-001".to_string(),
                    asset_id: "fallback-001".to_string(),
                    kind: ActivityKind::Minted,
                    actor_wallet: mirelle.wallet_address.clone(),
                    amount: None,
                    occurred_at: ts("2026-01-05T09:30:00Z"),
                },
            ],
            price_history: vec![
                PricePoint {
                    price: 1.8,
                    recorded_at: ts("2026-01-05T09:30:00Z"),
                },
                PricePoint {
                    price: 2.1,
                    recorded_at: ts("2026-01-07T16:20:00Z"),
                },
                PricePoint {
                    price: 2.4,
                    recorded_at: ts("2026-01-09T11:00:00Z"),
                },
            ],
        },
        Asset {
            id: "fallback-002".to_string(),
            name: "Mono No. 7".to_string(),
            description: "Seventh plate in a monochrome etching series.".to_string(),
            category: AssetCategory::Photography,
            image_url: Some("https://images.artmint.example/assets/mono-7.png".to_string()),
            price: 0.85,
            royalty_percent: 7.5,
            is_listed: true,
            created_at: ts("2026-01-12T18:05:00Z"),
            owner: kaito.clone(),
            creator: kaito.clone(),
            bids: Vec::new(),
            activity: Vec::new(),
            price_history: Vec::new(),
        },
        Asset {
            id: "fallback-003".to_string(),
            name: "Chrome Garden".to_string(),
            description: "Looping sculpture garden scanned from found chrome.".to_string(),
            category: AssetCategory::Virtual,
            image_url: Some("https://images.artmint.example/assets/chrome-garden.png".to_string()),
            price: 5.6,
            royalty_percent: 10.0,
            is_listed: true,
            created_at: ts("2026-01-18T07:45:00Z"),
            owner: mirelle.clone(),
            creator: mirelle,
            bids: Vec::new(),
            activity: Vec::new(),
            price_history: Vec::new(),
        },
        Asset {
            id: "fallback-004".to_string(),
            name: "Night Signal".to_string(),
            description: "Field recording of a harbor at 3am, pressed to waveform art.".to_string(),
            category: AssetCategory::Music,
            image_url: None,
            price: 1.2,
            royalty_percent: 5.0,
            is_listed: false,
            created_at: ts("2026-02-01T22:10:00Z"),
            owner: nova.clone(),
            creator: nova,
            bids: Vec::new(),
            activity: Vec::new(),
            price_history: Vec::new(),
        },
    ]
}

fn build_stats() -> PlatformStats {
    PlatformStats {
        total_assets: 4,
        total_users: 3,
        total_volume: 18.7,
        average_price: 2.51,
        updated_at: Some(ts("2026-02-02T00:00:00Z")),
    }
}

fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_is_non_empty_with_unique_ids() {
        let assets = fallback_assets();
        assert!(!assets.is_empty());

        let mut ids: Vec<_> = assets.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), assets.len());
    }

    #[test]
    fn lookup_finds_known_id_and_misses_unknown() {
        assert!(fallback_asset("fallback-001").is_some());
        assert!(fallback_asset("no-such-asset").is_none());
    }

    #[test]
    fn rich_asset_carries_relations() {
        let asset = fallback_asset("fallback-001").unwrap();
        assert!(!asset.bids.is_empty());
        assert!(!asset.activity.is_empty());
        assert!(!asset.price_history.is_empty());

        let top = asset.top_bid().unwrap();
        assert!((top.amount - 2.35).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_describe_the_dataset() {
        let stats = fallback_stats();
        assert_eq!(stats.total_assets, fallback_assets().len() as u64);
        assert!(stats.updated_at.is_some());
    }
}
