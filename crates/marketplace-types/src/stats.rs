// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Aggregate platform statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Marketplace-wide statistics shown on the app's landing screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlatformStats {
    /// Total number of assets on the platform
    pub total_assets: u64,
    /// Total number of registered users
    pub total_users: u64,
    /// All-time traded volume in the listing currency
    pub total_volume: f64,
    /// Average asset price
    pub average_price: f64,
    /// When the statistics row was last refreshed
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serde_round_trip() {
        let stats = PlatformStats {
            total_assets: 120,
            total_users: 48,
            total_volume: 904.25,
            average_price: 1.8,
            updated_at: None,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: PlatformStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, back);
    }
}
