// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! User projections and profile records
//!
//! The store keeps full user rows; the app mostly needs a lightweight
//! projection to embed inside assets and bids. `UserSummary` is that
//! projection and can always be derived from a bare wallet address when no
//! user row exists, so asset assembly never fails on a missing user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lightweight user projection embedded in assets and bids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    /// Wallet address identifying the user
    pub wallet_address: String,
    /// Display name; a shortened wallet address when no user row exists
    pub username: String,
    /// Avatar image URL (if set)
    pub avatar_url: Option<String>,
}

impl UserSummary {
    /// Create a summary with explicit fields
    pub fn new(
        wallet_address: impl Into<String>,
        username: impl Into<String>,
        avatar_url: Option<String>,
    ) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            username: username.into(),
            avatar_url,
        }
    }

    /// Derive a summary from a bare wallet address
    ///
    /// Used when the owning user row is missing or unreachable; the username
    /// falls back to a shortened form of the address.
    pub fn from_wallet(wallet_address: impl Into<String>) -> Self {
        let wallet_address = wallet_address.into();
        let username = shorten_wallet(&wallet_address);
        Self {
            wallet_address,
            username,
            avatar_url: None,
        }
    }
}

/// Upsertable per-wallet profile record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// Wallet address the profile is keyed by
    pub wallet_address: String,
    /// Display name
    pub username: String,
    /// Avatar image URL (if set)
    pub avatar_url: Option<String>,
    /// Free-form biography text (if set)
    pub bio: Option<String>,
    /// When the profile was last written
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input draft for a profile upsert keyed by wallet address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    /// Wallet address to upsert the profile for
    pub wallet_address: String,
    /// New display name (unchanged when absent)
    pub username: Option<String>,
    /// New avatar URL (unchanged when absent)
    pub avatar_url: Option<String>,
    /// New biography text (unchanged when absent)
    pub bio: Option<String>,
}

/// Shorten a wallet address for display (`0x1234...abcd`)
fn shorten_wallet(wallet: &str) -> String {
    // Addresses are ASCII hex; anything else is shown whole.
    if wallet.len() >= 12 && wallet.is_ascii() {
        format!("{}...{}", &wallet[..6], &wallet[wallet.len() - 4..])
    } else {
        wallet.to_string()
    }
}
