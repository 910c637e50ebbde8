// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Activity events and notifications
//!
//! Activity rows in the store carry their kind as a free string; parsing is
//! strict so that an unrecognized kind fails the mapping of that single
//! event instead of smuggling an unknown state into the app.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of a marketplace activity event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Asset was minted
    Minted,
    /// Asset was listed for sale
    Listed,
    /// A bid was placed on the asset
    BidPlaced,
    /// Asset was sold
    Sale,
    /// Ownership was transferred outside a sale
    Transfer,
}

impl ActivityKind {
    /// Returns the store-side label for this kind
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minted => "minted",
            Self::Listed => "listed",
            Self::BidPlaced => "bid_placed",
            Self::Sale => "sale",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ActivityKind {
    type Err = ActivityKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minted" => Ok(Self::Minted),
            "listed" => Ok(Self::Listed),
            "bid_placed" => Ok(Self::BidPlaced),
            "sale" => Ok(Self::Sale),
            "transfer" => Ok(Self::Transfer),
            _ => Err(ActivityKindParseError::UnknownKind(s.to_string())),
        }
    }
}

/// Error type for activity kind parsing
#[derive(Debug, thiserror::Error)]
pub enum ActivityKindParseError {
    /// The store row carried a kind label this model does not know
    #[error(
        "unknown activity kind: {0}. Known kinds are: minted, listed, bid_placed, sale, transfer"
    )]
    UnknownKind(String),
}

/// One entry in an asset's activity history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityEvent {
    /// Event identifier
    pub id: String,
    /// Asset the event belongs to
    pub asset_id: String,
    /// What happened
    pub kind: ActivityKind,
    /// Wallet that performed the action
    pub actor_wallet: String,
    /// Amount involved, when the event carries one (bids, sales)
    pub amount: Option<f64>,
    /// When the event occurred
    pub occurred_at: DateTime<Utc>,
}

/// A per-wallet notification produced by marketplace bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    /// Notification identifier
    pub id: String,
    /// Wallet the notification is addressed to
    pub wallet_address: String,
    /// Human-readable message
    pub message: String,
    /// Kind label (`bid`, `sale`, `purchase`, `general`)
    ///
    /// A free label rather than [`ActivityKind`]; notifications cover
    /// bookkeeping events that have no activity counterpart.
    pub kind: String,
    /// Whether the notification has been read
    pub read: bool,
    /// When the notification was created
    pub created_at: DateTime<Utc>,
}
