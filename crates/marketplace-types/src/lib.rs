// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Normalized domain model for the marketplace
//!
//! This crate provides the in-app data model shared across the workspace:
//! assets with their embedded relations, user projections, activity events,
//! and platform statistics. Raw store records are mapped into these types at
//! the assembly boundary and never escape it, so every other crate works
//! with one consistent shape.

pub mod activity;
pub mod assets;
pub mod stats;
pub mod users;

pub use activity::{ActivityEvent, ActivityKind, ActivityKindParseError, Notification};
pub use assets::{Asset, AssetCategory, Bid, NewAsset, NewBid, PricePoint};
pub use stats::PlatformStats;
pub use users::{ProfileUpdate, UserProfile, UserSummary};
