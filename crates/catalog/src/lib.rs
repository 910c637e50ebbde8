// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Marketplace catalog assembly and degradation logic
//!
//! This crate turns raw relational rows from the store connector into the
//! normalized domain model served by the API. Every read path is total: when
//! the store is unconfigured, unreachable, or returns rows that cannot be
//! mapped, the catalog serves a bundled fallback dataset instead of an error.
//!
//! # Key Features
//!
//! - **Concurrent Assembly**: Owner, creator, bids, activity, and price
//!   history resolve in parallel per asset
//! - **Graceful Degradation**: Read paths fall back to a small built-in
//!   dataset and never surface store failures to callers
//! - **Row-level Tolerance**: A malformed bid or activity row drops that row,
//!   not the asset; a malformed asset row drops that asset, not the list
//! - **Authoritative Writes**: Mints, bids, purchases, and profile updates
//!   perform one authoritative store write, then best-effort bookkeeping
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - [`assembler`]: The [`Catalog`] facade joining rows into domain assets
//! - [`fallback`]: The bundled dataset served when the store cannot be reached
//! - [`error`]: Error types separating caller faults from store failures
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use catalog::Catalog;
//! use connectors::{StoreClient, StoreConfig};
//! use service_client::TracingSink;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig {
//!     base_url: "https://project.example.co".to_string(),
//!     anon_key: "anon-key".to_string(),
//!     ..StoreConfig::default()
//! };
//! let store = StoreClient::new(config, Arc::new(TracingSink))?;
//! let catalog = Catalog::new(store);
//!
//! let assets = catalog.fetch_all().await;
//! println!("serving {} assets", assets.len());
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod error;
pub mod fallback;

// Re-export main types for convenience
pub use assembler::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use fallback::{fallback_asset, fallback_assets, fallback_stats};
