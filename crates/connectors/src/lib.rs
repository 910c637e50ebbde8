// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Service connectors for the marketplace's external dependencies
//!
//! This crate implements the `ServiceConnector` trait for the three services
//! the app depends on, plus the monitor that aggregates their health into one
//! snapshot for the status screen.
//!
//! # Architecture
//!
//! - **Connector Implementations**: [`store`], [`chain`], [`pinning`] - one client per service
//! - **Health Aggregation**: [`monitor::ConnectionMonitor`] - probes all connectors concurrently
//!   and publishes an atomically replaced status snapshot
//!
//! # Features
//!
//! - **Failure Isolation**: one connector's failure never aborts the others' probes
//! - **Concurrent Health Checks**: Uses `tokio::join!` for probe cycles
//! - **Error Classification**: store failures are told apart as missing tables,
//!   denied permissions, or transport faults
//! - **Safe Degradation**: functional reads resolve to fallback values instead of errors
//! - **Testing Support**: wiremock-backed coverage for every connector dialect

use std::time::Instant;

pub mod chain;
pub mod monitor;
pub mod pinning;
pub mod store;

pub use chain::*;
pub use monitor::*;
pub use pinning::*;
pub use store::*;

/// User agent sent on every outbound request
pub(crate) const USER_AGENT: &str = concat!("marketplace-api/", env!("CARGO_PKG_VERSION"));

/// Wall-clock milliseconds since `started`, saturating on overflow
pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
