// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Health reports and the aggregate connection status snapshot
//!
//! A [`HealthReport`] is the structured result of one connector probe. The
//! shape is shared across services; service-specific fields (store table
//! diagnostics, chain block height) stay `None` for the services they do
//! not apply to. Reports uphold two invariants:
//!
//! - `connected` implies `configured`
//! - an unconfigured report carries no capability flags, latency, or
//!   diagnostics, because no probe was issued

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reachability of one expected store table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableStatus {
    /// Table name
    pub name: String,
    /// Whether a minimal read of the table succeeded
    pub reachable: bool,
    /// Captured error when the read failed
    pub error: Option<String>,
}

impl TableStatus {
    /// Mark a table as reachable
    pub fn reachable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reachable: true,
            error: None,
        }
    }

    /// Mark a table as unreachable with the captured error
    pub fn unreachable(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reachable: false,
            error: Some(error.into()),
        }
    }
}

/// Structured result of one connector's reachability probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    /// Whether the required configuration values are present
    pub configured: bool,
    /// Whether the probe reached the service
    pub connected: bool,
    /// Whether a minimal read succeeded (store only)
    pub can_read: Option<bool>,
    /// Whether writes are expected to succeed (store only; read proxy)
    pub can_write: Option<bool>,
    /// Latest block height (chain only)
    pub block_number: Option<u64>,
    /// Reference asset price in USD (chain only)
    pub reference_price_usd: Option<f64>,
    /// Wall-clock probe latency in milliseconds
    pub latency_ms: Option<u64>,
    /// Captured error when the probe failed or was skipped
    pub error: Option<String>,
    /// Per-table reachability diagnostics (store only)
    pub tables: Option<Vec<TableStatus>>,
}

impl HealthReport {
    /// Report for a service whose configuration is absent
    ///
    /// No probe was issued, so everything except the error message is empty.
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            configured: false,
            connected: false,
            can_read: None,
            can_write: None,
            block_number: None,
            reference_price_usd: None,
            latency_ms: None,
            error: Some(reason.into()),
            tables: None,
        }
    }

    /// Report for a successful probe
    pub fn connected(latency_ms: u64) -> Self {
        Self {
            configured: true,
            connected: false,
            can_read: None,
            can_write: None,
            block_number: None,
            reference_price_usd: None,
            latency_ms: Some(latency_ms),
            error: None,
            tables: None,
        }
        .mark_connected()
    }

    /// Report for a configured service whose probe failed
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            configured: true,
            connected: false,
            can_read: None,
            can_write: None,
            block_number: None,
            reference_price_usd: None,
            latency_ms: None,
            error: Some(error.into()),
            tables: None,
        }
    }

    /// Attach the measured probe latency
    #[must_use]
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    /// Attach store capability flags
    #[must_use]
    pub fn with_capabilities(mut self, can_read: bool, can_write: bool) -> Self {
        self.can_read = Some(can_read);
        self.can_write = Some(can_write);
        self
    }

    /// Attach per-table diagnostics
    #[must_use]
    pub fn with_tables(mut self, tables: Vec<TableStatus>) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Attach the latest block height
    #[must_use]
    pub fn with_block_number(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }

    /// Attach the reference asset price
    #[must_use]
    pub fn with_reference_price(mut self, price_usd: f64) -> Self {
        self.reference_price_usd = Some(price_usd);
        self
    }

    /// Attach a diagnostic error message without changing connectedness
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Whether the service answered its probe
    pub const fn is_healthy(&self) -> bool {
        self.connected
    }

    fn mark_connected(mut self) -> Self {
        self.connected = true;
        self
    }
}

/// Aggregate health state across all external services
///
/// Published by the connection monitor as process-wide state. Each probe
/// cycle replaces the whole snapshot; readers always observe either the
/// previous complete snapshot or the new one, never a partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConnectionStatusSnapshot {
    /// Relational store report (`None` before the first probe cycle)
    pub store: Option<HealthReport>,
    /// Blockchain RPC report (`None` before the first probe cycle)
    pub chain: Option<HealthReport>,
    /// File-pinning service report (`None` before the first probe cycle)
    pub pinning: Option<HealthReport>,
    /// Whether the wallet-connection protocol is configured
    ///
    /// Configuration-only dependency; there is no runtime call to probe.
    pub wallet_configured: bool,
    /// When the last probe cycle completed
    pub last_tested: Option<DateTime<Utc>>,
}

impl ConnectionStatusSnapshot {
    /// Snapshot for a process that has not probed anything yet
    pub fn empty(wallet_configured: bool) -> Self {
        Self {
            store: None,
            chain: None,
            pinning: None,
            wallet_configured,
            last_tested: None,
        }
    }

    /// Whether at least one probe cycle has completed
    pub const fn has_been_tested(&self) -> bool {
        self.last_tested.is_some()
    }

    /// Whether every probed service answered its probe
    ///
    /// `false` while any service is unprobed, unconfigured, or failing.
    pub fn all_connected(&self) -> bool {
        [&self.store, &self.chain, &self.pinning]
            .into_iter()
            .all(|report| report.as_ref().is_some_and(HealthReport::is_healthy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_report_is_bare() {
        let report = HealthReport::unconfigured("store credentials not set");
        assert!(!report.configured);
        assert!(!report.connected);
        assert!(report.latency_ms.is_none());
        assert!(report.can_read.is_none());
        assert!(report.tables.is_none());
        assert_eq!(report.error.as_deref(), Some("store credentials not set"));
    }

    #[test]
    fn connected_report_upholds_invariant() {
        let report = HealthReport::connected(42);
        assert!(report.configured, "connected implies configured");
        assert!(report.connected);
        assert_eq!(report.latency_ms, Some(42));
        assert!(report.error.is_none());
    }

    #[test]
    fn failed_report_is_configured_but_down() {
        let report = HealthReport::failed("connection refused").with_latency(120);
        assert!(report.configured);
        assert!(!report.connected);
        assert_eq!(report.latency_ms, Some(120));
        assert_eq!(report.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn builders_attach_service_specific_fields() {
        let report = HealthReport::connected(10)
            .with_block_number(1_000_000)
            .with_reference_price(3200.0);
        assert_eq!(report.block_number, Some(1_000_000));
        assert_eq!(report.reference_price_usd, Some(3200.0));

        let report = HealthReport::connected(15)
            .with_capabilities(true, true)
            .with_tables(vec![
                TableStatus::reachable("assets"),
                TableStatus::unreachable("bids", "permission denied"),
            ]);
        assert_eq!(report.can_read, Some(true));
        let tables = report.tables.unwrap();
        assert!(tables[0].reachable);
        assert!(!tables[1].reachable);
    }

    #[test]
    fn empty_snapshot_reports_untested() {
        let snapshot = ConnectionStatusSnapshot::empty(true);
        assert!(!snapshot.has_been_tested());
        assert!(!snapshot.all_connected());
        assert!(snapshot.wallet_configured);
    }

    #[test]
    fn all_connected_requires_every_service() {
        let mut snapshot = ConnectionStatusSnapshot::empty(false);
        snapshot.store = Some(HealthReport::connected(5));
        snapshot.chain = Some(HealthReport::connected(7));
        assert!(!snapshot.all_connected(), "pinning is still unprobed");

        snapshot.pinning = Some(HealthReport::failed("401 unauthorized"));
        assert!(!snapshot.all_connected());

        snapshot.pinning = Some(HealthReport::connected(9));
        assert!(snapshot.all_connected());
    }

    #[test]
    fn snapshot_serializes_round_trip() {
        let mut snapshot = ConnectionStatusSnapshot::empty(true);
        snapshot.store = Some(
            HealthReport::connected(12)
                .with_capabilities(true, true)
                .with_tables(vec![TableStatus::reachable("assets")]),
        );
        snapshot.last_tested = Some(Utc::now());

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ConnectionStatusSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
