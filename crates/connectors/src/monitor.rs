// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Connection health aggregation
//!
//! [`ConnectionMonitor`] owns the process-wide [`ConnectionStatusSnapshot`]
//! and replaces it wholesale after each probe cycle. Readers always observe
//! either the previous complete snapshot or the new one; a `testing` flag
//! turns re-entrant cycle requests into no-op reads of the current state.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use service_client::{ConnectionStatusSnapshot, HealthReport, ServiceConnector};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{chain::ChainClient, pinning::PinningClient, store::StoreClient};

/// Aggregates the three service connectors into one status snapshot
#[derive(Debug)]
pub struct ConnectionMonitor {
    store: StoreClient,
    chain: ChainClient,
    pinning: PinningClient,
    wallet_configured: bool,
    snapshot: RwLock<ConnectionStatusSnapshot>,
    testing: AtomicBool,
}

impl ConnectionMonitor {
    /// Create a monitor with an empty snapshot
    ///
    /// `wallet_configured` reflects whether a wallet-protocol project id is
    /// present in configuration; it never changes after startup.
    pub fn new(
        store: StoreClient,
        chain: ChainClient,
        pinning: PinningClient,
        wallet_configured: bool,
    ) -> Self {
        Self {
            store,
            chain,
            pinning,
            wallet_configured,
            snapshot: RwLock::new(ConnectionStatusSnapshot::empty(wallet_configured)),
            testing: AtomicBool::new(false),
        }
    }

    /// The most recently published snapshot
    pub async fn current(&self) -> ConnectionStatusSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Whether a probe cycle is currently in flight
    pub fn is_testing(&self) -> bool {
        self.testing.load(Ordering::SeqCst)
    }

    /// Whether the wallet protocol is configured
    pub const fn wallet_configured(&self) -> bool {
        self.wallet_configured
    }

    /// Probe all three services concurrently and publish a new snapshot
    ///
    /// If a cycle is already in flight the call is a no-op trigger and
    /// returns the current snapshot unchanged. Dropping the returned future
    /// mid-cycle releases the in-flight flag; the abandoned cycle publishes
    /// nothing.
    pub async fn test_all(&self) -> ConnectionStatusSnapshot {
        if self
            .testing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("probe cycle already in flight; returning current snapshot");
            return self.current().await;
        }
        let _reset = TestingReset {
            flag: &self.testing,
        };

        debug!("starting connection probe cycle");

        let (store, chain, pinning) = tokio::join!(
            resolve_report(&self.store),
            resolve_report(&self.chain),
            resolve_report(&self.pinning),
        );

        let snapshot = ConnectionStatusSnapshot {
            store: Some(store),
            chain: Some(chain),
            pinning: Some(pinning),
            wallet_configured: self.wallet_configured,
            last_tested: Some(Utc::now()),
        };

        *self.snapshot.write().await = snapshot.clone();

        info!(
            all_connected = snapshot.all_connected(),
            "connection probe cycle finished"
        );
        snapshot
    }
}

/// Clears the `testing` flag when the probe cycle ends, including when the
/// cycle future is dropped mid-flight (request timeout, client disconnect).
struct TestingReset<'a> {
    flag: &'a AtomicBool,
}

impl Drop for TestingReset<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Run one connector's probe, shielding the cycle from its failure
async fn resolve_report<C: ServiceConnector>(connector: &C) -> HealthReport {
    match connector.test_connection().await {
        Ok(report) => report,
        Err(error) => {
            warn!(service = connector.name(), error = %error, "connection test failed");
            HealthReport::failed(format!("connection test failed: {error}"))
        }
    }
}
