// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the marketplace API
//! server, including configuration, the catalog and connection monitor
//! handles, and coordinated cancellation.

use std::sync::Arc;

use catalog::Catalog;
use connectors::ConnectionMonitor;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::config::{Environment, ServerConfig};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Catalog facade over the relational store
    catalog: Arc<Catalog>,
    /// Connection health aggregator for the backing services
    monitor: Arc<ConnectionMonitor>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `catalog` - Catalog facade over the relational store
    /// * `monitor` - Connection health aggregator
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        catalog: Arc<Catalog>,
        monitor: Arc<ConnectionMonitor>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            catalog,
            monitor,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the catalog facade
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Get the connection health aggregator
    pub fn monitor(&self) -> &Arc<ConnectionMonitor> {
        &self.monitor
    }

    /// Produce a process liveness report
    ///
    /// This never consults the backing services; readiness of those is the
    /// connection status endpoint's job.
    pub async fn health_check(&self) -> HealthCheck {
        let snapshot = self.monitor.current().await;

        HealthCheck {
            status: Box::from("ok"),
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            connections_tested: snapshot.last_tested.is_some(),
        }
    }
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: Box<str>,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Whether a connection test has run since startup
    pub connections_tested: bool,
}
