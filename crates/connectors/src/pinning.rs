// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! File-pinning service connector
//!
//! The pinning service only participates in health checks at this layer; the
//! probe is a minimal authenticated call that proves the stored JWT is
//! accepted. Content upload happens elsewhere.

use std::time::Instant;

use reqwest::{Client, StatusCode};
use service_client::{HealthReport, ServiceConnector, ServiceError};
use tracing::{debug, warn};

use crate::{USER_AGENT, elapsed_ms};

/// Default request timeout for pinning calls
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Default pinning service endpoint
const DEFAULT_BASE_URL: &str = "https://api.pinata.cloud";

/// Configuration for the file-pinning connector
#[derive(Debug, Clone)]
pub struct PinningConfig {
    /// Base URL of the pinning service
    pub base_url: String,
    /// JWT used as bearer credential
    pub jwt: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            jwt: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl PinningConfig {
    /// Whether the JWT is present; the base URL always has a default
    pub fn is_configured(&self) -> bool {
        !self.jwt.trim().is_empty()
    }
}

/// HTTP client for the file-pinning service
#[derive(Debug, Clone)]
pub struct PinningClient {
    client: Client,
    config: PinningConfig,
}

impl PinningClient {
    /// Create a new pinning client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: PinningConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ServiceError::Internal(anyhow::Error::new(e)))?;

        Ok(Self { client, config })
    }

    /// Whether the JWT is present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

impl ServiceConnector for PinningClient {
    fn name(&self) -> &'static str {
        "pinning"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn test_connection(&self) -> Result<HealthReport, ServiceError> {
        if !self.is_configured() {
            return Ok(HealthReport::unconfigured("pinning JWT not set"));
        }

        let url = format!(
            "{}/data/testAuthentication",
            self.config.base_url.trim_end_matches('/')
        );

        debug!(url, "probing pinning service");

        let started = Instant::now();
        let response = match self.client.get(&url).bearer_auth(&self.config.jwt).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(error = %error, "pinning probe failed");
                return Ok(HealthReport::failed(format!("pinning request failed: {error}"))
                    .with_latency(elapsed_ms(started)));
            }
        };
        let latency = elapsed_ms(started);

        let status = response.status();
        match status {
            StatusCode::OK => Ok(HealthReport::connected(latency)),
            StatusCode::UNAUTHORIZED => {
                Ok(HealthReport::failed("401 unauthorized").with_latency(latency))
            }
            StatusCode::FORBIDDEN => {
                Ok(HealthReport::failed("403 forbidden").with_latency(latency))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                Ok(HealthReport::failed("429 rate limited").with_latency(latency))
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Ok(
                    HealthReport::failed(format!("pinning service returned {status}: {body}"))
                        .with_latency(latency),
                )
            }
        }
    }
}
