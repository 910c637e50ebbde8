// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain RPC connector
//!
//! Speaks JSON-RPC 2.0 to an Ethereum-compatible node for the current block
//! height and fetches a reference asset price from a public quote endpoint.
//! Both calls are read-only; the connector exists so the status screen can
//! tell "node reachable" apart from "price feed down".

use std::time::Instant;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use service_client::{HealthReport, ServiceConnector, ServiceError};
use tracing::{debug, warn};

use crate::{USER_AGENT, elapsed_ms};

/// Default request timeout for chain calls
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Public quote endpoint used when no price URL is configured
const DEFAULT_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

/// Configuration for the blockchain RPC connector
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// JSON-RPC endpoint of the node
    pub rpc_url: String,
    /// Quote endpoint returning the reference asset price in USD
    pub price_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            price_url: DEFAULT_PRICE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ChainConfig {
    /// Whether the RPC URL is present; the price URL always has a default
    pub fn is_configured(&self) -> bool {
        !self.rpc_url.trim().is_empty()
    }
}

/// HTTP client for the blockchain RPC provider
#[derive(Debug, Clone)]
pub struct ChainClient {
    client: Client,
    config: ChainConfig,
}

impl ChainClient {
    /// Create a new chain client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: ChainConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ServiceError::Internal(anyhow::Error::new(e)))?;

        Ok(Self { client, config })
    }

    /// Whether the RPC URL is present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Fetch the current block height from the node
    ///
    /// # Errors
    ///
    /// Returns an error if the connector is unconfigured, the request fails,
    /// or the response carries no parseable height.
    pub async fn block_number(&self) -> Result<u64, ServiceError> {
        if !self.config.is_configured() {
            return Err(ServiceError::not_configured("chain RPC URL not set"));
        }

        debug!(url = %self.config.rpc_url, "requesting block height");

        let response = self
            .client
            .post(&self.config.rpc_url)
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "eth_blockNumber",
                "params": [],
            }))
            .send()
            .await
            .map_err(|e| ServiceError::transport(format!("chain RPC request failed: {e}")))?;

        let status = response.status();
        match status {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ServiceError::permission(format!(
                    "chain RPC rejected credentials: {status}"
                )));
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ServiceError::transport(format!(
                    "chain RPC returned {status}: {body}"
                )));
            }
        }

        let rpc: RpcResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::transport(format!("invalid RPC response body: {e}")))?;

        if let Some(error) = rpc.error {
            return Err(ServiceError::transport(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        let raw = rpc
            .result
            .ok_or_else(|| ServiceError::transport("RPC response carried no result"))?;
        let digits = raw.strip_prefix("0x").unwrap_or(&raw);
        u64::from_str_radix(digits, 16)
            .map_err(|e| ServiceError::transport(format!("invalid block number {raw:?}: {e}")))
    }

    /// Fetch the reference asset price in USD
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the quote is missing from the
    /// response.
    pub async fn reference_price(&self) -> Result<f64, ServiceError> {
        debug!(url = %self.config.price_url, "requesting reference price");

        let response = self
            .client
            .get(&self.config.price_url)
            .send()
            .await
            .map_err(|e| ServiceError::transport(format!("price request failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ServiceError::transport(format!(
                "price endpoint returned {status}"
            )));
        }

        let quote: PriceResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::transport(format!("invalid price response body: {e}")))?;
        quote
            .ethereum
            .and_then(|q| q.usd)
            .ok_or_else(|| ServiceError::transport("reference price missing from response"))
    }
}

impl ServiceConnector for ChainClient {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn test_connection(&self) -> Result<HealthReport, ServiceError> {
        if !self.is_configured() {
            return Ok(HealthReport::unconfigured("chain RPC URL not set"));
        }

        let started = Instant::now();
        let height = match self.block_number().await {
            Ok(height) => height,
            Err(error) => {
                warn!(error = %error, "chain probe failed");
                return Ok(
                    HealthReport::failed(error.to_string()).with_latency(elapsed_ms(started))
                );
            }
        };
        let latency = elapsed_ms(started);

        // The node answered, so the chain is reachable; a dead price feed is
        // worth surfacing but must not mark the connector down.
        match self.reference_price().await {
            Ok(price) => Ok(HealthReport::connected(latency)
                .with_block_number(height)
                .with_reference_price(price)),
            Err(error) => {
                warn!(error = %error, "reference price lookup failed");
                Ok(HealthReport::connected(latency)
                    .with_block_number(height)
                    .with_error(format!("price lookup failed: {error}")))
            }
        }
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Quote endpoint response shape
#[derive(Debug, Deserialize)]
struct PriceResponse {
    ethereum: Option<PriceQuote>,
}

#[derive(Debug, Deserialize)]
struct PriceQuote {
    usd: Option<f64>,
}
