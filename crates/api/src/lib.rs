// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Marketplace API Server Implementation
//!
//! This crate provides the HTTP server for the marketplace data access layer,
//! built with Axum and designed for production use with comprehensive
//! configuration, middleware, and graceful shutdown capabilities.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and HTTP response handling with proper status codes
//! - [`state`]: Shared application state management with cancellation token support
//! - [`server`]: Main server implementation, connector wiring, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`middleware`]: Per-IP rate limiting
//! - [`extractors`]: JSON extraction with detailed parse-error hints
//! - [`metrics`]: Prometheus metrics and the request-timing middleware
//! - [`docs`]: The `OpenAPI` document covering every route and schema
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints for API documentation
//!
//! # Key Features
//!
//! - **Degraded-mode Reads**: Catalog endpoints keep answering from fallback data
//!   when the relational store is unconfigured or unreachable
//! - **Connection Monitoring**: On-demand probe rounds across store, chain RPC
//!   and pinning service, exposed via the status endpoints
//! - **Graceful Shutdown**: Coordinated termination using `CancellationToken` with timeouts
//! - **Rate Limiting**: IP-based request limiting with configurable requests per minute
//! - **Comprehensive Middleware**: Request tracing, CORS, timeouts, and error handling

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, ServerState};
