// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides error types for server operations, including the
//! HTTP response mapping for write-path failures. Read paths never surface
//! upstream failures here; they degrade to fallback data inside `catalog`.

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use thiserror::Error;

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Input validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// JSON parsing errors with detailed context
    #[error("Invalid JSON request: {message}")]
    JsonError {
        /// Detailed error message
        message: String,
    },

    /// The requested entity does not exist
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing entity
        resource: String,
    },

    /// The store rejected or failed an authoritative write
    #[error("Upstream write failed: {message}")]
    UpstreamWrite {
        /// Human-readable failure description for the retry prompt
        message: String,
    },
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Create a not-found error
    pub fn not_found<T: ToString>(resource: T) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
        }
    }
}

impl From<CatalogError> for ServerError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Validation { message } => Self::ValidationError(message),
            CatalogError::AssetNotFound { id } => Self::NotFound {
                resource: format!("asset {id}"),
            },
            CatalogError::Store(source) => Self::UpstreamWrite {
                message: source.to_string(),
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::ValidationError(..) | ServerError::JsonError { .. } => {
                StatusCode::BAD_REQUEST
            }
            ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::UpstreamWrite { .. } => StatusCode::BAD_GATEWAY,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use catalog::CatalogError;
    use service_client::ServiceError;

    use super::*;

    #[test]
    fn catalog_errors_map_to_http_statuses() {
        let validation: ServerError = CatalogError::validation("name must not be empty").into();
        assert!(matches!(validation, ServerError::ValidationError(..)));

        let missing: ServerError = CatalogError::asset_not_found("asset-1").into();
        assert!(matches!(missing, ServerError::NotFound { .. }));

        let write: ServerError =
            CatalogError::from(ServiceError::permission("permission denied for bids")).into();
        assert!(matches!(write, ServerError::UpstreamWrite { .. }));
    }

    #[test]
    fn write_failure_keeps_human_readable_message() {
        let error: ServerError =
            CatalogError::from(ServiceError::transport("store returned 500 for assets")).into();
        assert!(error.to_string().contains("store returned 500"));
    }
}
