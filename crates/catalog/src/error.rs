// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for catalog operations
//!
//! Read paths never return these; they degrade to fallback data instead.
//! Write paths surface them so the UI can show a retry prompt rather than
//! silently pretending a write succeeded.

use service_client::ServiceError;
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced by catalog write paths
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Caller-supplied input was rejected before any remote call
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// The targeted asset exists in neither the store nor the fallback set
    #[error("asset not found: {id}")]
    AssetNotFound { id: String },

    /// The store rejected or failed the primary write
    #[error(transparent)]
    Store(#[from] ServiceError),
}

impl CatalogError {
    /// Create a validation error
    pub fn validation<T: ToString>(message: T) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create a not-found error
    pub fn asset_not_found<T: ToString>(id: T) -> Self {
        Self::AssetNotFound { id: id.to_string() }
    }

    /// Whether the error was caused by the caller's input
    pub const fn is_client_fault(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::AssetNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_build_expected_variants() {
        let validation = CatalogError::validation("price must be positive");
        assert!(matches!(validation, CatalogError::Validation { .. }));
        assert!(validation.is_client_fault());

        let not_found = CatalogError::asset_not_found("asset-9");
        assert!(not_found.to_string().contains("asset-9"));
        assert!(not_found.is_client_fault());
    }

    #[test]
    fn store_errors_pass_through_display() {
        let error = CatalogError::from(ServiceError::transport("connection reset"));
        assert!(!error.is_client_fault());
        assert!(error.to_string().contains("connection reset"));
    }
}
