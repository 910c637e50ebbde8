// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Connector abstractions and failure isolation for remote services
//!
//! This crate provides the common vocabulary every service connector in the
//! workspace speaks: a connector trait with configuration detection and
//! health probing, a closed error taxonomy, structured health reports, and
//! the safe-call executor that keeps remote failures from ever crossing
//! into application logic.
//!
//! # Core Abstractions
//!
//! - **`ServiceConnector` Trait**: Common interface for connectors with async probing
//! - **Health Reports**: Structured per-service probe results and the aggregate snapshot
//! - **`ServiceError` Taxonomy**: Closed set of failure categories at the connector boundary
//! - **Safe-Call Executor**: Single funnel turning remote failures into fallback values
//!
//! # Key Features
//!
//! - **Configured vs Reachable vs Erroring**: Explicit, inspectable states instead of exceptions
//! - **Fallback Discipline**: Functional reads degrade to caller-supplied fallbacks, never errors
//! - **Error Reporting Seam**: Every captured failure is forwarded to a pluggable `ErrorSink`
//! - **Single Attempt**: No retry policy lives at this boundary; one call, one result

use thiserror::Error;

pub mod health;
pub mod safe_call;

pub use health::{ConnectionStatusSnapshot, HealthReport, TableStatus};
pub use safe_call::{CapturedError, ErrorSink, RecordingSink, SafeCaller, TracingSink};

/// Generic trait for remote service connectors
///
/// A connector owns configuration detection and health probing for one
/// external dependency. Construction must succeed even when the service is
/// unconfigured; being unconfigured is a reportable state, not an error.
pub trait ServiceConnector: Send + Sync {
    /// Stable service name used in logs, error reports, and snapshots
    fn name(&self) -> &'static str;

    /// Whether the required configuration values are present
    ///
    /// Pure configuration inspection, no I/O. When this returns `false` the
    /// connector must not issue any network call.
    fn is_configured(&self) -> bool;

    /// Probe the service and produce a structured health report
    ///
    /// Unconfigured connectors short-circuit to an unconfigured report
    /// without touching the network. Probe failures are the datum of
    /// interest and are captured inside the report; an `Err` from this
    /// method signals an unexpected internal failure and is turned into a
    /// synthetic failed report by the aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error only when the probe machinery itself fails.
    fn test_connection(&self) -> impl Future<Output = Result<HealthReport, ServiceError>> + Send;
}

/// Failure categories at the connector boundary
///
/// The taxonomy is closed: every remote failure is classified into one of
/// these categories before it reaches application logic, which keeps "why
/// is the service unusable" an inspectable state.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Required configuration absent; short-circuited before any network call
    #[error("not configured: {message}")]
    NotConfigured { message: String },

    /// Network, timeout, or response-decoding failure
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The call reached the service but the target structure does not exist
    ///
    /// A provisioning problem (missing table or endpoint), not a transient one.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// The call reached the service but a policy layer denied access
    ///
    /// A configuration or policy fix, not a code fix.
    #[error("permission denied: {message}")]
    Permission { message: String },

    /// A fetched record could not be normalized into the domain model
    ///
    /// Isolated to the single offending item; never voids a batch.
    #[error("mapping error: {message}")]
    Mapping { message: String },

    /// Unexpected failure in the surrounding machinery
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    /// Create a not-configured error
    pub fn not_configured<T: ToString>(message: T) -> Self {
        Self::NotConfigured {
            message: message.to_string(),
        }
    }

    /// Create a transport error
    pub fn transport<T: ToString>(message: T) -> Self {
        Self::Transport {
            message: message.to_string(),
        }
    }

    /// Create a schema error
    pub fn schema<T: ToString>(message: T) -> Self {
        Self::Schema {
            message: message.to_string(),
        }
    }

    /// Create a permission error
    pub fn permission<T: ToString>(message: T) -> Self {
        Self::Permission {
            message: message.to_string(),
        }
    }

    /// Create a mapping error
    pub fn mapping<T: ToString>(message: T) -> Self {
        Self::Mapping {
            message: message.to_string(),
        }
    }

    /// Stable category label for logs and error reports
    pub const fn category(&self) -> &'static str {
        match self {
            Self::NotConfigured { .. } => "not_configured",
            Self::Transport { .. } => "transport",
            Self::Schema { .. } => "schema",
            Self::Permission { .. } => "permission",
            Self::Mapping { .. } => "mapping",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether this failure points at provisioning or policy, not code
    pub const fn is_provisioning_issue(&self) -> bool {
        matches!(self, Self::Schema { .. } | Self::Permission { .. })
    }
}
