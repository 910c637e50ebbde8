// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! The safe-call executor and the error-reporting seam
//!
//! [`SafeCaller::execute`] is the only point in the workspace where a
//! functional remote call's result is inspected for failure. Connector read
//! methods and best-effort secondary writes route through it; health probes
//! do not, because there the error itself is the datum of interest.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{debug, warn};

use crate::ServiceError;

/// Destination for captured remote-call failures
///
/// Stands in for the external error-tracking service. Every failure the
/// safe-call executor swallows is forwarded here, tagged with the
/// originating service and operation, so swallowed does not mean invisible.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorSink: Send + Sync {
    /// Record one captured failure
    fn capture(&self, service: &str, operation: &str, error: &ServiceError);
}

/// Default sink that forwards captures to the tracing pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn capture(&self, service: &str, operation: &str, error: &ServiceError) {
        tracing::error!(
            service,
            operation,
            category = error.category(),
            error = %error,
            "captured remote call failure"
        );
    }
}

/// One failure held by a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    /// Service the failing call belonged to
    pub service: String,
    /// Operation name supplied by the caller
    pub operation: String,
    /// Error category label
    pub category: &'static str,
    /// Rendered error message
    pub message: String,
}

/// Sink that keeps captures in memory
///
/// Used by tests to assert on capture behavior and by embedders that want
/// to inspect recent failures without an external tracker.
#[derive(Debug, Default)]
pub struct RecordingSink {
    captured: Mutex<Vec<CapturedError>>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything captured so far, in capture order
    pub fn captured(&self) -> Vec<CapturedError> {
        self.lock().clone()
    }

    /// Number of captures so far
    pub fn capture_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CapturedError>> {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ErrorSink for RecordingSink {
    fn capture(&self, service: &str, operation: &str, error: &ServiceError) {
        self.lock().push(CapturedError {
            service: service.to_string(),
            operation: operation.to_string(),
            category: error.category(),
            message: error.to_string(),
        });
    }
}

/// Wraps one remote operation with uniform error capture and a fallback
///
/// Cheap to clone; connectors hold one per service and share the sink.
#[derive(Clone)]
pub struct SafeCaller {
    service: &'static str,
    sink: Arc<dyn ErrorSink>,
}

impl fmt::Debug for SafeCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeCaller")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

impl SafeCaller {
    /// Create an executor for one service
    pub fn new(service: &'static str, sink: Arc<dyn ErrorSink>) -> Self {
        Self { service, sink }
    }

    /// Service name this executor tags captures with
    pub const fn service(&self) -> &'static str {
        self.service
    }

    /// Run one remote operation, substituting `fallback` on failure or absence
    ///
    /// - `Ok(Some(value))` passes the value through.
    /// - `Ok(None)` returns `fallback`; absence is "nothing to show", not an
    ///   error, and is logged at debug level only.
    /// - `Err` logs a warning, reports the error to the sink tagged with the
    ///   service and operation names, and returns `fallback` unchanged.
    ///
    /// Exactly one attempt is made. Retry policy, if any, belongs to the
    /// caller; none exists in this layer.
    pub async fn execute<T, F>(&self, operation: &str, op: F, fallback: T) -> T
    where
        F: Future<Output = Result<Option<T>, ServiceError>> + Send,
        T: Send,
    {
        match op.await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(
                    service = self.service,
                    operation, "remote call returned no payload, using fallback"
                );
                fallback
            }
            Err(error) => {
                warn!(
                    service = self.service,
                    operation,
                    category = error.category(),
                    error = %error,
                    "remote call failed, using fallback"
                );
                self.sink.capture(self.service, operation, &error);
                fallback
            }
        }
    }
}
