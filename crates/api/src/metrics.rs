// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros,
//! an Axum-compatible metrics handler, and the request-timing middleware.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{MatchedPath, Request},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use prometheus::{
    Encoder, GaugeVec, HistogramVec, IntCounterVec, TextEncoder, register_gauge_vec,
    register_histogram_vec, register_int_counter_vec,
};
use service_client::HealthReport;

/// Total number of HTTP requests served, labeled by method, route and status.
pub static HTTP_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "marketplace_api_http_requests_total",
        "Total number of HTTP requests, labeled by method, route and status",
        &["method", "path", "status"]
    )
    .expect("Failed to create marketplace_api_http_requests_total counter vec")
});

/// Histogram for HTTP request durations in seconds.
pub static HTTP_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "marketplace_api_http_request_duration_seconds",
        "HTTP request durations in seconds",
        &["method", "path"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to create HTTP request duration histogram")
});

/// Histogram for backing-service probe durations in seconds.
pub static PROBE_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "marketplace_api_probe_duration_seconds",
        "Connection probe durations in seconds",
        &["service"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create probe duration histogram")
});

/// Per-service availability gauge as observed by the latest probe (1 = up).
pub static SERVICE_UP: LazyLock<GaugeVec> = LazyLock::new(|| {
    register_gauge_vec!(
        "marketplace_api_service_up",
        "Whether the last probe reached the service (1 = up, 0 = down)",
        &["service"]
    )
    .expect("Failed to create service up gauge vec")
});

/// Record the outcome of one connector probe
///
/// # Arguments
/// * `service` - The probed service label (`store`, `chain`, `pinning`)
/// * `report` - The probe report returned by the connection monitor
pub fn record_probe(service: &str, report: &HealthReport) {
    let up = if report.connected { 1.0 } else { 0.0 };
    SERVICE_UP.with_label_values(&[service]).set(up);

    if let Some(latency_ms) = report.latency_ms {
        #[allow(clippy::cast_precision_loss)]
        PROBE_DURATION
            .with_label_values(&[service])
            .observe(latency_ms as f64 / 1000.0);
    }
}

/// Axum middleware that counts and times every request
///
/// Uses the matched route template as the `path` label so per-id URLs do not
/// explode the label cardinality. Requests that match no route are grouped
/// under `unmatched`.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    HTTP_REQUESTS
        .with_label_values(&[&method, &path, &status])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &path])
        .observe(elapsed);

    response
}

/// Axum handler that exports metrics in Prometheus text format
///
/// # Panics
///
/// This function will panic if:
/// - The metrics encoder fails to encode the metrics data
/// - The UTF-8 conversion of the encoded buffer fails
/// - The HTTP response builder fails to create the response
pub async fn metrics_handler() -> Response<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(String::from_utf8(buffer).expect("metrics buffer should be valid UTF-8"))
        .expect("Failed to create metrics response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_outcome_drives_service_gauge() {
        let mut report = HealthReport {
            configured: true,
            connected: true,
            can_read: None,
            can_write: None,
            block_number: None,
            reference_price_usd: None,
            latency_ms: Some(120),
            error: None,
            tables: None,
        };

        record_probe("chain", &report);
        assert!((SERVICE_UP.with_label_values(&["chain"]).get() - 1.0).abs() < f64::EPSILON);

        report.connected = false;
        record_probe("chain", &report);
        assert!(SERVICE_UP.with_label_values(&["chain"]).get().abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn metrics_endpoint_exports_text_format() {
        // Touch a metric so the gather is never empty.
        HTTP_REQUESTS
            .with_label_values(&["GET", "/health", "200"])
            .inc();

        let response = metrics_handler().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .body()
                .contains("marketplace_api_http_requests_total")
        );
    }
}
