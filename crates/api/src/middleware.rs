// SPDX-FileCopyrightText: 2026 Artmint Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Middleware module for HTTP request processing
//!
//! This module provides per-client rate limiting for the marketplace API
//! server. Limits are tracked per source IP over a fixed one-minute window.

use std::{
    net::IpAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::config::RateLimitingConfig;

// Rate limiting constants
const RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
const MAX_RATE_LIMIT_ENTRIES: usize = 10_000;

/// Rate limiting middleware state
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitingConfig,
    // Lock-free concurrent rate limiting using DashMap
    requests: Arc<DashMap<IpAddr, RequestCounter>>,
}

#[derive(Debug, Clone)]
struct RequestCounter {
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration
    pub fn new(config: RateLimitingConfig) -> Self {
        Self {
            config,
            requests: Arc::new(DashMap::new()),
        }
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Check if a request from the given IP should be rate limited
    pub fn is_rate_limited(&self, ip: IpAddr) -> bool {
        if !self.config.enabled {
            return false;
        }

        let now = Instant::now();
        let window_duration = Duration::from_secs(RATE_LIMIT_WINDOW_SECONDS);

        // Periodically clean up expired entries to prevent memory leaks
        if self.requests.len() > MAX_RATE_LIMIT_ENTRIES {
            self.cleanup_expired_entries(now, window_duration);
        }

        // Lock-free atomic operation to check/update rate limit
        let counter = self
            .requests
            .entry(ip)
            .and_modify(|counter| {
                if now.duration_since(counter.window_start) > window_duration {
                    // Reset window
                    counter.count = 1;
                    counter.window_start = now;
                } else {
                    // Increment in current window
                    counter.count += 1;
                }
            })
            .or_insert_with(|| RequestCounter {
                count: 1,
                window_start: now,
            });

        let current_count = counter.count;

        if current_count > self.config.requests_per_minute {
            debug!("rate limiting IP: {} ({} requests)", ip, current_count);
            true
        } else {
            false
        }
    }

    /// Clean up expired entries using efficient retain operation
    fn cleanup_expired_entries(&self, now: Instant, window_duration: Duration) {
        let entries_before = self.requests.len();

        // Use DashMap's retain for efficient concurrent cleanup
        self.requests
            .retain(|_, counter| now.duration_since(counter.window_start) <= window_duration);

        let entries_after = self.requests.len();
        let cleaned_up = entries_before.saturating_sub(entries_after);

        if cleaned_up > 0 {
            debug!("cleaned up {} expired rate limiter entries", cleaned_up);
        }

        // If still too many entries, remove oldest ones
        if entries_after > MAX_RATE_LIMIT_ENTRIES {
            warn!(
                "rate limiter still has {} entries after cleanup, removing oldest",
                entries_after
            );

            // Collect oldest entries for removal
            let mut oldest_entries: Vec<_> = self
                .requests
                .iter()
                .map(|entry| (*entry.key(), entry.value().window_start))
                .collect();

            oldest_entries.sort_by_key(|(_, window_start)| *window_start);

            let entries_to_remove = entries_after - MAX_RATE_LIMIT_ENTRIES / 2;
            for (ip, _) in oldest_entries.into_iter().take(entries_to_remove) {
                self.requests.remove(&ip);
            }
        }
    }
}

/// Rate limiting middleware function
pub async fn rate_limiting_middleware(
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    State(rate_limiter): State<RateLimiter>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let client_ip = addr.ip();

    if rate_limiter.is_rate_limited(client_ip) {
        warn!("Rate limit exceeded for IP: {}", client_ip);
        return Err(StatusCode::TOO_MANY_REQUESTS);
    }

    Ok(next.run(req).await)
}
