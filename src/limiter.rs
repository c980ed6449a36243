// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter keyed by client identifier.
//!
//! Each identifier gets a window of `window_secs` starting at its first
//! request. Up to `max_requests` requests are admitted in that window; once
//! it has elapsed the counter starts over rather than sliding, so a burst
//! straddling a window boundary can admit up to twice the limit.
//!
//! Expired records are swept on every check. State is in-process only and
//! is not shared between instances.

use crate::config::RateLimitConfig;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Longest window accepted; larger configured values are clamped.
const MAX_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// Per-client window state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRateRecord {
    /// Client identifier the record is keyed by
    pub identifier: String,
    /// Requests admitted in the current window
    pub request_count: u32,
    /// When the current window opened
    pub window_start: DateTime<Utc>,
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining requests in current window
        remaining: u32,
        /// When the current window ends
        reset_at: DateTime<Utc>,
    },
    /// Request is rate limited
    Limited {
        /// When the current window ends
        reset_at: DateTime<Utc>,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }

    pub fn remaining(&self) -> u32 {
        match self {
            RateLimitResult::Allowed { remaining, .. } => *remaining,
            RateLimitResult::Limited { .. } => 0,
        }
    }

    pub fn reset_at(&self) -> DateTime<Utc> {
        match self {
            RateLimitResult::Allowed { reset_at, .. } | RateLimitResult::Limited { reset_at } => {
                *reset_at
            }
        }
    }

    /// Whole seconds until the window resets, rounded up; zero once passed.
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.reset_at() - now).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            (millis as u64).div_ceil(1000)
        }
    }
}

/// Thread-safe fixed-window rate limiter.
#[derive(Clone)]
pub struct RateLimiter {
    /// Requests admitted per window
    limit: u32,
    /// Window length
    window: ChronoDuration,
    /// Per-client records
    records: Arc<RwLock<HashMap<String, ClientRateRecord>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        let limit = if config.max_requests == 0 {
            warn!("max_requests of 0 would reject every client, using 1");
            1
        } else {
            config.max_requests
        };
        let window = config
            .window_duration()
            .min(Duration::from_secs(MAX_WINDOW_SECS));

        Self {
            limit,
            window: ChronoDuration::seconds(window.as_secs() as i64),
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Requests admitted per window.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Check and record a request from `identifier` at the current time.
    pub async fn check(&self, identifier: &str) -> RateLimitResult {
        self.check_at(identifier, Utc::now()).await
    }

    /// Check and record a request from `identifier` at `now`.
    ///
    /// The write lock is held across the whole read-modify-write, so
    /// concurrent checks for one identifier never overcount.
    pub async fn check_at(&self, identifier: &str, now: DateTime<Utc>) -> RateLimitResult {
        let mut records = self.records.write().await;

        let window = self.window;
        let before = records.len();
        records.retain(|_, record| !is_expired(record, now, window));
        let swept = before - records.len();
        if swept > 0 {
            debug!(swept, remaining_records = records.len(), "Swept expired rate limit records");
        }

        match records.get_mut(identifier) {
            Some(record) if record.request_count >= self.limit => {
                let reset_at = record.window_start + self.window;
                debug!(identifier, %reset_at, "Rate limit exceeded");
                RateLimitResult::Limited { reset_at }
            }
            Some(record) => {
                record.request_count += 1;
                RateLimitResult::Allowed {
                    remaining: self.limit - record.request_count,
                    reset_at: record.window_start + self.window,
                }
            }
            None => {
                records.insert(
                    identifier.to_string(),
                    ClientRateRecord {
                        identifier: identifier.to_string(),
                        request_count: 1,
                        window_start: now,
                    },
                );
                RateLimitResult::Allowed {
                    remaining: self.limit - 1,
                    reset_at: now + self.window,
                }
            }
        }
    }

    /// Forget everything recorded for `identifier`.
    pub async fn reset(&self, identifier: &str) {
        self.records.write().await.remove(identifier);
    }

    /// Drop records whose window has expired.
    pub async fn cleanup(&self) {
        let now = Utc::now();
        let window = self.window;
        self.records
            .write()
            .await
            .retain(|_, record| !is_expired(record, now, window));
    }

    /// Number of identifiers currently tracked.
    pub async fn tracked(&self) -> usize {
        self.records.read().await.len()
    }

    /// Snapshot of the record for `identifier`, if any.
    pub async fn record(&self, identifier: &str) -> Option<ClientRateRecord> {
        self.records.read().await.get(identifier).cloned()
    }
}

fn is_expired(record: &ClientRateRecord, now: DateTime<Utc>, window: ChronoDuration) -> bool {
    now - record.window_start > window
}
