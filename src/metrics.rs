// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for the contact gate.

use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Outcome label values for `contact_submissions_total`.
pub mod outcome {
    pub const ACCEPTED: &str = "accepted";
    pub const INVALID: &str = "invalid";
    pub const RATE_LIMITED: &str = "rate_limited";
    pub const ERROR: &str = "error";
}

/// Reason label values for `contact_guard_rejections_total`.
pub mod rejection {
    pub const BLOCKED_IP: &str = "blocked_ip";
    pub const SUSPICIOUS_AGENT: &str = "suspicious_agent";
    pub const METHOD_NOT_ALLOWED: &str = "method_not_allowed";
}

/// Metric handles registered in a private registry.
pub struct Metrics {
    registry: Registry,
    pub submissions: IntCounterVec,
    pub guard_rejections: IntCounterVec,
    pub tracked_clients: IntGauge,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new(
                "contact_submissions_total",
                "Contact form submissions by outcome",
            ),
            &["outcome"],
        )?;
        let guard_rejections = IntCounterVec::new(
            Opts::new(
                "contact_guard_rejections_total",
                "Requests rejected by the ingress guard",
            ),
            &["reason"],
        )?;
        let tracked_clients = IntGauge::new(
            "contact_rate_limit_tracked_clients",
            "Client identifiers currently held by the rate limiter",
        )?;

        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(guard_rejections.clone()))?;
        registry.register(Box::new(tracked_clients.clone()))?;

        Ok(Self {
            registry,
            submissions,
            guard_rejections,
            tracked_clients,
        })
    }

    pub fn record_submission(&self, outcome: &str) {
        self.submissions.with_label_values(&[outcome]).inc();
    }

    pub fn record_rejection(&self, reason: &str) {
        self.guard_rejections.with_label_values(&[reason]).inc();
    }

    /// Encode every registered metric in the Prometheus text format.
    pub fn encode(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
