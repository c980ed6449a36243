// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Gate
//!
//! This crate provides the submission endpoint behind a website contact
//! form:
//!
//! - Per-client fixed-window rate limiting (3 per 10 minutes default)
//! - Required-field, length and email-shape validation
//! - HTML escaping of every accepted field
//! - Ingress guard for blocked clients and scripted user agents
//! - Prometheus metrics and JSON structured logs

pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod identity;
pub mod limiter;
pub mod metrics;
pub mod validator;

pub use config::Config;
pub use error::AppError;
pub use handlers::{router, AppState};
pub use identity::resolve_client_identifier;
pub use limiter::{ClientRateRecord, RateLimitResult, RateLimiter};
pub use validator::{
    is_valid_email, sanitize, validate_payload, ContactSubmission, ValidationError,
    ValidationResult,
};
