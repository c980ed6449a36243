// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact gate service.
//!
//! A submission runs straight through: resolve the client, charge the rate
//! limit, parse, validate, sanitize, log, respond. Nothing is forwarded;
//! delivering the message (email or otherwise) is left to whatever reads
//! the logs.

use crate::config::Config;
use crate::error::{rate_limit_headers, AppError, Result};
use crate::guard::guard;
use crate::identity::{hash_identifier, resolve_client_identifier};
use crate::limiter::RateLimiter;
use crate::metrics::{outcome, Metrics};
use crate::validator::{validate_payload, ContactSubmission};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Path of the contact submission endpoint.
pub const CONTACT_PATH: &str = "/api/contact";

/// Shared application state.
pub struct AppState {
    pub limiter: RateLimiter,
    pub metrics: Metrics,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> prometheus::Result<Self> {
        Ok(Self {
            limiter: RateLimiter::new(config.rate_limit.clone()),
            metrics: Metrics::new()?,
            config,
        })
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Successful submission response.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-gate",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Client identifier as it should appear in logs: verbatim in
/// development, salted and hashed otherwise.
fn log_identifier(config: &Config, client: &str) -> String {
    if config.environment.is_development() {
        client.to_string()
    } else {
        hash_identifier(client, &config.log_salt)
    }
}

/// Accept a contact form submission.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let client = resolve_client_identifier(&headers);
    let log_client = log_identifier(&state.config, &client);

    let rate = state.limiter.check(&client).await;
    state
        .metrics
        .tracked_clients
        .set(state.limiter.tracked().await as i64);

    if !rate.is_allowed() {
        let retry_after_secs = rate.retry_after_secs(Utc::now());
        info!(
            client = %log_client,
            retry_after_secs,
            "Contact submission rate limited"
        );
        state.metrics.record_submission(outcome::RATE_LIMITED);
        return Err(AppError::RateLimited {
            limit: state.limiter.limit(),
            reset_at: rate.reset_at(),
            retry_after_secs,
        });
    }

    let submission: ContactSubmission = serde_json::from_slice(&body).map_err(|err| {
        debug!(client = %log_client, error = %err, "Malformed submission body");
        state.metrics.record_submission(outcome::INVALID);
        AppError::MalformedBody
    })?;

    if let Err(err) = validate_payload(&submission).into_result() {
        info!(client = %log_client, error = %err, "Contact submission rejected");
        state.metrics.record_submission(outcome::INVALID);
        return Err(err.into());
    }

    if submission.looks_like_injection() {
        warn!(client = %log_client, "Contact submission contains markup injection attempt");
    }

    let sanitized = submission.sanitize(&client, Utc::now());

    if state.config.environment.is_development() {
        let payload = serde_json::to_string(&sanitized).map_err(|err| {
            state.metrics.record_submission(outcome::ERROR);
            AppError::Internal(err.to_string())
        })?;
        info!(submission = %payload, "Contact form submission");
    } else {
        info!(
            client = %log_client,
            timestamp = %sanitized.timestamp,
            name_len = sanitized.name.chars().count(),
            message_len = sanitized.message.chars().count(),
            "Contact form submission accepted"
        );
    }

    state.metrics.record_submission(outcome::ACCEPTED);

    Ok((
        StatusCode::OK,
        rate_limit_headers(state.limiter.limit(), rate.remaining(), rate.reset_at()),
        Json(SubmitResponse {
            success: true,
            message: "Message sent successfully",
        }),
    )
        .into_response())
}

/// CORS preflight for the contact endpoint. Any origin is accepted.
pub async fn contact_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

/// Prometheus text exposition.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<String> {
    state
        .metrics
        .encode()
        .map_err(|err| AppError::Internal(err.to_string()))
}

/// Build the service router around `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route(CONTACT_PATH, post(submit_contact).options(contact_preflight));

    if state.config.metrics.enabled {
        let path = &state.config.metrics.path;
        if path.starts_with('/') {
            app = app.route(path, get(metrics_handler));
        } else {
            warn!(path = %path, "Metrics path must start with '/', endpoint disabled");
        }
    }

    app.layer(middleware::from_fn_with_state(state.clone(), guard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
