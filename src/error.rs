// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the contact gate and their HTTP mapping.

use crate::validator::ValidationError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request body")]
    MalformedBody,

    #[error("Rate limit exceeded")]
    RateLimited {
        limit: u32,
        reset_at: DateTime<Utc>,
        retry_after_secs: u64,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }
}

/// `X-RateLimit-*` headers for a response.
pub fn rate_limit_headers(
    limit: u32,
    remaining: u32,
    reset_at: DateTime<Utc>,
) -> [(&'static str, String); 3] {
    [
        (RATE_LIMIT_LIMIT, limit.to_string()),
        (RATE_LIMIT_REMAINING, remaining.to_string()),
        (
            RATE_LIMIT_RESET,
            reset_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    ]
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string()))).into_response()
            }
            AppError::MalformedBody => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(AppError::MalformedBody.to_string())),
            )
                .into_response(),
            AppError::RateLimited {
                limit,
                reset_at,
                retry_after_secs,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                rate_limit_headers(limit, 0, reset_at),
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                Json(ErrorResponse {
                    error: "Too many requests. Please try again later.".to_string(),
                    message: Some("Rate limit exceeded"),
                }),
            )
                .into_response(),
            AppError::Internal(detail) => {
                error!(error = %detail, "Contact submission failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
