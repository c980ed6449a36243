// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact submission validation and sanitization.
//!
//! Validation rejects empty fields, over-long fields and malformed email
//! addresses. Sanitization escapes HTML-significant characters so that
//! stored or logged submissions cannot carry live markup; it does not
//! replace output encoding where the text is eventually rendered.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// Maximum length of the sender name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of an email address (RFC 5321), in characters.
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of the message body, in characters.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Something, `@`, something, `.`, something; no whitespace or second `@`.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX is a valid regex pattern")
});

static MARKUP_INJECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*script\b|<\s*iframe\b|javascript\s*:|<\s*(?:img|svg)\b[^>]*\bon\w+\s*=|\bon\w+\s*=\s*['\x22]")
        .expect("MARKUP_INJECTION_REGEX is a valid regex pattern")
});

/// Contact form submission as received.
///
/// Absent fields deserialize as empty strings and fail validation as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Submission after sanitization, ready to be logged or forwarded.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub client: String,
}

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Result of validation.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Submission is valid
    Valid,
    /// Submission is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(e) => Err(e),
        }
    }
}

/// Validate a submission.
///
/// Rules are checked field by field (name, email, message) and the first
/// failure is reported.
pub fn validate_payload(submission: &ContactSubmission) -> ValidationResult {
    let fields = [
        ("name", submission.name.as_str(), MAX_NAME_LEN),
        ("email", submission.email.as_str(), MAX_EMAIL_LEN),
        ("message", submission.message.as_str(), MAX_MESSAGE_LEN),
    ];

    for (field, value, max) in fields {
        let value = value.trim();
        // Control characters are stripped by `sanitize`, so they cannot
        // carry a field on their own.
        if value.chars().all(|c| c.is_whitespace() || c.is_control()) {
            debug!(field, "Missing field");
            return ValidationResult::Invalid(ValidationError::MissingField(field));
        }
        if value.chars().count() > max {
            debug!(field, max, "Field too long");
            return ValidationResult::Invalid(ValidationError::TooLong { field, max });
        }
        if field == "email" && !is_valid_email(value) {
            debug!("Invalid email address");
            return ValidationResult::Invalid(ValidationError::InvalidEmail);
        }
    }

    ValidationResult::Valid
}

/// Check that `email` has the shape `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email.chars().count() <= MAX_EMAIL_LEN && EMAIL_REGEX.is_match(email)
}

/// Trim, truncate to `max_len` characters, drop control characters other
/// than newline and tab, and escape `& < > " ' /`.
pub fn sanitize(text: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().chars().take(max_len) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\n' | '\t' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Detect common script-injection shapes in raw input.
pub fn contains_markup_injection(text: &str) -> bool {
    MARKUP_INJECTION_REGEX.is_match(text)
}

impl ContactSubmission {
    /// Sanitize every field with its own length limit.
    pub fn sanitize(&self, client: &str, timestamp: DateTime<Utc>) -> SanitizedSubmission {
        SanitizedSubmission {
            name: sanitize(&self.name, MAX_NAME_LEN),
            email: sanitize(&self.email, MAX_EMAIL_LEN),
            message: sanitize(&self.message, MAX_MESSAGE_LEN),
            timestamp,
            client: client.to_string(),
        }
    }

    /// Whether any field looks like an attempted script injection.
    pub fn looks_like_injection(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .into_iter()
            .any(|field| contains_markup_injection(field))
    }
}
