// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Attack simulation patterns for security testing.

/// Kind of payload an attack submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Well-formed submissions
    Valid,
    /// Script and markup injection in every field
    Injection,
    /// Malformed email addresses
    BadEmail,
    /// Empty or whitespace-only fields
    Empty,
    /// Fields past their length limits
    Oversized,
}

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Number of unique client identifiers to simulate
    pub unique_ips: usize,
    /// What each request carries
    pub payload: PayloadKind,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            unique_ips: 1,
            payload: PayloadKind::Valid,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single client flood - one address hammering the form.
    pub fn single_ip_flood() -> Self {
        Self {
            total_requests: 200,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Distributed flood - many addresses, a few requests each.
    pub fn distributed_flood() -> Self {
        Self {
            total_requests: 500,
            unique_ips: 100,
            ..Default::default()
        }
    }

    /// Markup injection attempts that are otherwise valid submissions.
    pub fn injection_attack() -> Self {
        Self {
            total_requests: 60,
            unique_ips: 20,
            payload: PayloadKind::Injection,
        }
    }

    /// Garbage email addresses.
    pub fn bad_email_attack() -> Self {
        Self {
            total_requests: 50,
            unique_ips: 50,
            payload: PayloadKind::BadEmail,
        }
    }

    /// Empty fields.
    pub fn empty_fields_attack() -> Self {
        Self {
            total_requests: 50,
            unique_ips: 50,
            payload: PayloadKind::Empty,
        }
    }

    /// Oversized fields.
    pub fn oversized_attack() -> Self {
        Self {
            total_requests: 30,
            unique_ips: 30,
            payload: PayloadKind::Oversized,
        }
    }
}
