// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client identification from proxy headers.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

/// Identifier used when no proxy header names the client.
///
/// Every such client shares one rate-limit bucket.
pub const FALLBACK_IDENTIFIER: &str = "127.0.0.1";

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// Resolve a best-effort client address from the request headers.
///
/// Prefers the first hop of `X-Forwarded-For`, then `X-Real-IP`, then
/// [`FALLBACK_IDENTIFIER`]. The value is not parsed as an IP address; it is
/// only a bucket key.
pub fn resolve_client_identifier(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first) = header(FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first.to_string();
    }

    if let Some(real_ip) = header(REAL_IP) {
        return real_ip.to_string();
    }

    FALLBACK_IDENTIFIER.to_string()
}

/// Every address named by `X-Forwarded-For` (all hops) and `X-Real-IP`.
pub fn forwarded_addresses(headers: &HeaderMap) -> Vec<String> {
    [FORWARDED_FOR, REAL_IP]
        .iter()
        .filter_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

/// Salted SHA-256 of `identifier`, hex encoded, for logs that must not
/// carry client addresses.
pub fn hash_identifier(identifier: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identifier);
    hasher.update(salt);
    format!("{:x}", hasher.finalize())
}
