// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Ingress guard applied in front of every route.
//!
//! - Refuses clients on the configured block list, matching the socket peer
//!   and every address the proxy headers name
//! - Refuses scripted user agents on `/api/*`, except known search and
//!   link-preview crawlers
//! - Enforces `POST`/`OPTIONS` on the contact endpoint
//! - Stamps request-id and framing headers on everything it lets through

use crate::handlers::{AppState, CONTACT_PATH};
use crate::identity::{forwarded_addresses, resolve_client_identifier};
use crate::metrics::rejection;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const SUSPICIOUS_AGENTS: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "scraper",
    "curl",
    "wget",
    "python",
    "java",
    "go-http-client",
];

const ALLOWED_AGENTS: &[&str] = &[
    "googlebot",
    "bingbot",
    "slurp",
    "duckduckbot",
    "facebookexternalhit",
    "twitterbot",
    "linkedinbot",
    "whatsapp",
];

const REQUEST_ID: &str = "x-request-id";
const RESPONSE_TIME: &str = "x-response-time";
const ROBOTS_TAG: &str = "x-robots-tag";

/// Whether `user_agent` looks scripted and is not an allowed crawler.
pub fn is_suspicious_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    SUSPICIOUS_AGENTS.iter().any(|p| ua.contains(p)) && !ALLOWED_AGENTS.iter().any(|p| ua.contains(p))
}

/// Guard middleware.
pub async fn guard(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let client = resolve_client_identifier(request.headers());
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let blocked = &state.config.guard.blocked_ips;
    let blocked_address = peer
        .iter()
        .cloned()
        .chain(forwarded_addresses(request.headers()))
        .chain(std::iter::once(client.clone()))
        .find(|addr| blocked.contains(addr));
    if let Some(addr) = blocked_address {
        warn!(client = %client, address = %addr, path = %path, "Blocked client refused");
        state.metrics.record_rejection(rejection::BLOCKED_IP);
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    let is_api = path.starts_with("/api/");
    if is_api && state.config.guard.block_suspicious_agents {
        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if is_suspicious_agent(user_agent) {
            warn!(client = %client, user_agent, "Blocked suspicious user agent");
            state.metrics.record_rejection(rejection::SUSPICIOUS_AGENT);
            return (
                StatusCode::FORBIDDEN,
                [(ROBOTS_TAG, "noindex, nofollow")],
                "Forbidden",
            )
                .into_response();
        }
    }

    let method = request.method();
    if path == CONTACT_PATH && method != Method::POST && method != Method::OPTIONS {
        debug!(method = %request.method(), "Method not allowed on contact endpoint");
        state.metrics.record_rejection(rejection::METHOD_NOT_ALLOWED);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "POST, OPTIONS")],
            "Method Not Allowed",
        )
            .into_response();
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    if let Ok(id) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
        headers.insert(REQUEST_ID, id);
    }
    headers.insert(
        RESPONSE_TIME,
        HeaderValue::from(chrono::Utc::now().timestamp_millis()),
    );
    if path.starts_with("/api") {
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    }

    response
}
