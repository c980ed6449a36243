// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Gate Service
//!
//! Accepts contact form submissions on `POST /api/contact`, rate limited
//! per client and validated before they are logged.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `APP_ENV`: `development` logs full submissions (default: production)
//! - `LOG_SALT`: Salt for hashing client addresses in production logs
//! - `RATE_LIMIT_MAX`: Submissions per client per window (default: 3)
//! - `RATE_LIMIT_WINDOW_SECS`: Window length in seconds (default: 600)
//! - `BLOCKED_IPS`: Comma-separated client addresses to refuse
//! - `BLOCK_SUSPICIOUS_AGENTS`: Refuse scripted user agents (default: true)
//! - `METRICS_ENABLED` / `METRICS_PATH`: Prometheus endpoint (default: true, /metrics)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_gate::{config::Config, handlers::AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        environment = ?config.environment,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        blocked_ips = config.guard.blocked_ips.len(),
        "Starting contact gate"
    );

    let addr: SocketAddr = config.bind_addr.parse()?;
    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
