//! Property Management - API Server Binary
//!
//! This binary starts the HTTP API server over an in-memory store.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin propmanage-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_SEED_DEMO_DATA=true cargo run --bin propmanage-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_CURRENCY` - Currency code for all amounts (default: CNY)
//! * `API_WATER_RATE` / `API_ELEC_RATE` - Unit prices (default: 5.00 / 1.00)
//! * `API_BILL_DUE_DAY` - Day of the month bills fall due (default: 15)
//! * `API_METER_BASELINE` - First-bill opening readings, `room` or `zero` (default: room)
//! * `API_TIMEZONE` - IANA timezone for "today" (default: UTC)
//! * `API_SEED_DEMO_DATA` - Load demo data on startup (default: false)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app_services::{PropertyService, Session};
use core_kernel::SystemClock;
use infra_store::PropertyStore;
use interface_api::{create_router, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("loading API_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        currency = %config.currency,
        "Starting property management API server"
    );

    let settings = config.billing_settings().context("invalid billing settings")?;
    let clock = Arc::new(SystemClock::new(config.timezone));
    let service = PropertyService::new(PropertyStore::new(), clock, settings);
    tracing::info!(
        water_rate = %service.settings().rates.water,
        elec_rate = %service.settings().rates.elec,
        due_day = service.settings().due_policy.due_day(),
        baseline = ?service.settings().default_baseline,
        "Billing settings loaded"
    );

    if config.seed_demo_data {
        if let Some(summary) = service.seed_demo_data(&Session::Landlord).await? {
            tracing::info!(?summary, "Demo data seeded");
        }
    }

    let app = create_router(service, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
