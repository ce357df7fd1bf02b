use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dealpulse_api::config::ServerConfig;
use dealpulse_api::router::build_app_router;
use dealpulse_api::state::AppState;
use dealpulse_integrations::{IntegrationConfig, IntegrationService};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dealpulse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Record store ---
    let pool = if config.seed_sample_data {
        dealpulse_db::create_seeded_pool().await
    } else {
        dealpulse_db::create_pool()
    };
    let counts = pool.counts().await;
    tracing::info!(leads = counts.leads, deals = counts.deals, "Record store ready");

    // --- Integrations ---
    let integration_config = IntegrationConfig::from_env();
    let integration_availability = integration_config.availability();
    let integrations = IntegrationService::from_config(&integration_config).map(Arc::new);
    if integrations.is_none() {
        tracing::warn!(
            hubspot = integration_availability.hubspot,
            gong = integration_availability.gong,
            openai = integration_availability.openai,
            "Integration credentials incomplete, integration routes disabled"
        );
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        integrations,
        integration_availability,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Force an exit if draining outlives the shutdown timeout.
            tokio::spawn(async move {
                tokio::time::sleep(drain_timeout).await;
                tracing::warn!(
                    timeout_secs = drain_timeout.as_secs(),
                    "Graceful shutdown timed out, exiting"
                );
                std::process::exit(1);
            });
        })
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
