//! Hookline Server - webhook receiver for Resend and Stripe.
//!
//! This binary:
//! 1. Verifies inbound webhooks and answers the provider immediately
//! 2. Hands verified events to an in-process worker over a bounded queue
//! 3. Decodes them into typed payloads and logs the result

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hookline::{web, worker, AppState, Config, EventRouter, LogHandler, Publisher};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    let router = match &config.stripe_event_families {
        Some(families) => EventRouter::with_families(families),
        None => EventRouter::new(),
    };
    let families: Vec<&str> = router.families().map(|f| f.name()).collect();

    info!(
        port = config.port,
        resend_secret_configured = !config.resend_webhook_secret.is_empty(),
        stripe_secret_configured = !config.stripe_webhook_secret.is_empty(),
        resend_path = %config.resend_webhook_path,
        stripe_path = %config.stripe_webhook_path,
        tolerance_secs = config.signature_tolerance_secs,
        queue_capacity = config.queue_capacity,
        stripe_families = families.len(),
        stripe_family_names = %families.join(","),
        "config_loaded"
    );

    // Start the worker behind the in-process queue
    let (publisher, receiver) = Publisher::channel(config.queue_capacity);
    let worker = tokio::spawn(worker::run(
        receiver,
        Arc::new(router),
        Arc::new(LogHandler),
    ));

    // Create application state
    let port = config.port;
    let state = AppState::new(config, publisher).context("Failed to build webhook verifiers")?;
    let app = web::router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown; dropping the router drops the last
    // publisher, which lets the worker drain and exit
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    worker.await.context("Worker task failed")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
