//! Waystone - invite-to-redirect relay for Bedrock servers
//!
//! Watches chat messages for invite requests, sends the player an invite,
//! and when that player later joins the lobby server, redirects them to the
//! target server exactly once.

mod common;
mod config;
mod dispatch;
mod http;
mod relay;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use config::{env::check_empty_env_vars, env::get_config_path, load_and_validate};
use relay::{spawn_expiry_sweeper, Coordinator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Waystone v{} starting...", env!("CARGO_PKG_VERSION"));

    for var in check_empty_env_vars() {
        warn!("{} is set but empty and will be used as-is", var);
    }

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} exists and is properly formatted.", config_path);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Listen: {}", config.server.listen);
    info!("  Redirect target: {}", config.target_endpoint());
    info!("  Invite TTL: {}s (sweep every {}s)", config.invites.ttl_secs, config.invites.sweep_interval_secs);
    info!("  Triggers: {:?}", config.invites.triggers);

    let listen: SocketAddr = config
        .server
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.server.listen))?;

    let coordinator = Arc::new(Coordinator::from_config(&config)?);

    // ============================================================
    // Background expiry sweep
    // ============================================================
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = spawn_expiry_sweeper(coordinator.clone(), config.sweep_interval(), shutdown_rx.clone());

    // ============================================================
    // Serve until Ctrl+C / SIGTERM
    // ============================================================
    let server_shutdown = {
        let mut shutdown_rx = shutdown_rx;
        async move {
            while !*shutdown_rx.borrow() {
                if shutdown_rx.changed().await.is_err() {
                    break;
                }
            }
        }
    };
    let mut server = tokio::spawn(http::serve(listen, coordinator.clone(), server_shutdown));

    let result = tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received - stopping...");
            Ok(())
        }
        joined = &mut server => match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e),
            Err(e) => Err(e.into()),
        },
    };

    if let Err(e) = shutdown_tx.send(true) {
        debug!("Shutdown channel closed: {}", e);
    }

    let timeout = tokio::time::Duration::from_secs(5);
    if !server.is_finished() {
        match tokio::time::timeout(timeout, server).await {
            Ok(Ok(Ok(()))) => info!("HTTP API stopped"),
            Ok(Ok(Err(e))) => warn!("HTTP API stopped with error: {}", e),
            Ok(Err(e)) => warn!("HTTP API task panicked: {}", e),
            Err(_) => warn!("HTTP API shutdown timed out"),
        }
    }
    if let Err(e) = sweeper.await {
        warn!("Expiry sweeper task panicked: {}", e);
    }

    let abandoned = coordinator.list_pending().len();
    if abandoned > 0 {
        info!("Discarding {} pending invite(s)", abandoned);
    }

    info!("Exiting...");
    result
}

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
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
