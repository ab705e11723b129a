//! # nilanhubd
//!
//! Composition root that wires the simulated Nilan controller, the sensor
//! platform, the entity registry and the HTTP API together.
//!
//! ## Responsibilities
//! - Load configuration (`nilanhub.toml`, env vars)
//! - Initialise tracing
//! - Set up the sensor platform against the device handle
//! - Start the update scheduler
//! - Bind to a TCP port and serve until SIGTERM/SIGINT
//!
//! No domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use nilan_adapter_http_axum::state::AppState;
use nilan_adapter_simulated::SimulatedDevice;
use nilan_app::event_bus::InProcessEventBus;
use nilan_app::sensor_platform;
use nilan_app::services::entity_registry::EntityRegistry;
use nilan_app::services::update_scheduler::UpdateScheduler;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    // Device
    let device = Arc::new(SimulatedDevice::new(config.device.clone()));
    tracing::info!(device = device.name(), "device handle ready");

    // Host
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let events = tokio::spawn(log_events(event_bus.subscribe()));
    let registry = Arc::new(EntityRegistry::new(Arc::clone(&event_bus)));

    let registration = sensor_platform::setup_entry(Arc::clone(&device), registry.as_ref())
        .await
        .context("failed to set up sensor platform")?;
    if registration.rejected.is_empty() && registration.lost == 0 {
        tracing::info!(added = registration.added, "sensor platform ready");
    } else {
        tracing::warn!(
            added = registration.added,
            rejected = registration.rejected.len(),
            lost = registration.lost,
            "sensor platform ready, some sensors were not registered"
        );
    }

    let scheduler = UpdateScheduler::start(Arc::clone(&registry), config.scan_interval())
        .context("failed to start update scheduler")?;

    // HTTP
    let app = nilan_adapter_http_axum::router::build(AppState::new(registry));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "nilanhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    scheduler.abort();
    events.abort();
    tracing::info!("nilanhubd stopped");
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn log_events(mut rx: broadcast::Receiver<nilan_domain::event::Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => tracing::debug!(
                event_type = ?event.event_type,
                unique_id = %event.unique_id,
                data = %event.data,
                "event"
            ),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event log lagging behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
