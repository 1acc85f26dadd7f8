//! ==============================================================================
//! main.rs - sensor simulator entry point
//! ==============================================================================
//!
//! purpose:
//!     stands in for a small environmental sensor device (temperature,
//!     humidity, vibration) behind http, so monitoring and ingestion clients
//!     can be exercised without hardware. values are plausible and bounded;
//!     single sensors drop out now and then, and sometimes the whole device
//!     fails for a tick.
//!
//! relationships:
//!     - config.rs: simulator.toml + PORT / SIMULATOR_ID
//!     - simulator.rs: update loop (writes the store once per tick)
//!     - store.rs: the shared snapshot
//!     - api.rs: http handlers (read the store, consult gate.rs)
//!
//! architecture:
//!
//!     ┌──────────────────────────────────────────────────────────┐
//!     │                     sensor-sim process                   │
//!     │  ┌──────────────┐                 ┌────────────────────┐ │
//!     │  │ update loop  │   publish()     │    sensor store    │ │
//!     │  │ (1s tick)    │ ──────────────> │ Arc<DeviceState>   │ │
//!     │  └──────────────┘                 └─────────┬──────────┘ │
//!     │                                     current()│           │
//!     │                                   ┌─────────┴──────────┐ │
//!     │   http request ─────────────────> │ axum handlers      │ │
//!     │                                   │ method -> gate ->  │ │
//!     │                                   │ json               │ │
//!     │                                   └────────────────────┘ │
//!     └──────────────────────────────────────────────────────────┘
//!
//! ==============================================================================

mod api;
mod config;
mod domain;
mod error;
mod gate;
mod simulator;
mod store;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // step 1: load configuration, then logging at the configured level
    let config = config::SimulatorConfig::load_or_default();
    init_logging(&config.logging.level);
    config.print_summary();

    // step 2: identity and the process-wide generator
    let identity = Arc::new(domain::SimulatorIdentity::new(config.simulator.id.clone()));
    let mut rng = simulator::seeded_rng();

    // step 3: shared state, starting with every sensor reporting
    let store = Arc::new(store::SensorStore::new(simulator::initial_state(&mut rng)));

    // step 4: update loop runs for the life of the process
    tokio::spawn(simulator::run_update_loop(
        store.clone(),
        rng,
        simulator::FailureModel::default(),
        config.tick_interval(),
        config.logging.show_sensor_data,
    ));

    // step 5: http facade
    let app = api::router(api::AppContext {
        store,
        identity: identity.clone(),
        port: config.server.port.clone(),
    });

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        "[STARTUP] Server starting on port {} with ID: {}",
        config.server.port,
        identity.id
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    tracing::info!("[SHUTDOWN] Server stopped");
    Ok(())
}

/// RUST_LOG wins; otherwise the configured level for this crate and tower_http
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("sensor_sim={level},tower_http={level}").into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[SHUTDOWN] Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("[SHUTDOWN] Ctrl-C received");
}
