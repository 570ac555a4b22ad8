mod api;
mod config;

use adminkit::auth::AuthService;
use adminkit::sim::Simulator;
use adminkit::storage::open_storage;
use adminkit::{Store, StoreHandle};
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "admin-api")]
#[command(about = "Mock admin-panel backend with simulated live-metric panels")]
struct Args {
    #[arg(short, long, default_value = "config/admin-api.yaml")]
    config: String,

    #[arg(short, long, env = "ADMIN_API_PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = config::load_config(&args.config)?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "admin_api={level},adminkit={level},tower_http=debug",
                    level = config.observability.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting admin-api on port {}", args.port);

    let storage = open_storage(&config.storage)?;
    let auth = Arc::new(AuthService::new(storage));
    let store = StoreHandle::new(Store::default(), config.store.clone());

    match store.restore_session(&auth).await {
        Ok(true) => {}
        Ok(false) => info!("No stored session"),
        Err(e) => warn!("Could not restore session: {}", e),
    }

    // Initial page loads run in the background so the lists are observably
    // pending for the configured delay.
    let loader = store.clone();
    tokio::spawn(async move {
        loader.load_all().await;
        info!("Initial data loaded");
    });

    let simulator = Arc::new(Simulator::new(store.clone(), config.simulation.clone()));
    for id in &config.simulation.autostart {
        simulator.mount(*id);
    }

    let state = api::AppState {
        store,
        simulator: simulator.clone(),
        auth,
    };
    api::start_server(state, args.port).await?;

    simulator.shutdown();
    info!("admin-api stopped");
    Ok(())
}
