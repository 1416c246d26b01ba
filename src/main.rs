//! Contractor billing HTTP server.
//!
//! Reads `engine.yaml` from `BILLING_CONFIG_DIR` (default `./config/billing`)
//! and serves the billing API over an in-memory record store.

use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use contractor_billing::api::{AppState, create_router};
use contractor_billing::config::ConfigLoader;
use contractor_billing::service::BillingService;
use contractor_billing::store::InMemoryStore;

const DEFAULT_CONFIG_DIR: &str = "./config/billing";

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir = env::var("BILLING_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?.into_config();
    info!(
        config_dir = %config_dir,
        workday_hours = %config.workday_hours,
        round_client_charge = config.rounding.round_client_charge,
        "Configuration loaded"
    );

    let service = BillingService::new(Arc::new(InMemoryStore::new()), config);
    let bind_address = service.config().server.bind_address.clone();
    let router = create_router(AppState::new(service));

    let listener = TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Contractor billing API listening");
    axum::serve(listener, router).await?;

    Ok(())
}
