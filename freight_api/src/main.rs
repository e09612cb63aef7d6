mod docs;
mod error;
mod locations;
mod page;
mod routes;
mod sessions;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::serve;
use freight_estimator::{config::FreightConfig, estimator::Estimator};
use freight_routing::ors_api::OrsDirectionsClient;
use tracing::{Level, info};

use crate::{
    routes::app,
    state::{AppState, SessionStore},
};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = FreightConfig::from_env()?;
    let gazetteer = config
        .load_gazetteer()
        .context("Failed to load the gazetteer")?;
    info!("Loaded {} locations", gazetteer.locations().len());

    let client = OrsDirectionsClient::new(config.ors_params())?;
    let bind_address = config.bind_address.clone();

    let state = Arc::new(AppState {
        sessions: SessionStore::new(config.session_ttl),
        estimator: Estimator::new(gazetteer, client),
        config,
    });

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Listening on http://{}", bind_address);

    serve(listener, app(state)).await?;

    Ok(())
}
