//! Catalog API - REST server for the marketplace product catalog

use axum_helpers::server::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");

    let db = database::postgres::connect_from_config_with_retry(config.postgres.clone(), None)
        .await?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "catalog-api").await?;

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build REST router
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes);
    let app = router.merge(api::health::router(state.clone()));

    info!("Starting Catalog API on port {}", config.server.port);

    // Run server with graceful shutdown
    create_app(app, &config.server).await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
