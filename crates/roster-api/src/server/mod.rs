//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use roster_clients::{BlizzardClient, RaiderIoClient};
use roster_common::{AppConfig, AppError};
use roster_db::{
    create_pool, run_migrations, PgCharacterRepository, PgGuildRepository, PgMembershipRepository,
    PgPool, PgUserRepository, PoolConfig,
};
use roster_service::{ServiceContext, ServiceContextBuilder, SyncSettings};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes get the base stack only so they are never rate limited.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Wire repositories and outbound clients into a service context
pub fn build_service_context(config: &AppConfig, pool: &PgPool) -> Result<ServiceContext, AppError> {
    let blizzard = BlizzardClient::from_config(&config.blizzard, &config.sync)
        .map_err(|e| AppError::Config(format!("Blizzard client: {e}")))?;
    let raiderio = RaiderIoClient::from_config(&config.raiderio, &config.sync)
        .map_err(|e| AppError::Config(format!("Raider.IO client: {e}")))?;
    let blizzard = Arc::new(blizzard);

    ServiceContextBuilder::new()
        .guild_repo(Arc::new(PgGuildRepository::new(pool.clone())))
        .character_repo(Arc::new(PgCharacterRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .membership_repo(Arc::new(PgMembershipRepository::new(pool.clone())))
        .roster_source(blizzard.clone())
        .profile_source(blizzard)
        .character_lookup(Arc::new(raiderio))
        .sync_settings(SyncSettings::from(&config.sync))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool, &config.database.migrations_dir)
        .await
        .map_err(|e| AppError::Database(format!("Migrations failed: {e}")))?;
    info!(dir = %config.database.migrations_dir, "Migrations applied");

    let service_context = build_service_context(&config, &pool)?;

    Ok(AppState::new(service_context, config, pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
