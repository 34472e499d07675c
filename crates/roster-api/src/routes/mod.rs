//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{claim, guilds, health, roster, sync, users};
use crate::state::AppState;

/// Create the main API router (health probes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(user_routes()).merge(guild_routes())
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/@me", get(users::get_current_user))
}

/// Guild routes
fn guild_routes() -> Router<AppState> {
    Router::new()
        .route("/guilds", post(guilds::register_guild).get(guilds::list_guilds))
        .route("/guilds/:guild_id", get(guilds::get_guild))
        .route("/guilds/:guild_id/links", patch(guilds::update_links))
        .route("/guilds/:guild_id/sync", post(sync::sync_guild))
        // Roster
        .route("/guilds/:guild_id/characters", get(roster::list_characters))
        .route("/guilds/:guild_id/members", get(roster::list_members))
        .route("/guilds/:guild_id/claim", post(claim::claim_characters))
}
