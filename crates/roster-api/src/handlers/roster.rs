//! Roster read handlers

use axum::{extract::State, Json};
use roster_service::dto::{CharacterResponse, MembershipResponse};
use roster_service::RosterService;

use crate::extractors::{AuthUser, GuildIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /guilds/{guild_id}/characters
pub async fn list_characters(
    State(state): State<AppState>,
    auth: AuthUser,
    GuildIdPath(guild_id): GuildIdPath,
) -> ApiResult<Json<Vec<CharacterResponse>>> {
    let service = RosterService::new(state.service_context());
    Ok(Json(service.list_characters(guild_id, auth.user_id).await?))
}

/// GET /guilds/{guild_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    GuildIdPath(guild_id): GuildIdPath,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let service = RosterService::new(state.service_context());
    Ok(Json(service.list_members(guild_id, auth.user_id).await?))
}
