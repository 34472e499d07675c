//! Guild handlers
//!
//! Registration, lookup and external links for tracked guilds.

use axum::{extract::State, Json};
use roster_service::dto::{
    GuildResponse, RegisterGuildRequest, RegisteredGuildResponse, UpdateGuildLinksRequest,
};
use roster_service::GuildService;

use crate::extractors::{AuthUser, GuildIdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a guild and run its first roster sync
///
/// POST /guilds
pub async fn register_guild(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<RegisterGuildRequest>,
) -> ApiResult<Created<Json<RegisteredGuildResponse>>> {
    let service = GuildService::new(state.service_context());
    let response = service.register_guild(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List tracked guilds
///
/// GET /guilds?limit=&offset=
pub async fn list_guilds(
    State(state): State<AppState>,
    _auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<GuildResponse>>> {
    let service = GuildService::new(state.service_context());
    let response = service
        .list_guilds(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(response))
}

/// Get guild by ID
///
/// GET /guilds/{guild_id}
pub async fn get_guild(
    State(state): State<AppState>,
    _auth: AuthUser,
    GuildIdPath(guild_id): GuildIdPath,
) -> ApiResult<Json<GuildResponse>> {
    let service = GuildService::new(state.service_context());
    Ok(Json(service.get_guild(guild_id).await?))
}

/// Link or unlink the Warcraft Logs guild id
///
/// PATCH /guilds/{guild_id}/links
pub async fn update_links(
    State(state): State<AppState>,
    auth: AuthUser,
    GuildIdPath(guild_id): GuildIdPath,
    ValidatedJson(request): ValidatedJson<UpdateGuildLinksRequest>,
) -> ApiResult<Json<GuildResponse>> {
    let service = GuildService::new(state.service_context());
    let response = service
        .link_warcraft_logs(guild_id, auth.user_id, request.wcl_guild_id)
        .await?;
    Ok(Json(response))
}
