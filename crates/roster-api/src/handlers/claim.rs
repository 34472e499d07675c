//! Character claim handler

use axum::{extract::State, Json};
use roster_service::dto::{ClaimCharactersRequest, ClaimResponse};
use roster_service::ClaimService;

use crate::extractors::{AuthUser, GuildIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Claim the caller's characters in a guild
///
/// POST /guilds/{guild_id}/claim
///
/// The body carries either an explicit `characters` list or a
/// `battlenet_token` used to fetch the account's characters.
pub async fn claim_characters(
    State(state): State<AppState>,
    auth: AuthUser,
    GuildIdPath(guild_id): GuildIdPath,
    ValidatedJson(request): ValidatedJson<ClaimCharactersRequest>,
) -> ApiResult<Json<ClaimResponse>> {
    let source = request.into_source().map_err(ApiError::invalid_body)?;

    let response = ClaimService::new(state.service_context())
        .claim(auth.user_id, guild_id, source)
        .await?;
    Ok(Json(response))
}
