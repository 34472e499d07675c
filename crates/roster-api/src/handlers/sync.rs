//! Roster sync handler

use axum::{extract::State, Json};
use roster_service::{ReconcileService, SyncSummary, SyncTrigger};

use crate::extractors::{AuthUser, GuildIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Reconcile the guild's stored roster with the live roster
///
/// POST /guilds/{guild_id}/sync
pub async fn sync_guild(
    State(state): State<AppState>,
    auth: AuthUser,
    GuildIdPath(guild_id): GuildIdPath,
) -> ApiResult<Json<SyncSummary>> {
    let summary = ReconcileService::new(state.service_context())
        .sync_guild(
            guild_id,
            SyncTrigger::Manual {
                actor_id: auth.user_id,
            },
        )
        .await?;
    Ok(Json(summary))
}
