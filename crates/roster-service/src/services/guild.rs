//! Guild service
//!
//! Handles guild registration, external links, and queries.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use roster_core::{DomainError, Guild, GuildRole, Region};

use crate::dto::{GuildResponse, RegisterGuildRequest, RegisteredGuildResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::membership::MembershipService;
use super::reconcile::{ReconcileService, SyncTrigger};

const MAX_PAGE_SIZE: i64 = 100;

/// Role of the registering user until their own characters decide it
///
/// The lowest role that can still trigger a sync, so a guild whose first
/// sync failed is not left without anyone able to retry it. The first sync
/// or claim that finds characters owned by the creator replaces it with the
/// rank-derived role.
pub const BOOTSTRAP_ROLE: GuildRole = GuildRole::Officer;

/// Guild service
pub struct GuildService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuildService<'a> {
    /// Create a new GuildService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a guild and run the first sync
    ///
    /// The creator starts with [`BOOTSTRAP_ROLE`]. A failing first sync is
    /// logged and leaves the guild registered; the response then carries no
    /// summary.
    #[instrument(skip(self, request))]
    pub async fn register_guild(
        &self,
        actor_id: Uuid,
        request: RegisterGuildRequest,
    ) -> ServiceResult<RegisteredGuildResponse> {
        let region: Region = request
            .region
            .parse()
            .map_err(|_| DomainError::InvalidRegion(request.region.clone()))?;

        let realm = request.realm.trim();
        let name = request.name.trim();
        if realm.is_empty() || name.is_empty() {
            return Err(DomainError::InvalidGuildName(request.name.clone()).into());
        }

        let actor = self
            .ctx
            .user_repo()
            .find_by_id(actor_id)
            .await?
            .ok_or(DomainError::UserNotFound(actor_id))?;
        if actor.is_placeholder {
            return Err(DomainError::PlaceholderAccount.into());
        }

        let guild = Guild::new(region, realm.to_string(), name.to_string());
        if guild.slug.is_empty() {
            return Err(DomainError::InvalidGuildName(request.name.clone()).into());
        }

        if self
            .ctx
            .guild_repo()
            .find_by_identity(guild.region, &guild.realm_slug, &guild.slug)
            .await?
            .is_some()
        {
            return Err(DomainError::GuildAlreadyTracked.into());
        }

        self.ctx.guild_repo().create(&guild).await?;
        self.ctx
            .membership_repo()
            .upsert_role(guild.id, actor_id, BOOTSTRAP_ROLE)
            .await?;

        info!(guild_id = %guild.id, region = %guild.region, slug = %guild.slug, "Guild registered");

        let sync = match ReconcileService::new(self.ctx)
            .sync_guild(guild.id, SyncTrigger::GuildCreated)
            .await
        {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(guild_id = %guild.id, error = %e, "Initial roster sync failed");
                None
            }
        };

        // Pick up last_synced_at written by the sync
        let guild = self
            .ctx
            .guild_repo()
            .find_by_id(guild.id)
            .await?
            .unwrap_or(guild);

        Ok(RegisteredGuildResponse {
            guild: GuildResponse::from(&guild),
            sync,
        })
    }

    /// Link or unlink the Warcraft Logs guild (officers only)
    #[instrument(skip(self))]
    pub async fn link_warcraft_logs(
        &self,
        guild_id: Uuid,
        actor_id: Uuid,
        wcl_guild_id: Option<i64>,
    ) -> ServiceResult<GuildResponse> {
        let mut guild = self.get_guild_entity(guild_id).await?;

        MembershipService::new(self.ctx)
            .require_officer(guild_id, actor_id)
            .await?;

        self.ctx
            .guild_repo()
            .update_links(guild_id, wcl_guild_id)
            .await?;
        guild.set_wcl_guild_id(wcl_guild_id);

        info!(guild_id = %guild_id, wcl_guild_id = ?wcl_guild_id, "Guild links updated");

        Ok(GuildResponse::from(&guild))
    }

    /// Get guild by ID
    #[instrument(skip(self))]
    pub async fn get_guild(&self, guild_id: Uuid) -> ServiceResult<GuildResponse> {
        let guild = self.get_guild_entity(guild_id).await?;
        Ok(GuildResponse::from(&guild))
    }

    /// Get guild entity by ID
    #[instrument(skip(self))]
    pub async fn get_guild_entity(&self, guild_id: Uuid) -> ServiceResult<Guild> {
        Ok(self
            .ctx
            .guild_repo()
            .find_by_id(guild_id)
            .await?
            .ok_or(DomainError::GuildNotFound(guild_id))?)
    }

    /// List tracked guilds, newest first
    #[instrument(skip(self))]
    pub async fn list_guilds(&self, limit: i64, offset: i64) -> ServiceResult<Vec<GuildResponse>> {
        let guilds = self
            .ctx
            .guild_repo()
            .list(limit.clamp(1, MAX_PAGE_SIZE), offset.max(0))
            .await?;

        Ok(guilds.iter().map(GuildResponse::from).collect())
    }
}
