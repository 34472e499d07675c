//! Roster queries for guild members

use tracing::instrument;
use uuid::Uuid;

use roster_core::DomainError;

use crate::dto::{CharacterResponse, MembershipResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::membership::MembershipService;

/// Roster service
pub struct RosterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RosterService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Stored characters of a guild, visible to its members
    #[instrument(skip(self))]
    pub async fn list_characters(
        &self,
        guild_id: Uuid,
        actor_id: Uuid,
    ) -> ServiceResult<Vec<CharacterResponse>> {
        self.require_visible(guild_id, actor_id).await?;

        let placeholder_id = self.ctx.placeholder_id().await?;
        let characters = self.ctx.character_repo().list_by_guild(guild_id).await?;

        Ok(characters
            .iter()
            .map(|c| CharacterResponse::from_character(c, placeholder_id))
            .collect())
    }

    /// Memberships of a guild with their derived roles
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        guild_id: Uuid,
        actor_id: Uuid,
    ) -> ServiceResult<Vec<MembershipResponse>> {
        self.require_visible(guild_id, actor_id).await?;

        let memberships = self.ctx.membership_repo().list_by_guild(guild_id).await?;

        Ok(memberships.iter().map(MembershipResponse::from).collect())
    }

    async fn require_visible(&self, guild_id: Uuid, actor_id: Uuid) -> ServiceResult<()> {
        if self.ctx.guild_repo().find_by_id(guild_id).await?.is_none() {
            return Err(DomainError::GuildNotFound(guild_id).into());
        }

        MembershipService::new(self.ctx)
            .require_member(guild_id, actor_id)
            .await?;

        Ok(())
    }
}
