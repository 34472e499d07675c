//! Membership service
//!
//! Guild access checks and derivation of a user's guild role from the
//! characters they own.

use roster_core::{DomainError, GuildMembership, GuildRole};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Membership service for access control and role derivation
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Membership of the user in the guild, or `MembershipNotFound`
    #[instrument(skip(self))]
    pub async fn require_member(
        &self,
        guild_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<GuildMembership> {
        let membership = self
            .ctx
            .membership_repo()
            .find(guild_id, user_id)
            .await?
            .ok_or(DomainError::MembershipNotFound)?;

        Ok(membership)
    }

    /// Membership of a GM or officer, or `NotOfficer`
    #[instrument(skip(self))]
    pub async fn require_officer(
        &self,
        guild_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<GuildMembership> {
        let membership = self.require_member(guild_id, user_id).await?;

        if !membership.can_manage_roster() {
            debug!(role = %membership.role, "Officer role required");
            return Err(DomainError::NotOfficer.into());
        }

        Ok(membership)
    }

    /// Recompute the user's guild role from every character they own there
    ///
    /// The role is that of the lowest guild rank across the user's
    /// characters. The rank read and the membership write are separate
    /// calls, so callers must not run this concurrently for the same user.
    /// Returns `None` and leaves the membership untouched when the user owns
    /// no characters in the guild.
    #[instrument(skip(self))]
    pub async fn recompute_role(
        &self,
        guild_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<Option<GuildRole>> {
        let Some(rank) = self
            .ctx
            .character_repo()
            .min_rank_for_user(guild_id, user_id)
            .await?
        else {
            return Ok(None);
        };

        let role = GuildRole::from_guild_rank(rank);
        self.ctx
            .membership_repo()
            .upsert_role(guild_id, user_id, role)
            .await?;

        debug!(rank, %role, "Membership role recomputed");
        Ok(Some(role))
    }
}
