//! Character claiming
//!
//! Moves placeholder-owned characters to the real user whose linked
//! account lists them, then derives that user's guild role.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use roster_core::{Character, DomainError, Guild, LinkedCharacter, User};

use crate::dto::{ClaimResponse, ClaimSource};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::membership::MembershipService;

/// Claim service
pub struct ClaimService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClaimService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Claim from whichever source the request names
    pub async fn claim(
        &self,
        user_id: Uuid,
        guild_id: Uuid,
        source: ClaimSource,
    ) -> ServiceResult<ClaimResponse> {
        match source {
            ClaimSource::Linked(linked) => self.claim_characters(user_id, guild_id, &linked).await,
            ClaimSource::BattleNet { user_token } => {
                self.claim_from_battlenet(user_id, guild_id, &user_token)
                    .await
            }
        }
    }

    /// Claim every guild character matching a linked (name, realm) pair
    ///
    /// Matching is exact and case-insensitive. Only unowned or
    /// placeholder-owned characters move; a character held by another real
    /// user is left alone. The user's membership role is then recomputed
    /// from the lowest rank across all of their characters in the guild.
    #[instrument(skip(self, linked), fields(linked = linked.len()))]
    pub async fn claim_characters(
        &self,
        user_id: Uuid,
        guild_id: Uuid,
        linked: &[LinkedCharacter],
    ) -> ServiceResult<ClaimResponse> {
        self.require_claimant(user_id).await?;
        self.require_guild(guild_id).await?;

        let nothing = ClaimResponse {
            claimed: 0,
            role: None,
        };

        if linked.is_empty() {
            return Ok(nothing);
        }

        let placeholder_id = self.ctx.placeholder_id().await?;

        let candidates = self
            .ctx
            .character_repo()
            .find_claimable(guild_id, placeholder_id, linked)
            .await?;

        let eligible: Vec<Uuid> = candidates
            .iter()
            .filter(|c| is_eligible(c, user_id, placeholder_id, linked))
            .map(|c| c.id)
            .collect();

        if eligible.is_empty() {
            return Ok(nothing);
        }

        let claimed = self
            .ctx
            .character_repo()
            .reassign_owner(&eligible, user_id, placeholder_id)
            .await?;

        if claimed == 0 {
            return Ok(nothing);
        }

        let role = MembershipService::new(self.ctx)
            .recompute_role(guild_id, user_id)
            .await?;

        info!(
            user_id = %user_id,
            guild_id = %guild_id,
            claimed,
            role = ?role,
            "Characters claimed"
        );

        Ok(ClaimResponse { claimed, role })
    }

    /// Claim using the characters on the account behind a Battle.net token
    #[instrument(skip(self, user_token))]
    pub async fn claim_from_battlenet(
        &self,
        user_id: Uuid,
        guild_id: Uuid,
        user_token: &str,
    ) -> ServiceResult<ClaimResponse> {
        self.require_claimant(user_id).await?;
        let guild = self.require_guild(guild_id).await?;

        let linked = self
            .ctx
            .profile_source()
            .get_account_characters(guild.region, user_token)
            .await
            .map_err(|e| {
                warn!(error = %e, "Account character lookup failed");
                DomainError::AccountUnavailable(e.to_string())
            })?;

        self.claim_characters(user_id, guild_id, &linked).await
    }

    async fn require_claimant(&self, user_id: Uuid) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if user.is_placeholder {
            return Err(DomainError::PlaceholderAccount.into());
        }

        Ok(user)
    }

    async fn require_guild(&self, guild_id: Uuid) -> ServiceResult<Guild> {
        Ok(self
            .ctx
            .guild_repo()
            .find_by_id(guild_id)
            .await?
            .ok_or(DomainError::GuildNotFound(guild_id))?)
    }
}

/// Re-check a storage match before moving ownership
fn is_eligible(
    character: &Character,
    user_id: Uuid,
    placeholder_id: Uuid,
    linked: &[LinkedCharacter],
) -> bool {
    let key = character.key();
    if !linked.iter().any(|l| key.matches(&l.name, &l.realm)) {
        warn!(character_id = %character.id, "Storage match does not fit any linked character");
        return false;
    }

    if !character.is_claimable_by(user_id, placeholder_id) {
        warn!(
            character_id = %character.id,
            owner_id = ?character.user_id,
            "Skipping character owned by another user"
        );
        return false;
    }

    true
}
