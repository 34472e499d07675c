//! Roster reconciliation
//!
//! Pulls the authoritative member list for a guild, enriches each member
//! from the profile and secondary lookups, upserts the characters, and
//! propagates guild roles onto the memberships of real owners.

use std::collections::BTreeSet;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use roster_core::{
    resolve_enrichment, CharacterKey, CharacterUpsert, DomainError, Guild, RosterMember,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::membership::MembershipService;

/// What started a reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// Requested by a user, who must be a GM or officer of the guild
    Manual { actor_id: Uuid },
    /// First sync right after the guild was registered
    GuildCreated,
}

/// Outcome counts of one reconciliation run
///
/// `synced + failed == total`, where `total` counts the members that passed
/// the level filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub synced: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberOutcome {
    Synced,
    Failed,
}

/// Result of one member: its outcome and the real owner of the stored row
#[derive(Debug, Clone, Copy)]
struct MemberResult {
    outcome: MemberOutcome,
    owner_id: Option<Uuid>,
}

/// Reconciliation service
pub struct ReconcileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReconcileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reconcile the stored roster of a guild with the roster source
    ///
    /// Access is checked before any external call. A roster fetch failure
    /// aborts the run before anything is written. Per-member enrichment or
    /// upsert failures are counted in the summary, never returned.
    ///
    /// Roles are recomputed once per real owner after every batch has
    /// settled, so members of one user stored concurrently cannot race on
    /// the membership row.
    #[instrument(skip(self), fields(guild_id = %guild_id))]
    pub async fn sync_guild(
        &self,
        guild_id: Uuid,
        trigger: SyncTrigger,
    ) -> ServiceResult<SyncSummary> {
        let guild = self
            .ctx
            .guild_repo()
            .find_by_id(guild_id)
            .await?
            .ok_or(DomainError::GuildNotFound(guild_id))?;

        if let SyncTrigger::Manual { actor_id } = trigger {
            MembershipService::new(self.ctx)
                .require_officer(guild_id, actor_id)
                .await?;
        }

        let roster = self
            .ctx
            .roster_source()
            .get_roster(guild.region, &guild.realm_slug, &guild.slug)
            .await
            .map_err(|e| {
                warn!(error = %e, "Roster fetch failed, aborting sync");
                DomainError::RosterUnavailable(e.to_string())
            })?;

        let settings = self.ctx.sync_settings();
        let members: Vec<RosterMember> = roster
            .members
            .into_iter()
            .filter(|m| m.level >= settings.min_level)
            .collect();

        let placeholder_id = self.ctx.placeholder_id().await?;

        let mut summary = SyncSummary {
            total: members.len(),
            ..SyncSummary::default()
        };

        let mut owners = BTreeSet::new();

        for (index, batch) in members.chunks(settings.batch_size.max(1)).enumerate() {
            debug!(batch = index, size = batch.len(), "Reconciling batch");

            let results = join_all(
                batch
                    .iter()
                    .map(|member| self.sync_member(&guild, member, placeholder_id)),
            )
            .await;

            for result in results {
                match result.outcome {
                    MemberOutcome::Synced => summary.synced += 1,
                    MemberOutcome::Failed => summary.failed += 1,
                }
                owners.extend(result.owner_id);
            }
        }

        self.propagate_roles(guild_id, &owners).await;

        self.ctx.guild_repo().mark_synced(guild_id, Utc::now()).await?;

        info!(
            guild = %guild.name,
            synced = summary.synced,
            failed = summary.failed,
            total = summary.total,
            "Roster sync finished"
        );

        Ok(summary)
    }

    /// Recompute the membership role of every real owner seen in the run
    ///
    /// A failure is logged and does not change the summary counts.
    async fn propagate_roles(&self, guild_id: Uuid, owners: &BTreeSet<Uuid>) {
        let memberships = MembershipService::new(self.ctx);
        for &owner_id in owners {
            if let Err(e) = memberships.recompute_role(guild_id, owner_id).await {
                warn!(error = %e, user_id = %owner_id, "Membership role update failed");
            }
        }
    }

    /// Enrich and store one roster member; never returns an error
    #[instrument(skip(self, guild, member), fields(character = %member.name, realm = %member.realm))]
    async fn sync_member(
        &self,
        guild: &Guild,
        member: &RosterMember,
        placeholder_id: Uuid,
    ) -> MemberResult {
        let (profile, summary) = tokio::join!(
            self.ctx
                .profile_source()
                .get_profile(guild.region, &member.realm, &member.name, None),
            self.ctx
                .character_lookup()
                .get_avatar_and_spec(guild.region, &member.realm, &member.name),
        );

        let mut enrichment_failed = false;

        let profile = profile
            .map_err(|e| {
                debug!(error = %e, "Profile lookup failed");
                enrichment_failed = true;
            })
            .ok();

        let summary = summary
            .map_err(|e| {
                debug!(error = %e, "Secondary lookup failed");
                enrichment_failed = true;
            })
            .ok()
            .flatten();

        let enrichment = resolve_enrichment(member, profile.as_ref(), summary.as_ref());

        let upsert = CharacterUpsert {
            guild_id: guild.id,
            key: CharacterKey::new(member.name.as_str(), member.realm.as_str(), guild.region),
            class: enrichment.known_class().map(str::to_string),
            spec: enrichment.spec.value,
            role: enrichment.role,
            item_level: enrichment.item_level.map(|r| r.value),
            level: member.level,
            guild_rank: member.rank,
            avatar_url: enrichment.avatar_url,
            default_owner: placeholder_id,
        };

        let character = match self.ctx.character_repo().upsert(&upsert).await {
            Ok(character) => character,
            Err(e) => {
                warn!(error = %e, "Character upsert failed");
                return MemberResult {
                    outcome: MemberOutcome::Failed,
                    owner_id: None,
                };
            }
        };

        let owner_id = character
            .user_id
            .filter(|_| character.has_real_owner(placeholder_id));

        let outcome = if enrichment_failed {
            MemberOutcome::Failed
        } else {
            MemberOutcome::Synced
        };

        MemberResult { outcome, owner_id }
    }
}
