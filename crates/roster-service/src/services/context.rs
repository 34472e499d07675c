//! Service context - dependency container for services
//!
//! Holds the repository ports, the external source ports, the sync
//! settings, and the shared placeholder-user handle.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;

use roster_common::SyncConfig;
use roster_core::{
    CharacterLookup, CharacterRepository, DomainError, GuildRepository, MembershipRepository,
    ProfileSource, RepoResult, RosterSource, UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Reconciliation tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    /// Roster members below this level are skipped
    pub min_level: i32,
    /// Members enriched concurrently; batches run one after another
    pub batch_size: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            min_level: 10,
            batch_size: 10,
        }
    }
}

impl From<&SyncConfig> for SyncSettings {
    fn from(config: &SyncConfig) -> Self {
        Self {
            min_level: config.min_level,
            batch_size: config.batch_size.max(1),
        }
    }
}

/// Lazily resolved id of the placeholder user
///
/// The first caller runs the storage-level get-or-create; concurrent callers
/// wait on the same initialization and every later call is served from memory.
#[derive(Debug, Default)]
pub struct PlaceholderUser {
    id: OnceCell<Uuid>,
}

impl PlaceholderUser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder user id, creating the row on first use
    pub async fn id(&self, users: &dyn UserRepository) -> RepoResult<Uuid> {
        self.id
            .get_or_try_init(|| async {
                let user = users.get_or_create_placeholder().await?;
                debug!(placeholder_id = %user.id, "Resolved placeholder user");
                Ok::<_, DomainError>(user.id)
            })
            .await
            .copied()
    }
}

/// Service context containing all dependencies
///
/// This is passed to all services and provides access to repositories,
/// external sources, and shared handles.
pub struct ServiceContext {
    // Repositories
    guild_repo: Arc<dyn GuildRepository>,
    character_repo: Arc<dyn CharacterRepository>,
    user_repo: Arc<dyn UserRepository>,
    membership_repo: Arc<dyn MembershipRepository>,

    // External sources
    roster_source: Arc<dyn RosterSource>,
    profile_source: Arc<dyn ProfileSource>,
    character_lookup: Arc<dyn CharacterLookup>,

    placeholder: PlaceholderUser,
    sync_settings: SyncSettings,
}

impl ServiceContext {
    /// Create a new ServiceContext
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        guild_repo: Arc<dyn GuildRepository>,
        character_repo: Arc<dyn CharacterRepository>,
        user_repo: Arc<dyn UserRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        roster_source: Arc<dyn RosterSource>,
        profile_source: Arc<dyn ProfileSource>,
        character_lookup: Arc<dyn CharacterLookup>,
        sync_settings: SyncSettings,
    ) -> Self {
        Self {
            guild_repo,
            character_repo,
            user_repo,
            membership_repo,
            roster_source,
            profile_source,
            character_lookup,
            placeholder: PlaceholderUser::new(),
            sync_settings,
        }
    }

    // ========================================================================
    // Repository accessors
    // ========================================================================

    pub fn guild_repo(&self) -> &dyn GuildRepository {
        self.guild_repo.as_ref()
    }

    pub fn character_repo(&self) -> &dyn CharacterRepository {
        self.character_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    // ========================================================================
    // External source accessors
    // ========================================================================

    pub fn roster_source(&self) -> &dyn RosterSource {
        self.roster_source.as_ref()
    }

    pub fn profile_source(&self) -> &dyn ProfileSource {
        self.profile_source.as_ref()
    }

    pub fn character_lookup(&self) -> &dyn CharacterLookup {
        self.character_lookup.as_ref()
    }

    // ========================================================================
    // Shared state
    // ========================================================================

    pub fn sync_settings(&self) -> SyncSettings {
        self.sync_settings
    }

    /// Id of the placeholder user that owns unclaimed characters
    pub async fn placeholder_id(&self) -> ServiceResult<Uuid> {
        Ok(self.placeholder.id(self.user_repo()).await?)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("placeholder", &self.placeholder)
            .field("sync_settings", &self.sync_settings)
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
pub struct ServiceContextBuilder {
    guild_repo: Option<Arc<dyn GuildRepository>>,
    character_repo: Option<Arc<dyn CharacterRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    roster_source: Option<Arc<dyn RosterSource>>,
    profile_source: Option<Arc<dyn ProfileSource>>,
    character_lookup: Option<Arc<dyn CharacterLookup>>,
    sync_settings: SyncSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            guild_repo: None,
            character_repo: None,
            user_repo: None,
            membership_repo: None,
            roster_source: None,
            profile_source: None,
            character_lookup: None,
            sync_settings: SyncSettings::default(),
        }
    }

    pub fn guild_repo(mut self, repo: Arc<dyn GuildRepository>) -> Self {
        self.guild_repo = Some(repo);
        self
    }

    pub fn character_repo(mut self, repo: Arc<dyn CharacterRepository>) -> Self {
        self.character_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn roster_source(mut self, source: Arc<dyn RosterSource>) -> Self {
        self.roster_source = Some(source);
        self
    }

    pub fn profile_source(mut self, source: Arc<dyn ProfileSource>) -> Self {
        self.profile_source = Some(source);
        self
    }

    pub fn character_lookup(mut self, lookup: Arc<dyn CharacterLookup>) -> Self {
        self.character_lookup = Some(lookup);
        self
    }

    pub fn sync_settings(mut self, settings: SyncSettings) -> Self {
        self.sync_settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.sync_settings.batch_size == 0 {
            return Err(ServiceError::validation("batch_size must be at least 1"));
        }

        Ok(ServiceContext::new(
            self.guild_repo.ok_or_else(|| ServiceError::validation("guild_repo is required"))?,
            self.character_repo.ok_or_else(|| ServiceError::validation("character_repo is required"))?,
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.membership_repo.ok_or_else(|| ServiceError::validation("membership_repo is required"))?,
            self.roster_source.ok_or_else(|| ServiceError::validation("roster_source is required"))?,
            self.profile_source.ok_or_else(|| ServiceError::validation("profile_source is required"))?,
            self.character_lookup.ok_or_else(|| ServiceError::validation("character_lookup is required"))?,
            self.sync_settings,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
