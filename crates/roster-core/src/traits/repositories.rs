//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Character, CharacterUpsert, Guild, GuildMembership, User};
use crate::error::DomainError;
use crate::traits::LinkedCharacter;
use crate::value_objects::{GuildRole, Region};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Guild Repository
// ============================================================================

#[async_trait]
pub trait GuildRepository: Send + Sync {
    /// Find guild by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Guild>>;

    /// Find guild by its external identity
    async fn find_by_identity(
        &self,
        region: Region,
        realm_slug: &str,
        slug: &str,
    ) -> RepoResult<Option<Guild>>;

    /// Create a new guild; duplicate identity is `GuildAlreadyTracked`
    async fn create(&self, guild: &Guild) -> RepoResult<()>;

    /// Set the linked Warcraft Logs guild id
    async fn update_links(&self, id: Uuid, wcl_guild_id: Option<i64>) -> RepoResult<()>;

    /// Record the end of a reconciliation run
    async fn mark_synced(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<()>;

    /// List tracked guilds, newest first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<Guild>>;
}

// ============================================================================
// Character Repository
// ============================================================================

#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Insert or update a character by natural key
    ///
    /// Enrichable fields are overwritten. `class` is only overwritten when
    /// the upsert carries one. The owner of an existing row never changes;
    /// new rows are owned by `default_owner`.
    async fn upsert(&self, upsert: &CharacterUpsert) -> RepoResult<Character>;

    /// All characters attached to a guild, by rank then name
    async fn list_by_guild(&self, guild_id: Uuid) -> RepoResult<Vec<Character>>;

    /// Characters in the guild matching any linked (name, realm) pair,
    /// case-insensitively, that are unowned or owned by the placeholder
    async fn find_claimable(
        &self,
        guild_id: Uuid,
        placeholder_id: Uuid,
        linked: &[LinkedCharacter],
    ) -> RepoResult<Vec<Character>>;

    /// Move ownership of the given characters to `user_id`
    ///
    /// Only rows still unowned or placeholder-owned are changed. Returns the
    /// number of rows reassigned.
    async fn reassign_owner(
        &self,
        character_ids: &[Uuid],
        user_id: Uuid,
        placeholder_id: Uuid,
    ) -> RepoResult<u64>;

    /// Lowest guild rank over every character the user owns in the guild
    async fn min_rank_for_user(&self, guild_id: Uuid, user_id: Uuid) -> RepoResult<Option<i32>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Return the placeholder user, creating it if it does not exist
    ///
    /// Must be safe under concurrent callers: exactly one placeholder row
    /// exists afterwards and every caller sees it.
    async fn get_or_create_placeholder(&self) -> RepoResult<User>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find a user's membership in a guild
    async fn find(&self, guild_id: Uuid, user_id: Uuid) -> RepoResult<Option<GuildMembership>>;

    /// All memberships of a guild
    async fn list_by_guild(&self, guild_id: Uuid) -> RepoResult<Vec<GuildMembership>>;

    /// Create the membership or replace its role
    async fn upsert_role(
        &self,
        guild_id: Uuid,
        user_id: Uuid,
        role: GuildRole,
    ) -> RepoResult<GuildMembership>;
}
