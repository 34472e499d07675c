//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Guild not found: {0}")]
    GuildNotFound(Uuid),

    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    #[error("Not a member of this guild")]
    MembershipNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown region: {0}")]
    InvalidRegion(String),

    #[error("Invalid guild name: {0}")]
    InvalidGuildName(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Officer rank required")]
    NotOfficer,

    #[error("Placeholder account cannot act")]
    PlaceholderAccount,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Guild is already tracked")]
    GuildAlreadyTracked,

    // =========================================================================
    // Upstream Errors
    // =========================================================================
    #[error("Guild roster unavailable: {0}")]
    RosterUnavailable(String),

    #[error("Battle.net account unavailable: {0}")]
    AccountUnavailable(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::GuildNotFound(_) => "UNKNOWN_GUILD",
            Self::CharacterNotFound(_) => "UNKNOWN_CHARACTER",
            Self::MembershipNotFound => "NOT_A_MEMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRegion(_) => "INVALID_REGION",
            Self::InvalidGuildName(_) => "INVALID_GUILD_NAME",

            // Authorization
            Self::NotOfficer => "OFFICER_REQUIRED",
            Self::PlaceholderAccount => "PLACEHOLDER_ACCOUNT",

            // Conflict
            Self::GuildAlreadyTracked => "GUILD_ALREADY_TRACKED",

            // Upstream
            Self::RosterUnavailable(_) => "ROSTER_UNAVAILABLE",
            Self::AccountUnavailable(_) => "ACCOUNT_UNAVAILABLE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    ///
    /// A missing membership is an authorization failure, not a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::GuildNotFound(_) | Self::CharacterNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidRegion(_) | Self::InvalidGuildName(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MembershipNotFound | Self::NotOfficer | Self::PlaceholderAccount
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::GuildAlreadyTracked)
    }

    /// Check if an external data source failed
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::RosterUnavailable(_) | Self::AccountUnavailable(_))
    }
}
