//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use roster_core::LinkedCharacter;

// ============================================================================
// User Requests
// ============================================================================

/// Provision a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: String,

    #[validate(length(min = 3, max = 64, message = "Battletag must be 3-64 characters"))]
    pub battletag: Option<String>,
}

// ============================================================================
// Guild Requests
// ============================================================================

/// Register a guild for tracking
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterGuildRequest {
    /// One of us, eu, kr, tw, cn
    #[validate(length(min = 2, max = 2, message = "Region must be a two-letter code"))]
    pub region: String,

    #[validate(length(min = 1, max = 64, message = "Realm must be 1-64 characters"))]
    pub realm: String,

    #[validate(length(min = 2, max = 64, message = "Guild name must be 2-64 characters"))]
    pub name: String,
}

/// Link or unlink external guild identifiers
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGuildLinksRequest {
    /// Warcraft Logs guild id, or null to unlink
    #[validate(range(min = 1, message = "Warcraft Logs guild id must be positive"))]
    pub wcl_guild_id: Option<i64>,
}

// ============================================================================
// Claim Requests
// ============================================================================

/// Claim characters, either from an explicit list of linked characters or
/// from the account behind a delegated Battle.net token
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClaimCharactersRequest {
    #[validate(length(max = 200, message = "At most 200 linked characters"))]
    pub characters: Option<Vec<LinkedCharacter>>,

    #[validate(length(min = 1, message = "Battle.net token must not be empty"))]
    pub battlenet_token: Option<String>,
}

/// Where the linked characters of a claim come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimSource {
    Linked(Vec<LinkedCharacter>),
    BattleNet { user_token: String },
}

impl ClaimCharactersRequest {
    /// Exactly one of `characters` or `battlenet_token` must be present
    pub fn into_source(self) -> Result<ClaimSource, String> {
        match (self.characters, self.battlenet_token) {
            (Some(characters), None) => Ok(ClaimSource::Linked(characters)),
            (None, Some(user_token)) => Ok(ClaimSource::BattleNet { user_token }),
            (Some(_), Some(_)) => {
                Err("Provide either characters or battlenet_token, not both".to_string())
            }
            (None, None) => Err("Provide characters or battlenet_token".to_string()),
        }
    }
}
