//! External data source ports
//!
//! Three independent HTTP sources feed reconciliation: the guild roster
//! listing, the detailed character profile, and a public secondary lookup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::Region;

/// Result type for external source calls
pub type SourceResult<T> = Result<T, SourceError>;

/// Failure of an external source call
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Not found upstream")]
    NotFound,

    #[error("Upstream authentication failed: {0}")]
    Auth(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl SourceError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// One entry of a guild roster listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterMember {
    pub name: String,
    /// Realm slug
    pub realm: String,
    pub class: Option<String>,
    pub level: i32,
    pub item_level: Option<i32>,
    pub rank: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildRoster {
    pub members: Vec<RosterMember>,
}

/// Detailed profile of one character
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterProfile {
    pub class: Option<String>,
    pub active_spec: Option<String>,
    pub item_level: Option<i32>,
}

/// Secondary lookup result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSummary {
    pub class: Option<String>,
    pub spec: Option<String>,
    pub item_level: Option<i32>,
    pub avatar_url: Option<String>,
}

/// A (name, realm) pair from a user's linked Battle.net account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedCharacter {
    pub name: String,
    pub realm: String,
}

impl LinkedCharacter {
    pub fn new(name: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            realm: realm.into(),
        }
    }
}

/// Authoritative guild member listing
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn get_roster(
        &self,
        region: Region,
        realm_slug: &str,
        guild_slug: &str,
    ) -> SourceResult<GuildRoster>;
}

/// Detailed character profiles and account character lists
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch a profile with the service credential, or `token` when given
    async fn get_profile(
        &self,
        region: Region,
        realm_slug: &str,
        name: &str,
        token: Option<&str>,
    ) -> SourceResult<CharacterProfile>;

    /// Characters on the account behind a delegated user token
    async fn get_account_characters(
        &self,
        region: Region,
        user_token: &str,
    ) -> SourceResult<Vec<LinkedCharacter>>;
}

/// Best-effort public lookup; `Ok(None)` when the character is unknown
#[async_trait]
pub trait CharacterLookup: Send + Sync {
    async fn get_avatar_and_spec(
        &self,
        region: Region,
        realm: &str,
        name: &str,
    ) -> SourceResult<Option<CharacterSummary>>;
}
