//! Character entity - an in-game character tracked on a guild roster

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{CharacterKey, CombatRole, GuildRole, Region};

/// Character entity, unique on (name, realm, region)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: Uuid,
    pub guild_id: Uuid,
    pub name: String,
    /// Realm slug as reported by the roster source
    pub realm: String,
    pub region: Region,
    pub class: String,
    pub spec: String,
    pub role: CombatRole,
    pub item_level: Option<i32>,
    pub level: i32,
    /// In-game guild rank, lower is more authority
    pub guild_rank: i32,
    pub avatar_url: Option<String>,
    /// Owning user; the placeholder user until claimed
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Natural key of this character
    pub fn key(&self) -> CharacterKey {
        CharacterKey::new(self.name.clone(), self.realm.clone(), self.region)
    }

    /// Role derived from this character's guild rank
    #[inline]
    pub fn guild_role(&self) -> GuildRole {
        GuildRole::from_guild_rank(self.guild_rank)
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == Some(user_id)
    }

    /// Whether `user_id` may take ownership of this character
    ///
    /// Only unowned or placeholder-owned characters are eligible; a character
    /// owned by another real user is never reassigned.
    pub fn is_claimable_by(&self, user_id: Uuid, placeholder_id: Uuid) -> bool {
        match self.user_id {
            None => true,
            Some(owner) => owner == placeholder_id && owner != user_id,
        }
    }

    /// Whether the owner is a real (non-placeholder) user
    pub fn has_real_owner(&self, placeholder_id: Uuid) -> bool {
        matches!(self.user_id, Some(owner) if owner != placeholder_id)
    }
}

/// Values written by a reconciliation upsert
///
/// `class` is `None` when no source produced a real class; an existing
/// stored class is then kept. `default_owner` only applies to new rows.
#[derive(Debug, Clone)]
pub struct CharacterUpsert {
    pub guild_id: Uuid,
    pub key: CharacterKey,
    pub class: Option<String>,
    pub spec: String,
    pub role: CombatRole,
    pub item_level: Option<i32>,
    pub level: i32,
    pub guild_rank: i32,
    pub avatar_url: Option<String>,
    pub default_owner: Uuid,
}
