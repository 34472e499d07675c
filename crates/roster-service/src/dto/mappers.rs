//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use uuid::Uuid;

use roster_core::{Character, Guild, GuildMembership, User};

use super::responses::{CharacterResponse, GuildResponse, MembershipResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            battletag: user.battletag.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&Guild> for GuildResponse {
    fn from(guild: &Guild) -> Self {
        Self {
            id: guild.id,
            region: guild.region,
            realm: guild.realm.clone(),
            realm_slug: guild.realm_slug.clone(),
            name: guild.name.clone(),
            slug: guild.slug.clone(),
            wcl_guild_id: guild.wcl_guild_id,
            last_synced_at: guild.last_synced_at,
            created_at: guild.created_at,
        }
    }
}

impl From<Guild> for GuildResponse {
    fn from(guild: Guild) -> Self {
        Self::from(&guild)
    }
}

impl From<&GuildMembership> for MembershipResponse {
    fn from(m: &GuildMembership) -> Self {
        Self {
            guild_id: m.guild_id,
            user_id: m.user_id,
            role: m.role,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl CharacterResponse {
    /// Map a character, hiding the placeholder owner
    pub fn from_character(c: &Character, placeholder_id: Uuid) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            realm: c.realm.clone(),
            region: c.region,
            class: c.class.clone(),
            spec: c.spec.clone(),
            role: c.role,
            item_level: c.item_level,
            level: c.level,
            guild_rank: c.guild_rank,
            guild_role: c.guild_role(),
            avatar_url: c.avatar_url.clone(),
            owner_id: c.user_id.filter(|_| c.has_real_owner(placeholder_id)),
            updated_at: c.updated_at,
        }
    }
}
