//! Membership entity - a user's role within a guild

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::GuildRole;

/// Guild membership (junction between User and Guild)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMembership {
    pub guild_id: Uuid,
    pub user_id: Uuid,
    pub role: GuildRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuildMembership {
    pub fn new(guild_id: Uuid, user_id: Uuid, role: GuildRole) -> Self {
        let now = Utc::now();
        Self {
            guild_id,
            user_id,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the member's role
    pub fn set_role(&mut self, role: GuildRole) {
        if self.role != role {
            self.role = role;
            self.updated_at = Utc::now();
        }
    }

    #[inline]
    pub fn can_manage_roster(&self) -> bool {
        self.role.is_officer_or_above()
    }
}
