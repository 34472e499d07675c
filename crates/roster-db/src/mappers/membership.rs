//! Membership model -> entity mapper

use roster_core::{DomainError, GuildMembership, GuildRole};

use super::corrupt_column;
use crate::models::MembershipModel;

impl TryFrom<MembershipModel> for GuildMembership {
    type Error = DomainError;

    fn try_from(model: MembershipModel) -> Result<Self, Self::Error> {
        let role: GuildRole = model
            .role
            .parse()
            .map_err(|_| corrupt_column("guild_memberships.role", &model.role))?;

        Ok(GuildMembership {
            guild_id: model.guild_id,
            user_id: model.user_id,
            role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
