//! Character model -> entity mapper

use roster_core::{Character, CombatRole, DomainError, Region};

use super::corrupt_column;
use crate::models::CharacterModel;

impl TryFrom<CharacterModel> for Character {
    type Error = DomainError;

    fn try_from(model: CharacterModel) -> Result<Self, Self::Error> {
        let region: Region = model
            .region
            .parse()
            .map_err(|_| corrupt_column("characters.region", &model.region))?;
        let role: CombatRole = model
            .role
            .parse()
            .map_err(|_| corrupt_column("characters.role", &model.role))?;

        Ok(Character {
            id: model.id,
            guild_id: model.guild_id,
            name: model.name,
            realm: model.realm,
            region,
            class: model.class,
            spec: model.spec,
            role,
            item_level: model.item_level,
            level: model.level,
            guild_rank: model.guild_rank,
            avatar_url: model.avatar_url,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
