//! Guild model -> entity mapper

use roster_core::{DomainError, Guild, Region};

use super::corrupt_column;
use crate::models::GuildModel;

impl TryFrom<GuildModel> for Guild {
    type Error = DomainError;

    fn try_from(model: GuildModel) -> Result<Self, Self::Error> {
        let region: Region = model
            .region
            .parse()
            .map_err(|_| corrupt_column("guilds.region", &model.region))?;

        Ok(Guild {
            id: model.id,
            region,
            realm: model.realm,
            realm_slug: model.realm_slug,
            name: model.name,
            slug: model.slug,
            wcl_guild_id: model.wcl_guild_id,
            last_synced_at: model.last_synced_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
