//! PostgreSQL implementation of CharacterRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use roster_core::{
    Character, CharacterRepository, CharacterUpsert, LinkedCharacter, RepoResult, UNKNOWN,
};

use crate::models::CharacterModel;

use super::error::map_db_error;

const CHARACTER_COLUMNS: &str = "id, guild_id, name, realm, region, class, spec, role, \
                                 item_level, level, guild_rank, avatar_url, user_id, \
                                 created_at, updated_at";

/// PostgreSQL implementation of CharacterRepository
#[derive(Clone)]
pub struct PgCharacterRepository {
    pool: PgPool,
}

impl PgCharacterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CharacterRepository for PgCharacterRepository {
    #[instrument(skip(self, upsert), fields(character = %upsert.key))]
    async fn upsert(&self, upsert: &CharacterUpsert) -> RepoResult<Character> {
        // $8 is NULL when no source resolved a class; keep what is stored.
        let query = format!(
            r#"
            INSERT INTO characters (id, guild_id, name, realm, region, name_key, realm_key,
                                    class, spec, role, item_level, level, guild_rank,
                                    avatar_url, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, $15), $9, $10, $11, $12, $13,
                    $14, $16, NOW(), NOW())
            ON CONFLICT (name_key, realm_key, region) DO UPDATE SET
                guild_id = EXCLUDED.guild_id,
                name = EXCLUDED.name,
                realm = EXCLUDED.realm,
                class = COALESCE($8, characters.class),
                spec = EXCLUDED.spec,
                role = EXCLUDED.role,
                item_level = EXCLUDED.item_level,
                level = EXCLUDED.level,
                guild_rank = EXCLUDED.guild_rank,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = NOW()
            RETURNING {CHARACTER_COLUMNS}
            "#
        );

        let model = sqlx::query_as::<_, CharacterModel>(&query)
            .bind(Uuid::new_v4())
            .bind(upsert.guild_id)
            .bind(&upsert.key.name)
            .bind(&upsert.key.realm)
            .bind(upsert.key.region.as_str())
            .bind(upsert.key.name_key())
            .bind(upsert.key.realm_key())
            .bind(upsert.class.as_deref())
            .bind(&upsert.spec)
            .bind(upsert.role.as_str())
            .bind(upsert.item_level)
            .bind(upsert.level)
            .bind(upsert.guild_rank)
            .bind(upsert.avatar_url.as_deref())
            .bind(UNKNOWN)
            .bind(upsert.default_owner)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Character::try_from(model)
    }

    #[instrument(skip(self))]
    async fn list_by_guild(&self, guild_id: Uuid) -> RepoResult<Vec<Character>> {
        let query = format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters \
             WHERE guild_id = $1 ORDER BY guild_rank, name_key"
        );
        let results = sqlx::query_as::<_, CharacterModel>(&query)
            .bind(guild_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Character::try_from).collect()
    }

    #[instrument(skip(self, linked), fields(linked = linked.len()))]
    async fn find_claimable(
        &self,
        guild_id: Uuid,
        placeholder_id: Uuid,
        linked: &[LinkedCharacter],
    ) -> RepoResult<Vec<Character>> {
        if linked.is_empty() {
            return Ok(Vec::new());
        }

        let (names, realms): (Vec<String>, Vec<String>) = linked
            .iter()
            .map(|c| (c.name.to_lowercase(), c.realm.to_lowercase()))
            .unzip();

        let query = format!(
            r#"
            SELECT {CHARACTER_COLUMNS} FROM characters
            WHERE guild_id = $1
              AND (user_id IS NULL OR user_id = $2)
              AND (name_key, realm_key) IN (SELECT * FROM UNNEST($3::text[], $4::text[]))
            ORDER BY guild_rank, name_key
            "#
        );
        let results = sqlx::query_as::<_, CharacterModel>(&query)
            .bind(guild_id)
            .bind(placeholder_id)
            .bind(names)
            .bind(realms)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Character::try_from).collect()
    }

    #[instrument(skip(self, character_ids), fields(count = character_ids.len()))]
    async fn reassign_owner(
        &self,
        character_ids: &[Uuid],
        user_id: Uuid,
        placeholder_id: Uuid,
    ) -> RepoResult<u64> {
        if character_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE characters
            SET user_id = $2, updated_at = NOW()
            WHERE id = ANY($1) AND (user_id IS NULL OR user_id = $3)
            "#,
        )
        .bind(character_ids.to_vec())
        .bind(user_id)
        .bind(placeholder_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn min_rank_for_user(&self, guild_id: Uuid, user_id: Uuid) -> RepoResult<Option<i32>> {
        let rank = sqlx::query_scalar::<_, Option<i32>>(
            r#"
            SELECT MIN(guild_rank) FROM characters WHERE guild_id = $1 AND user_id = $2
            "#,
        )
        .bind(guild_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rank)
    }
}
