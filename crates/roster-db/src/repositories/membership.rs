//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use roster_core::{GuildMembership, GuildRole, MembershipRepository, RepoResult};

use crate::models::MembershipModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn find(&self, guild_id: Uuid, user_id: Uuid) -> RepoResult<Option<GuildMembership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT guild_id, user_id, role, created_at, updated_at
            FROM guild_memberships
            WHERE guild_id = $1 AND user_id = $2
            "#,
        )
        .bind(guild_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(GuildMembership::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_guild(&self, guild_id: Uuid) -> RepoResult<Vec<GuildMembership>> {
        let results = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT guild_id, user_id, role, created_at, updated_at
            FROM guild_memberships
            WHERE guild_id = $1
            ORDER BY created_at, user_id
            "#,
        )
        .bind(guild_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(GuildMembership::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn upsert_role(
        &self,
        guild_id: Uuid,
        user_id: Uuid,
        role: GuildRole,
    ) -> RepoResult<GuildMembership> {
        let model = sqlx::query_as::<_, MembershipModel>(
            r#"
            INSERT INTO guild_memberships (guild_id, user_id, role, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (guild_id, user_id) DO UPDATE SET
                role = EXCLUDED.role,
                updated_at = CASE
                    WHEN guild_memberships.role = EXCLUDED.role THEN guild_memberships.updated_at
                    ELSE NOW()
                END
            RETURNING guild_id, user_id, role, created_at, updated_at
            "#,
        )
        .bind(guild_id)
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        GuildMembership::try_from(model)
    }
}
