//! PostgreSQL implementation of GuildRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use roster_core::{DomainError, Guild, GuildRepository, Region, RepoResult};

use crate::models::GuildModel;

use super::error::{map_db_error, map_unique_violation};

const GUILD_COLUMNS: &str = "id, region, realm, realm_slug, name, slug, wcl_guild_id, \
                             last_synced_at, created_at, updated_at";

/// PostgreSQL implementation of GuildRepository
#[derive(Clone)]
pub struct PgGuildRepository {
    pool: PgPool,
}

impl PgGuildRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuildRepository for PgGuildRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Guild>> {
        let query = format!("SELECT {GUILD_COLUMNS} FROM guilds WHERE id = $1");
        let result = sqlx::query_as::<_, GuildModel>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Guild::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_identity(
        &self,
        region: Region,
        realm_slug: &str,
        slug: &str,
    ) -> RepoResult<Option<Guild>> {
        let query = format!(
            "SELECT {GUILD_COLUMNS} FROM guilds WHERE region = $1 AND realm_slug = $2 AND slug = $3"
        );
        let result = sqlx::query_as::<_, GuildModel>(&query)
            .bind(region.as_str())
            .bind(realm_slug)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Guild::try_from).transpose()
    }

    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    async fn create(&self, guild: &Guild) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO guilds (id, region, realm, realm_slug, name, slug, wcl_guild_id,
                                last_synced_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(guild.id)
        .bind(guild.region.as_str())
        .bind(&guild.realm)
        .bind(&guild.realm_slug)
        .bind(&guild.name)
        .bind(&guild.slug)
        .bind(guild.wcl_guild_id)
        .bind(guild.last_synced_at)
        .bind(guild.created_at)
        .bind(guild.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::GuildAlreadyTracked))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_links(&self, id: Uuid, wcl_guild_id: Option<i64>) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE guilds SET wcl_guild_id = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(wcl_guild_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GuildNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_synced(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE guilds SET last_synced_at = $2, updated_at = $2 WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GuildNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<Guild>> {
        let query = format!(
            "SELECT {GUILD_COLUMNS} FROM guilds ORDER BY created_at DESC, id LIMIT $1 OFFSET $2"
        );
        let results = sqlx::query_as::<_, GuildModel>(&query)
            .bind(limit.clamp(1, 100))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Guild::try_from).collect()
    }
}
