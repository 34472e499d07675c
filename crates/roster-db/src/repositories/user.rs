//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use roster_core::{RepoResult, User, UserRepository};

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, display_name, battletag, is_placeholder, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, display_name, battletag, is_placeholder, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.display_name)
        .bind(&user.battletag)
        .bind(user.is_placeholder)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_or_create_placeholder(&self) -> RepoResult<User> {
        // The partial unique index admits one placeholder row; losers of a
        // concurrent insert fall through to the read.
        let candidate = User::placeholder();
        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, display_name, battletag, is_placeholder, created_at, updated_at)
            VALUES ($1, $2, NULL, TRUE, $3, $3)
            ON CONFLICT (is_placeholder) WHERE is_placeholder DO NOTHING
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.display_name)
        .bind(candidate.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if inserted.rows_affected() == 1 {
            debug!(user_id = %candidate.id, "Created placeholder user");
        }

        let model = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, display_name, battletag, is_placeholder, created_at, updated_at
            FROM users
            WHERE is_placeholder
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(User::from(model))
    }
}
