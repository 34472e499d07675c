//! Character database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for characters table
///
/// `name_key`/`realm_key` are storage-only and not selected.
#[derive(Debug, Clone, FromRow)]
pub struct CharacterModel {
    pub id: Uuid,
    pub guild_id: Uuid,
    pub name: String,
    pub realm: String,
    pub region: String,
    pub class: String,
    pub spec: String,
    pub role: String,
    pub item_level: Option<i32>,
    pub level: i32,
    pub guild_rank: i32,
    pub avatar_url: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
