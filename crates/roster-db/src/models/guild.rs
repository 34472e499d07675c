//! Guild database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for guilds table
#[derive(Debug, Clone, FromRow)]
pub struct GuildModel {
    pub id: Uuid,
    pub region: String,
    pub realm: String,
    pub realm_slug: String,
    pub name: String,
    pub slug: String,
    pub wcl_guild_id: Option<i64>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
