//! Guild entity - a tracked in-game guild

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{slugify, Region};

/// Guild entity, identified externally by (region, realm, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Uuid,
    pub region: Region,
    pub realm: String,
    pub realm_slug: String,
    pub name: String,
    pub slug: String,
    /// Linked Warcraft Logs guild identifier
    pub wcl_guild_id: Option<i64>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guild {
    /// Create a new Guild, deriving slugs from the display names
    pub fn new(region: Region, realm: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            region,
            realm_slug: slugify(&realm),
            slug: slugify(&name),
            realm,
            name,
            wcl_guild_id: None,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Link (or unlink) a Warcraft Logs guild
    pub fn set_wcl_guild_id(&mut self, wcl_guild_id: Option<i64>) {
        self.wcl_guild_id = wcl_guild_id;
        self.updated_at = Utc::now();
    }

    /// Record a finished reconciliation run
    pub fn mark_synced(&mut self, at: DateTime<Utc>) {
        self.last_synced_at = Some(at);
        self.updated_at = at;
    }
}
