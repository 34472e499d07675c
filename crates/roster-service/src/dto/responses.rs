//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use roster_core::{CombatRole, GuildRole, Region};

use crate::services::SyncSummary;

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battletag: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Guild Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GuildResponse {
    pub id: Uuid,
    pub region: Region,
    pub realm: String,
    pub realm_slug: String,
    pub name: String,
    pub slug: String,
    pub wcl_guild_id: Option<i64>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Result of registering a guild
///
/// `sync` is absent when the initial reconciliation failed; the guild
/// stays registered and can be synced again later.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredGuildResponse {
    pub guild: GuildResponse,
    pub sync: Option<SyncSummary>,
}

// ============================================================================
// Roster Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponse {
    pub id: Uuid,
    pub name: String,
    pub realm: String,
    pub region: Region,
    pub class: String,
    pub spec: String,
    pub role: CombatRole,
    pub item_level: Option<i32>,
    pub level: i32,
    pub guild_rank: i32,
    pub guild_role: GuildRole,
    pub avatar_url: Option<String>,
    /// Real owner; absent while the character is unclaimed
    pub owner_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub guild_id: Uuid,
    pub user_id: Uuid,
    pub role: GuildRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClaimResponse {
    pub claimed: u64,
    /// Membership role after the claim; absent when nothing was claimed
    pub role: Option<GuildRole>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
