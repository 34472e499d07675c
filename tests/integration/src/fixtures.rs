//! Test fixtures and data generators
//!
//! Request/response shapes of the roster API plus Battle.net mock setup.

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Realm used by every fixture guild
pub const REALM: &str = "Area 52";
pub const REALM_SLUG: &str = "area-52";

/// Short random suffix keeping names unique across runs
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[derive(Debug, Serialize)]
pub struct CreateUserRequest {
    pub display_name: String,
}

impl CreateUserRequest {
    pub fn unique() -> Self {
        Self {
            display_name: format!("Raider {}", unique_suffix()),
        }
    }
}

/// POST /users response; the token is present in development
#[derive(Debug, Deserialize)]
pub struct ProvisionedUser {
    pub id: Uuid,
    pub display_name: String,
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterGuildRequest {
    pub region: String,
    pub realm: String,
    pub name: String,
}

impl RegisterGuildRequest {
    pub fn unique() -> Self {
        Self {
            region: "us".to_string(),
            realm: REALM.to_string(),
            name: format!("Night Shift {}", unique_suffix()),
        }
    }

    /// Slug Battle.net uses for this guild name
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }
}

#[derive(Debug, Deserialize)]
pub struct GuildResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub realm_slug: String,
    pub wcl_guild_id: Option<i64>,
    pub last_synced_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SyncSummary {
    pub synced: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct RegisteredGuildResponse {
    pub guild: GuildResponse,
    pub sync: Option<SyncSummary>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterResponse {
    pub name: String,
    pub realm: String,
    pub class: String,
    pub spec: String,
    pub item_level: Option<i32>,
    pub guild_rank: i32,
    pub guild_role: String,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MembershipResponse {
    pub user_id: Uuid,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ClaimResponse {
    pub claimed: u64,
    pub role: Option<String>,
}

/// A guild member as Battle.net reports it
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub name: String,
    pub level: i32,
    pub rank: i32,
    pub class_id: u32,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, rank: i32) -> Self {
        Self {
            name: name.into(),
            level: 80,
            rank,
            class_id: 2,
        }
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }
}

/// Client-credentials token endpoint
pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "service-token",
            "token_type": "bearer",
            "expires_in": 86399
        })))
        .mount(server)
        .await;
}

/// Guild roster for `guild_slug` on the fixture realm
pub async fn mount_roster(server: &MockServer, guild_slug: &str, entries: &[RosterEntry]) {
    let members: Vec<_> = entries
        .iter()
        .map(|e| {
            json!({
                "character": {
                    "name": e.name,
                    "realm": { "slug": REALM_SLUG },
                    "level": e.level,
                    "playable_class": { "id": e.class_id }
                },
                "rank": e.rank
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/data/wow/guild/{REALM_SLUG}/{guild_slug}/roster")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "members": members })))
        .mount(server)
        .await;
}

/// Every character profile on the fixture realm resolves to the same gear
pub async fn mount_profiles(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^/profile/wow/character/{REALM_SLUG}/[^/]+$")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "character_class": { "name": "Paladin" },
            "active_spec": { "name": "Holy" },
            "equipped_item_level": 610
        })))
        .mount(server)
        .await;
}
