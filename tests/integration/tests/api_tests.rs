//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Battle.net and Raider.IO are served by a per-test wiremock server.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

/// Provision a user and return it with its bearer token
async fn provision_user(server: &TestServer) -> (ProvisionedUser, String) {
    let response = server
        .post("/api/v1/users", &CreateUserRequest::unique())
        .await
        .unwrap();
    let user: ProvisionedUser = assert_json(response, StatusCode::CREATED).await.unwrap();
    let token = user.access_token.clone().expect("token issued in development");
    (user, token)
}

/// Register a guild whose live roster holds `entries`
async fn register_guild(
    server: &TestServer,
    token: &str,
    entries: &[RosterEntry],
) -> RegisteredGuildResponse {
    let request = RegisterGuildRequest::unique();
    mount_token(&server.upstream).await;
    mount_profiles(&server.upstream).await;
    mount_roster(&server.upstream, &request.slug(), entries).await;

    let response = server
        .post_auth("/api/v1/guilds", token, &request)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_provisioned_user_can_authenticate() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, token) = provision_user(&server).await;

    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(me.id, user.id);
    assert_eq!(me.display_name, user.display_name);
}

#[tokio::test]
async fn test_blank_display_name_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/users", &json!({ "display_name": "" }))
        .await
        .unwrap();

    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Guild + Reconciliation Tests
// ============================================================================

#[tokio::test]
async fn test_register_guild_runs_first_sync() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = provision_user(&server).await;
    let suffix = unique_suffix();

    let registered = register_guild(
        &server,
        &token,
        &[
            RosterEntry::new(format!("Tank{suffix}"), 1),
            RosterEntry::new(format!("Heal{suffix}"), 3),
            RosterEntry::new(format!("Alt{suffix}"), 5).level(5),
        ],
    )
    .await;

    assert_eq!(registered.guild.realm_slug, REALM_SLUG);
    assert!(registered.guild.last_synced_at.is_some());
    assert_eq!(
        registered.sync,
        Some(SyncSummary {
            synced: 2,
            failed: 0,
            total: 2
        })
    );

    let path = format!("/api/v1/guilds/{}/characters", registered.guild.id);
    let response = server.get_auth(&path, &token).await.unwrap();
    let characters: Vec<CharacterResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(characters.len(), 2);
    for character in &characters {
        assert_eq!(character.class, "Paladin");
        assert_eq!(character.spec, "Holy");
        assert_eq!(character.item_level, Some(610));
        assert!(character.owner_id.is_none());
    }
}

#[tokio::test]
async fn test_duplicate_guild_conflicts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = provision_user(&server).await;
    let registered = register_guild(&server, &token, &[]).await;

    let duplicate = RegisterGuildRequest {
        region: "us".to_string(),
        realm: REALM.to_string(),
        name: registered.guild.name.clone(),
    };
    let response = server
        .post_auth("/api/v1/guilds", &token, &duplicate)
        .await
        .unwrap();

    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "GUILD_ALREADY_TRACKED");
}

#[tokio::test]
async fn test_claim_grants_role_and_sync_permission() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, creator_token) = provision_user(&server).await;
    let suffix = unique_suffix();
    let officer_name = format!("Foo{suffix}");

    let registered = register_guild(
        &server,
        &creator_token,
        &[
            RosterEntry::new(officer_name.clone(), 1),
            RosterEntry::new(format!("Bar{suffix}"), 4),
        ],
    )
    .await;
    let guild_id = registered.guild.id;

    let (officer, officer_token) = provision_user(&server).await;

    // Not a member yet
    let sync_path = format!("/api/v1/guilds/{guild_id}/sync");
    let response = server
        .post_auth(&sync_path, &officer_token, &json!({}))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/guilds/{guild_id}/claim"),
            &officer_token,
            &json!({ "characters": [{ "name": officer_name.to_uppercase(), "realm": REALM_SLUG }] }),
        )
        .await
        .unwrap();
    let claim: ClaimResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(claim.claimed, 1);
    assert_eq!(claim.role.as_deref(), Some("OFFICER"));

    let response = server
        .post_auth(&sync_path, &officer_token, &json!({}))
        .await
        .unwrap();
    let summary: SyncSummary = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((summary.synced, summary.failed, summary.total), (2, 0, 2));

    let response = server
        .get_auth(&format!("/api/v1/guilds/{guild_id}/members"), &officer_token)
        .await
        .unwrap();
    let members: Vec<MembershipResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let officer_membership = members
        .iter()
        .find(|m| m.user_id == officer.id)
        .expect("officer membership");
    assert_eq!(officer_membership.role, "OFFICER");

    let response = server
        .get_auth(&format!("/api/v1/guilds/{guild_id}/characters"), &officer_token)
        .await
        .unwrap();
    let characters: Vec<CharacterResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let claimed = characters
        .iter()
        .find(|c| c.name == officer_name)
        .expect("claimed character");
    assert_eq!(claimed.owner_id, Some(officer.id));
    assert_eq!(claimed.guild_rank, 1);
    assert_eq!(claimed.guild_role, "OFFICER");
    assert_eq!(claimed.realm, REALM_SLUG);
}

#[tokio::test]
async fn test_roster_failure_is_bad_gateway() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = provision_user(&server).await;
    mount_token(&server.upstream).await;

    // No roster mock: Battle.net answers 404 for this guild
    let response = server
        .post_auth("/api/v1/guilds", &token, &RegisterGuildRequest::unique())
        .await
        .unwrap();
    let registered: RegisteredGuildResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(registered.sync.is_none());

    let response = server
        .post_auth(
            &format!("/api/v1/guilds/{}/sync", registered.guild.id),
            &token,
            &json!({}),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_GATEWAY).await.unwrap();
    assert_eq!(code, "ROSTER_UNAVAILABLE");
}

#[tokio::test]
async fn test_link_warcraft_logs() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = provision_user(&server).await;
    let registered = register_guild(&server, &token, &[]).await;

    let response = server
        .patch_auth(
            &format!("/api/v1/guilds/{}/links", registered.guild.id),
            &token,
            &json!({ "wcl_guild_id": 4242 }),
        )
        .await
        .unwrap();
    let guild: GuildResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(guild.wcl_guild_id, Some(4242));
    assert_eq!(guild.slug, registered.guild.slug);

    let (_, outsider_token) = provision_user(&server).await;
    let response = server
        .patch_auth(
            &format!("/api/v1/guilds/{}/links", registered.guild.id),
            &outsider_token,
            &json!({ "wcl_guild_id": 1 }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_unknown_guild_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = provision_user(&server).await;

    let response = server
        .get_auth(&format!("/api/v1/guilds/{}", uuid::Uuid::new_v4()), &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_GUILD");
}
