//! Battle.net World of Warcraft API client

mod auth;
mod models;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use roster_common::{BlizzardConfig, SyncConfig};
use roster_core::{
    CharacterProfile, GuildRoster, LinkedCharacter, ProfileSource, Region, RosterMember,
    RosterSource, SourceError, SourceResult,
};

pub use auth::TokenCache;

use crate::http::{build_http_client, map_transport, read_json};
use crate::retry::RetryPolicy;
use models::{AccountProfileResponse, ProfileResponse, RosterResponse};

/// API host for a region
fn region_host(region: Region) -> String {
    match region {
        Region::Cn => "https://gateway.battlenet.com.cn".to_string(),
        other => format!("https://{other}.api.blizzard.com"),
    }
}

/// Battle.net API client implementing [`RosterSource`] and [`ProfileSource`]
#[derive(Debug)]
pub struct BlizzardClient {
    http: reqwest::Client,
    tokens: TokenCache,
    api_base_url: Option<String>,
    locale: String,
    retry: RetryPolicy,
}

impl BlizzardClient {
    pub fn from_config(config: &BlizzardConfig, sync: &SyncConfig) -> SourceResult<Self> {
        let http = build_http_client(Duration::from_secs(sync.http_timeout_secs))?;
        let tokens = TokenCache::new(
            config.client_id.clone(),
            config.client_secret.clone(),
            config.oauth_url.clone(),
            http.clone(),
        );

        Ok(Self {
            http,
            tokens,
            api_base_url: config.api_base_url.clone(),
            locale: config.locale.clone(),
            retry: RetryPolicy::from_config(sync),
        })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self, region: Region, path: &str) -> String {
        let base = self
            .api_base_url
            .clone()
            .unwrap_or_else(|| region_host(region));
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    /// GET a profile-namespace resource with the given bearer token
    async fn get_json<T>(&self, region: Region, path: &str, token: &str) -> SourceResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let namespace = format!("profile-{region}");
        let response = self
            .http
            .get(self.url(region, path))
            .bearer_auth(token)
            .query(&[("namespace", namespace.as_str()), ("locale", self.locale.as_str())])
            .send()
            .await
            .map_err(map_transport)?;

        read_json(response).await
    }

    /// GET with the service token; a rejected token is dropped from the cache
    async fn get_with_service_token<T>(&self, region: Region, path: &str) -> SourceResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let token = self.tokens.get_token().await?;
        let result = self.get_json(region, path, &token).await;
        if let Err(SourceError::Auth(_)) = &result {
            self.tokens.invalidate().await;
        }
        result
    }
}

#[async_trait]
impl RosterSource for BlizzardClient {
    #[instrument(skip(self))]
    async fn get_roster(
        &self,
        region: Region,
        realm_slug: &str,
        guild_slug: &str,
    ) -> SourceResult<GuildRoster> {
        let path = format!("/data/wow/guild/{realm_slug}/{guild_slug}/roster");

        let response: RosterResponse = self
            .retry
            .run("blizzard.roster", || self.get_with_service_token(region, &path))
            .await?;

        let members: Vec<RosterMember> = response.members.into_iter().map(Into::into).collect();
        debug!(members = members.len(), "Fetched guild roster");

        Ok(GuildRoster { members })
    }
}

#[async_trait]
impl ProfileSource for BlizzardClient {
    #[instrument(skip(self, token))]
    async fn get_profile(
        &self,
        region: Region,
        realm_slug: &str,
        name: &str,
        token: Option<&str>,
    ) -> SourceResult<CharacterProfile> {
        let path = format!("/profile/wow/character/{realm_slug}/{}", name.to_lowercase());

        let response: ProfileResponse = match token {
            Some(user_token) => {
                self.retry
                    .run("blizzard.profile", || self.get_json(region, &path, user_token))
                    .await?
            }
            None => {
                self.retry
                    .run("blizzard.profile", || self.get_with_service_token(region, &path))
                    .await?
            }
        };

        Ok(response.into())
    }

    #[instrument(skip(self, user_token))]
    async fn get_account_characters(
        &self,
        region: Region,
        user_token: &str,
    ) -> SourceResult<Vec<LinkedCharacter>> {
        let response: AccountProfileResponse = self
            .retry
            .run("blizzard.account", || {
                self.get_json(region, "/profile/user/wow", user_token)
            })
            .await?;

        Ok(response.into_linked())
    }
}
