//! Raider.IO public character lookup

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use roster_common::{RaiderIoConfig, SyncConfig};
use roster_core::{CharacterLookup, CharacterSummary, Region, SourceError, SourceResult};

use crate::http::{build_http_client, map_transport, read_json};
use crate::retry::RetryPolicy;

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    class: Option<String>,
    active_spec_name: Option<String>,
    thumbnail_url: Option<String>,
    gear: Option<Gear>,
}

#[derive(Debug, Deserialize)]
struct Gear {
    item_level_equipped: Option<f64>,
}

impl From<ProfileResponse> for CharacterSummary {
    fn from(p: ProfileResponse) -> Self {
        CharacterSummary {
            class: p.class,
            spec: p.active_spec_name,
            item_level: p
                .gear
                .and_then(|g| g.item_level_equipped)
                .map(|ilvl| ilvl.round() as i32),
            avatar_url: p.thumbnail_url,
        }
    }
}

/// Raider.IO client implementing [`CharacterLookup`]
#[derive(Debug, Clone)]
pub struct RaiderIoClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl RaiderIoClient {
    pub fn from_config(config: &RaiderIoConfig, sync: &SyncConfig) -> SourceResult<Self> {
        Ok(Self {
            http: build_http_client(Duration::from_secs(sync.http_timeout_secs))?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::from_config(sync),
        })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn fetch(&self, region: Region, realm: &str, name: &str) -> SourceResult<ProfileResponse> {
        let response = self
            .http
            .get(format!("{}/api/v1/characters/profile", self.base_url))
            .query(&[
                ("region", region.as_str()),
                ("realm", realm),
                ("name", name),
                ("fields", "gear"),
            ])
            .send()
            .await
            .map_err(map_transport)?;

        read_json(response).await
    }
}

#[async_trait]
impl CharacterLookup for RaiderIoClient {
    #[instrument(skip(self))]
    async fn get_avatar_and_spec(
        &self,
        region: Region,
        realm: &str,
        name: &str,
    ) -> SourceResult<Option<CharacterSummary>> {
        let result = self
            .retry
            .run("raiderio.profile", || self.fetch(region, realm, name))
            .await;

        match result {
            Ok(profile) => Ok(Some(profile.into())),
            // Unknown characters come back as 400 "Could not find requested character"
            Err(SourceError::NotFound | SourceError::Status { status: 400, .. }) => {
                debug!("Character not known to Raider.IO");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
