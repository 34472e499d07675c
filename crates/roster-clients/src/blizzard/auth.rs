//! Client-credentials OAuth token cache for the Battle.net API

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use roster_core::{SourceError, SourceResult};

use crate::http::{map_transport, read_json};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Expired, or expiring within the grace period
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Caches the service token for its lifetime
pub struct TokenCache {
    client_id: String,
    client_secret: String,
    oauth_url: String,
    http: reqwest::Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    grace_period: Duration,
}

impl TokenCache {
    pub fn new(
        client_id: String,
        client_secret: String,
        oauth_url: String,
        http: reqwest::Client,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            oauth_url,
            http,
            cached_token: Arc::new(RwLock::new(None)),
            grace_period: Duration::minutes(5),
        }
    }

    /// A valid service token, fetching a new one when needed
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> SourceResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.grace_period) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let mut cache = self.cached_token.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(ref token) = *cache {
            if !token.is_expired(self.grace_period) {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.acquire_token().await?;
        let access_token = token.access_token.clone();
        *cache = Some(token);
        Ok(access_token)
    }

    /// Drop the cached token so the next call fetches a fresh one
    pub async fn invalidate(&self) {
        *self.cached_token.write().await = None;
    }

    async fn acquire_token(&self) -> SourceResult<CachedToken> {
        let response = self
            .http
            .post(&self.oauth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(map_transport)?;

        let token: TokenResponse = read_json(response).await.map_err(|e| match e {
            SourceError::Auth(msg) | SourceError::Decode(msg) => {
                SourceError::Auth(format!("Token request failed: {msg}"))
            }
            other => other,
        })?;

        let expires_at = Utc::now() + Duration::seconds(token.expires_in);
        debug!(%expires_at, "Acquired Battle.net service token");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("client_id", &self.client_id)
            .field("oauth_url", &self.oauth_url)
            .finish_non_exhaustive()
    }
}
