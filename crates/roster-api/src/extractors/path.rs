//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
struct RawGuildId {
    guild_id: String,
}

/// `:guild_id` parsed as a UUID
#[derive(Debug, Clone, Copy)]
pub struct GuildIdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for GuildIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawGuildId>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        parse_guild_id(&raw.guild_id).map(GuildIdPath)
    }
}

fn parse_guild_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid guild_id format"))
}
