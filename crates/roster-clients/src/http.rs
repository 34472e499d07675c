//! Shared reqwest plumbing

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use roster_core::{SourceError, SourceResult};

/// Build the HTTP client shared by one source adapter
pub(crate) fn build_http_client(timeout: Duration) -> SourceResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("guild-roster/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {e}")))
}

/// Map a transport-level reqwest failure
pub(crate) fn map_transport(e: reqwest::Error) -> SourceError {
    if e.is_decode() {
        SourceError::Decode(e.to_string())
    } else {
        SourceError::Network(e.to_string())
    }
}

/// Check the status and decode a JSON body
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> SourceResult<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => SourceError::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SourceError::Auth(format!("status {}", status.as_u16()))
        }
        _ => SourceError::Status {
            status: status.as_u16(),
            body: truncate(body, 512),
        },
    })
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut cut = max;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundary() {
        let body = "é".repeat(10);
        let cut = truncate(body, 5);
        assert_eq!(cut, "éé");
    }
}
