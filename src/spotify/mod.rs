//! # Spotify Integration Module
//!
//! This module is the Auth & API Gateway Client of topstats. It performs the
//! token exchange that completes the OAuth 2.0 PKCE handshake and issues the
//! authenticated requests the rest of the application needs.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Session)
//!          ↓
//! SpotifyApi
//!     ├── auth      POST /api/token
//!     ├── profile   GET  /me
//!     ├── top       GET  /me/top/{tracks|artists}
//!     ├── features  GET  /audio-features/{id}
//!     └── playlist  POST /users/{user_id}/playlists
//!                   POST /playlists/{playlist_id}/tracks
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`crate::Result`]:
//! - **401** responses become [`Error::Unauthorized`], expired tokens included.
//!   No local expiry check is made; an expired token surfaces here.
//! - Any other non-2xx response becomes [`Error::Api`] carrying the status and
//!   the message Spotify sent.
//! - Requests that cannot be sent become [`Error::Network`].
//! - 2xx bodies that do not match the expected shape become [`Error::Json`].
//!
//! There is no retry, backoff or request timeout. A hung request hangs the
//! calling command.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let api = SpotifyApi::new(&config);
//! let token = api
//!     .exchange_code_for_token(&config.client_id, &code, &verifier, &config.redirect_uri)
//!     .await?;
//! let profile = api.fetch_profile(&token.access_token).await?;
//! ```

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::Config,
    error::{Error, Result},
};

pub mod auth;
pub mod features;
pub mod playlist;
pub mod profile;
pub mod top;

/// Client for the token endpoint and the versioned Web API.
#[derive(Debug, Clone)]
pub struct SpotifyApi {
    client: Client,
    token_url: String,
    api_url: String,
}

impl SpotifyApi {
    pub fn new(config: &Config) -> Self {
        Self::with_urls(&config.token_url, &config.api_url)
    }

    pub fn with_urls(token_url: &str, api_url: &str) -> Self {
        Self {
            client: Client::new(),
            token_url: token_url.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url, path = path)
    }
}

/// Passes 2xx responses through and turns everything else into an [`Error`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    });

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized(message));
    }

    Err(Error::Api { status, message })
}

/// Checks the status and decodes the body as `T`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = check_status(response).await?.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Extracts the message of either Spotify error shape:
/// `{"error": {"status": 401, "message": ".."}}` from the Web API or
/// `{"error": "invalid_grant", "error_description": ".."}` from the accounts service.
fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match &json["error"] {
        Value::Object(err) => err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::String(code) => Some(
            json["error_description"]
                .as_str()
                .map(|d| format!("{}: {}", code, d))
                .unwrap_or_else(|| code.clone()),
        ),
        _ => None,
    }
}
