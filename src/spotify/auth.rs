use chrono::Utc;
use reqwest::StatusCode;
use serde_json::Value;

use super::{SpotifyApi, read_json};
use crate::{
    error::{Error, Result},
    types::Token,
};

impl SpotifyApi {
    /// Exchanges an authorization code for an access token using PKCE.
    ///
    /// Completes the OAuth 2.0 PKCE flow by posting the code together with
    /// the verifier whose challenge was sent in the authorization request.
    /// The request is form encoded and carries `client_id`,
    /// `grant_type=authorization_code`, `code`, `redirect_uri` and
    /// `code_verifier`.
    ///
    /// # Arguments
    ///
    /// * `client_id` - Client ID of the registered application
    /// * `code` - Authorization code received on the redirect URI
    /// * `verifier` - PKCE code verifier generated before the redirect
    /// * `redirect_uri` - The exact redirect URI used in the authorization request
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] if the request cannot be sent
    /// - [`Error::Unauthorized`] for 400 and 401 answers (invalid or reused
    ///   code, verifier mismatch, redirect URI mismatch, unknown client)
    /// - [`Error::Api`] for any other non-2xx answer, e.g. an outage
    /// - [`Error::MissingField`] if the JSON has no `access_token`
    ///
    /// The exchange is not retried; authorization codes are single-use.
    pub async fn exchange_code_for_token(
        &self,
        client_id: &str,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
    ) -> Result<Token> {
        let res = self
            .client
            .post(&self.token_url)
            .form(&[
                ("client_id", client_id),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("code_verifier", verifier),
            ])
            .send()
            .await?;

        let json: Value = match read_json(res).await {
            Err(Error::Api { status, message }) if status == StatusCode::BAD_REQUEST => {
                return Err(Error::Unauthorized(format!("{} ({})", message, status)));
            }
            other => other?,
        };

        token_from_json(&json)
    }
}

fn token_from_json(json: &Value) -> Result<Token> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or(Error::MissingField("access_token"))?;

    Ok(Token {
        access_token: access_token.to_string(),
        token_type: json["token_type"].as_str().unwrap_or("Bearer").to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp(),
    })
}
