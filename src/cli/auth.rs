use chrono::DateTime;
use reqwest::Url;

use super::spinner;
use crate::{
    Config, error,
    error::{Error, Result},
    info,
    management::{Handshake, Redirect, Session, VerifierStore},
    server::start_callback_server,
    spotify::SpotifyApi,
    success, warning,
};

/// Opens the authorization URL in the default browser.
pub struct BrowserRedirect;

impl Redirect for BrowserRedirect {
    fn redirect(&self, url: &Url) -> Result<()> {
        if webbrowser::open(url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            );
        }
        Ok(())
    }
}

/// Runs the complete PKCE handshake and returns the authenticated session.
///
/// 1. Binds the local callback server on the configured address
/// 2. Stores a fresh verifier and opens the authorization URL
/// 3. Waits for Spotify to redirect back with a code
/// 4. Exchanges the code and fetches the profile
///
/// The token only lives as long as the returned session.
pub async fn authenticate(config: &Config, api: &SpotifyApi) -> Result<Session> {
    let store = VerifierStore::default_location();
    let server = start_callback_server(config.server_addr).await?;

    if let Handshake::Authenticated(session) =
        Session::handshake(api, config, &store, &BrowserRedirect, None).await?
    {
        server.shutdown();
        return Ok(session);
    }

    info!(
        "Waiting for the authorization callback on {}...",
        config.redirect_uri
    );
    let code = server.wait_for_code(config.callback_timeout).await;
    server.shutdown();
    let code = code?;

    let pb = spinner("Exchanging authorization code...");
    let handshake = Session::handshake(api, config, &store, &BrowserRedirect, Some(&code)).await;
    pb.finish_and_clear();

    match handshake? {
        Handshake::Authenticated(session) => Ok(session),
        Handshake::Redirected(_) => Err(Error::Callback(
            "empty authorization code received".to_string(),
        )),
    }
}

pub async fn auth(config: &Config) {
    let api = SpotifyApi::new(config);

    let session = match authenticate(config, &api).await {
        Ok(session) => session,
        Err(e) => error!("Authentication failed: {}", e),
    };

    success!("Authenticated as {}", session.profile().name());

    if let Some(expires_at) = session
        .token()
        .expires_at()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
    {
        info!(
            "Token valid until {} for this session only.",
            expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}
