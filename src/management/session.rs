use reqwest::Url;

use crate::{
    config::Config,
    error::{Error, Result},
    management::VerifierStore,
    spotify::SpotifyApi,
    stats::{self, AudioSummary},
    types::{FeatureSet, ItemType, Playlist, Profile, Token, TopItems, TopItemsRequest},
    utils,
};

pub const PLAYLIST_DESCRIPTION: &str = "New Playlist Description";

/// Sends the user to the authorization URL.
///
/// Implemented by the presentation layer; the CLI opens the system browser.
pub trait Redirect {
    fn redirect(&self, url: &Url) -> Result<()>;
}

/// Outcome of one handshake step.
#[derive(Debug)]
pub enum Handshake {
    /// No authorization code was present. The verifier is stored and the user
    /// has been sent to this URL; nothing else happens in this step.
    Redirected(Url),
    /// The code was exchanged and the profile fetched.
    Authenticated(Session),
}

/// An authenticated session.
///
/// Holds the bearer token, the profile and the most recent top items result.
/// Every operation that changes the session takes `&mut self`, so two
/// actions can never run against the same session at once.
#[derive(Debug)]
pub struct Session {
    token: Token,
    profile: Profile,
    last_result: Option<TopItems>,
}

impl Session {
    /// Runs one step of the PKCE handshake.
    ///
    /// Without an authorization code (`None` or empty), a fresh verifier is
    /// generated and stored, and `redirect` is invoked with the authorization
    /// URL. No request is sent to Spotify.
    ///
    /// With a code, the stored verifier is loaded, the code is exchanged
    /// exactly once, the verifier is removed and the profile is fetched with
    /// the new token.
    pub async fn handshake(
        api: &SpotifyApi,
        config: &Config,
        store: &VerifierStore,
        redirect: &dyn Redirect,
        code: Option<&str>,
    ) -> Result<Handshake> {
        match code.filter(|c| !c.is_empty()) {
            None => {
                let url = redirect_to_auth_code_flow(config, store, redirect).await?;
                Ok(Handshake::Redirected(url))
            }
            Some(code) => {
                let session = Self::complete(api, config, store, code).await?;
                Ok(Handshake::Authenticated(session))
            }
        }
    }

    async fn complete(
        api: &SpotifyApi,
        config: &Config,
        store: &VerifierStore,
        code: &str,
    ) -> Result<Self> {
        let verifier = store.load().await?;

        let exchanged = api
            .exchange_code_for_token(&config.client_id, code, &verifier, &config.redirect_uri)
            .await;
        // the verifier is consumed by the attempt, successful or not
        store.clear().await?;
        let token = exchanged?;

        let profile = api.fetch_profile(&token.access_token).await?;

        Ok(Session {
            token,
            profile,
            last_result: None,
        })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn last_result(&self) -> Option<&TopItems> {
        self.last_result.as_ref()
    }

    /// Fetches top items and replaces the previous result.
    ///
    /// An invalid limit fails before any request and leaves the previous
    /// result in place. A failed request clears it, so no aggregate can be
    /// derived from a result the user did not ask for last.
    pub async fn fetch_top_items(
        &mut self,
        api: &SpotifyApi,
        request: TopItemsRequest,
    ) -> Result<&TopItems> {
        utils::validate_limit(request.limit)?;
        self.last_result = None;

        let result = api
            .fetch_top_items(
                &self.token.access_token,
                request.item_type,
                request.time_range,
                request.limit,
            )
            .await?;

        let result = self.last_result.insert(result);
        Ok(&*result)
    }

    /// Fetches the audio features of every track of the current result, in order.
    pub async fn fetch_audio_features(&self, api: &SpotifyApi) -> Result<Vec<FeatureSet>> {
        let result = self.track_result()?;

        let mut features = Vec::with_capacity(result.items.len());
        for item in &result.items {
            features.push(
                api.fetch_audio_features(&self.token.access_token, &item.id)
                    .await?,
            );
        }
        Ok(features)
    }

    /// Audio feature statistics of the current result.
    pub async fn audio_summary(&self, api: &SpotifyApi) -> Result<AudioSummary> {
        let features = self.fetch_audio_features(api).await?;
        let result = self.track_result()?;
        Ok(stats::aggregate(result, &features))
    }

    /// Saves the current track result as a new public playlist.
    ///
    /// The playlist is named after the result, e.g. `Top 20 tracks (short term)`,
    /// and the tracks are inserted at position 0 in rank order.
    pub async fn save_as_playlist(&self, api: &SpotifyApi) -> Result<Playlist> {
        let result = self.track_result()?;
        let token = &self.token.access_token;

        let playlist = api
            .create_playlist(
                token,
                &self.profile.id,
                &utils::top_items_title(&result.request),
                PLAYLIST_DESCRIPTION,
                true,
            )
            .await?;

        let uris = result.uris();
        if !uris.is_empty() {
            api.add_tracks_to_playlist(token, &playlist.id, &uris, 0)
                .await?;
        }

        Ok(playlist)
    }

    fn track_result(&self) -> Result<&TopItems> {
        let result = self.last_result.as_ref().ok_or(Error::NoResult)?;
        if result.request.item_type != ItemType::Tracks {
            return Err(Error::NotTracks);
        }
        Ok(result)
    }
}

/// Stores a new verifier and sends the user to the authorization endpoint.
///
/// The verifier must be persisted before navigating away: the step that
/// receives the code cannot regenerate it.
pub async fn redirect_to_auth_code_flow(
    config: &Config,
    store: &VerifierStore,
    redirect: &dyn Redirect,
) -> Result<Url> {
    let verifier = utils::generate_code_verifier(utils::CODE_VERIFIER_LENGTH)?;
    let challenge = utils::generate_code_challenge(&verifier);

    store.save(&verifier).await?;

    let url = utils::build_authorization_url(
        &config.auth_url,
        &config.client_id,
        &config.redirect_uri,
        &config.scopes,
        &challenge,
    )?;

    redirect.redirect(&url)?;
    Ok(url)
}
