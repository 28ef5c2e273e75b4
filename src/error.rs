//! Error type shared by every fallible operation in the crate.
//!
//! Every network-calling operation returns [`Result`], so the presentation
//! layer can decide per variant how to surface a failure. Validation errors
//! (see [`Error::is_validation`]) are raised before any request is built.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Limit needs to be between 1 and 50 inclusive.")]
    InvalidLimit(i64),

    #[error("Code verifier length must be between 43 and 128, got {0}.")]
    InvalidVerifierLength(usize),

    #[error("Audio features and playlists are only available for tracks.")]
    NotTracks,

    #[error("No top items fetched yet.")]
    NoResult,

    #[error("No PKCE code verifier stored. Run the authorization again.")]
    MissingVerifier,

    #[error("Authorization callback failed: {0}")]
    Callback(String),

    #[error("Timed out after {0} seconds waiting for the authorization callback.")]
    CallbackTimeout(u64),

    #[error("Spotify rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("Spotify API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Spotify response is missing field `{0}`.")]
    MissingField(&'static str),

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Caller-side mistakes that never reached the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidLimit(_)
                | Error::InvalidVerifierLength(_)
                | Error::NotTracks
                | Error::NoResult
        )
    }
}
