//! Configuration management for topstats.
//!
//! This module loads configuration values from environment variables and an
//! optional `.env` file, and gathers them into a [`Config`] value that is
//! passed explicitly to every component that needs it.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (everything except the client ID)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::error::{Error, Result};

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5173/callback";
pub const DEFAULT_SCOPE: &str =
    "user-read-private user-read-email user-top-read playlist-modify-public";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5173";
pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 120;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `topstats` data directory if it doesn't exist and loads the
/// `.env` file located there. A missing file is not an error; every value
/// except the client ID has a default.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/topstats/.env`
/// - macOS: `~/Library/Application Support/topstats/.env`
/// - Windows: `%LOCALAPPDATA%/topstats/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists
/// but cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// Platform specific data directory of the application.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("topstats");
    path
}

/// Runtime configuration of the client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Client ID of the application registered with Spotify.
    pub client_id: String,
    /// Must match the redirect URI registered with the application exactly.
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    /// Versioned Web API base, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// Bind address of the local callback server.
    pub server_addr: SocketAddr,
    pub callback_timeout: Duration,
}

impl Config {
    /// Builds a configuration with defaults for everything but the client ID.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scopes: split_scope(DEFAULT_SCOPE),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: SocketAddr::from(([127, 0, 0, 1], 5173)),
            callback_timeout: Duration::from_secs(DEFAULT_CALLBACK_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `SPOTIFY_API_AUTH_CLIENT_ID` is unset or empty, or when
    /// `SERVER_ADDRESS` / `AUTH_CALLBACK_TIMEOUT_SECS` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::Config("SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string()))?;

        let server_addr = var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let server_addr = SocketAddr::from_str(&server_addr)
            .map_err(|e| Error::Config(format!("invalid SERVER_ADDRESS {}: {}", server_addr, e)))?;

        let timeout = var_or(
            "AUTH_CALLBACK_TIMEOUT_SECS",
            &DEFAULT_CALLBACK_TIMEOUT_SECS.to_string(),
        );
        let timeout = timeout.parse::<u64>().map_err(|e| {
            Error::Config(format!("invalid AUTH_CALLBACK_TIMEOUT_SECS {}: {}", timeout, e))
        })?;

        Ok(Self {
            client_id,
            redirect_uri: var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scopes: split_scope(&var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)),
            auth_url: var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: var_or("SPOTIFY_API_URL", DEFAULT_API_URL),
            server_addr,
            callback_timeout: Duration::from_secs(timeout),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn split_scope(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(str::to_string).collect()
}
