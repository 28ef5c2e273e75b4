//! Spotify Top Items CLI Library
//!
//! This library authenticates against the Spotify Web API with the OAuth 2.0
//! Authorization Code flow with PKCE, fetches the user's top tracks or
//! artists, derives audio feature statistics from them and can save them as a
//! playlist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The crate wide error type
//! - `management` - Verifier storage and the authenticated session
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `stats` - Audio feature statistics
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and small utilities
//!
//! # Example
//!
//! ```
//! use topstats::{Config, config, spotify::SpotifyApi};
//!
//! #[tokio::main]
//! async fn main() -> topstats::Result<()> {
//!     config::load_env().await?;
//!     let config = Config::from_env()?;
//!     let api = SpotifyApi::new(&config);
//!     // Run the handshake through `management::Session`...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod stats;
pub mod types;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};

/// Prints a status line prefixed with a blue `[o]`.
///
/// Takes the same arguments as `println!`.
///
/// ```ignore
/// info!("Logged in as {}", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a completion line prefixed with a green `[✓]`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `[!]` line to stderr and exits with status 1.
///
/// Only the CLI layer uses this; library code returns [`Error`] instead.
/// The expansion diverges, so it can stand in any `match` arm:
///
/// ```ignore
/// let session = match authenticate(&config, &api).await {
///     Ok(session) => session,
///     Err(e) => error!("Authentication failed: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `[!]` line to stderr for recoverable problems.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
