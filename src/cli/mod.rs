//! # CLI Module
//!
//! The presentation layer of topstats. It is the only module that prints to
//! the terminal; everything below it returns data or a [`crate::Error`] and
//! leaves the rendering to these commands.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify OAuth 2.0 PKCE handshake and greets the user
//! - [`stats`] - Shows top tracks or artists, optionally with audio feature
//!   statistics, and can save the tracks as a playlist
//!
//! ## Session Lifetime
//!
//! Every command authenticates on its own. The access token is held in
//! memory for the duration of the command and is never written to disk; the
//! only persisted value is the PKCE verifier, and only between the redirect
//! and the code exchange.
//!
//! ## Usage Patterns
//!
//! ```bash
//! topstats auth
//! topstats stats --type tracks --range short_term --limit 20
//! topstats stats --type tracks --limit 50 --features --playlist
//! topstats stats --type artists --range long_term
//! ```
//!
//! ## Error Presentation
//!
//! - Validation errors are printed inline before any network call
//! - Failures of the main request terminate with the `error!` macro
//! - Failures of optional steps (statistics, playlist) print a warning

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod auth;
mod stats;

pub use auth::BrowserRedirect;
pub use auth::auth;
pub use auth::authenticate;
pub use stats::stats;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
