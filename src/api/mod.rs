//! # API Module
//!
//! HTTP endpoints of the local callback server that takes part in the
//! Spotify OAuth 2.0 PKCE flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization server
//!   and records either the authorization `code` or the `error` the user
//!   caused by denying access.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use topstats::api::callback;
//!
//! let app = Router::new().route("/callback", get(callback).layer(Extension(state)));
//! ```

mod callback;

pub use callback::callback;
