use std::{env, net::SocketAddr, sync::Mutex, time::Duration};

use topstats::{Config, Error, config::*};

// Tests in this file share the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: [&str; 8] = [
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_API_REDIRECT_URI",
    "SPOTIFY_API_AUTH_SCOPE",
    "SPOTIFY_API_AUTH_URL",
    "SPOTIFY_API_TOKEN_URL",
    "SPOTIFY_API_URL",
    "SERVER_ADDRESS",
    "AUTH_CALLBACK_TIMEOUT_SECS",
];

/// Runs `f` with exactly the given variables set.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    unsafe {
        for key in VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }
    f()
}

fn assert_defaults(config: &Config) {
    assert_eq!(config.redirect_uri, "http://127.0.0.1:5173/callback");
    assert_eq!(
        config.scopes,
        vec![
            "user-read-private",
            "user-read-email",
            "user-top-read",
            "playlist-modify-public"
        ]
    );
    assert_eq!(config.auth_url, "https://accounts.spotify.com/authorize");
    assert_eq!(config.token_url, "https://accounts.spotify.com/api/token");
    assert_eq!(config.api_url, "https://api.spotify.com/v1");
    assert_eq!(
        config.server_addr,
        "127.0.0.1:5173".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(config.callback_timeout, Duration::from_secs(120));
}

#[test]
fn test_new_uses_defaults() {
    let config = Config::new("client-123");

    assert_eq!(config.client_id, "client-123");
    assert_defaults(&config);
}

#[test]
fn test_from_env_defaults() {
    let config = with_env(&[("SPOTIFY_API_AUTH_CLIENT_ID", "client-123")], Config::from_env)
        .unwrap();

    assert_eq!(config.client_id, "client-123");
    assert_defaults(&config);
}

#[test]
fn test_from_env_overrides() {
    let config = with_env(
        &[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "client-123"),
            ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/cb"),
            ("SPOTIFY_API_AUTH_SCOPE", "user-top-read  playlist-modify-public"),
            ("SPOTIFY_API_URL", "http://127.0.0.1:9000/v1"),
            ("SERVER_ADDRESS", "127.0.0.1:8888"),
            ("AUTH_CALLBACK_TIMEOUT_SECS", "30"),
        ],
        Config::from_env,
    )
    .unwrap();

    assert_eq!(config.redirect_uri, "http://127.0.0.1:8888/cb");
    assert_eq!(config.scopes, vec!["user-top-read", "playlist-modify-public"]);
    assert_eq!(config.api_url, "http://127.0.0.1:9000/v1");
    assert_eq!(config.server_addr.port(), 8888);
    assert_eq!(config.callback_timeout, Duration::from_secs(30));
    // Unset values keep their defaults
    assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
}

#[test]
fn test_from_env_requires_client_id() {
    let missing = with_env(&[], Config::from_env);
    assert!(matches!(missing, Err(Error::Config(_))));

    let blank = with_env(&[("SPOTIFY_API_AUTH_CLIENT_ID", "   ")], Config::from_env);
    assert!(matches!(blank, Err(Error::Config(_))));
}

#[test]
fn test_from_env_rejects_invalid_server_address() {
    let result = with_env(
        &[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "client-123"),
            ("SERVER_ADDRESS", "localhost"),
        ],
        Config::from_env,
    );

    match result {
        Err(Error::Config(message)) => assert!(message.contains("SERVER_ADDRESS")),
        other => panic!("expected Config error, got {:?}", other),
    }
}

#[test]
fn test_from_env_rejects_invalid_timeout() {
    let result = with_env(
        &[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "client-123"),
            ("AUTH_CALLBACK_TIMEOUT_SECS", "two minutes"),
        ],
        Config::from_env,
    );

    match result {
        Err(Error::Config(message)) => assert!(message.contains("AUTH_CALLBACK_TIMEOUT_SECS")),
        other => panic!("expected Config error, got {:?}", other),
    }
}
