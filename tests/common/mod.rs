#![allow(dead_code)]

//! In-process stand-in for the Spotify accounts service and Web API.
//!
//! Every request is recorded so tests can assert on what was (or was not)
//! sent over the wire.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Extension, Json, Router,
    http::{HeaderMap, Method, StatusCode, Uri},
};
use reqwest::Url;
use serde_json::{Value, json};
use topstats::{Config, management::Redirect, spotify::SpotifyApi};

pub const CLIENT_ID: &str = "client-123";
pub const ACCESS_TOKEN: &str = "test-token";
pub const REDIRECT_URI: &str = "http://127.0.0.1:5173/callback";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub form: HashMap<String, String>,
    pub json: Option<Value>,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Behavior {
    /// Number of top items the account has.
    pub available_items: usize,
    pub reject_token: bool,
    pub omit_access_token: bool,
    /// The accounts service answers 503.
    pub token_outage: bool,
    /// `/me` answers 200 with a body lacking the `id` field.
    pub malformed_profile: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            available_items: 2,
            reject_token: false,
            omit_access_token: false,
            token_outage: false,
            malformed_profile: false,
        }
    }
}

struct FakeState {
    behavior: Behavior,
    requests: Mutex<Vec<Recorded>>,
}

pub struct FakeSpotify {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeSpotify {
    pub async fn start() -> Self {
        Self::start_with(Behavior::default()).await
    }

    pub async fn start_with(behavior: Behavior) -> Self {
        let state = Arc::new(FakeState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(handle)
            .layer(Extension(Arc::clone(&state)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::new(CLIENT_ID);
        config.redirect_uri = REDIRECT_URI.to_string();
        config.auth_url = format!("{}/authorize", self.base_url);
        config.token_url = format!("{}/api/token", self.base_url);
        config.api_url = format!("{}/v1", self.base_url);
        config
    }

    pub fn api(&self) -> SpotifyApi {
        SpotifyApi::new(&self.config())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

/// Records every URL it is asked to navigate to.
#[derive(Default)]
pub struct RecordingRedirect {
    pub urls: Mutex<Vec<Url>>,
}

impl Redirect for RecordingRedirect {
    fn redirect(&self, url: &Url) -> topstats::Result<()> {
        self.urls.lock().unwrap().push(url.clone());
        Ok(())
    }
}

fn parse_pairs(encoded: &str) -> HashMap<String, String> {
    Url::parse(&format!("http://fake/?{}", encoded))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

async fn handle(
    Extension(state): Extension<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    let query = parse_pairs(uri.query().unwrap_or_default());
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let is_form = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

    let recorded = Recorded {
        method: method.clone(),
        path: path.clone(),
        query: query.clone(),
        form: if is_form { parse_pairs(&body) } else { HashMap::new() },
        json: serde_json::from_str(&body).ok(),
        authorization: authorization.clone(),
    };
    state.requests.lock().unwrap().push(recorded.clone());

    let behavior = &state.behavior;

    if path == "/api/token" && method == Method::POST {
        if behavior.reject_token {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid authorization code"
                })),
            );
        }
        if behavior.token_outage {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": { "status": 503, "message": "Service unavailable" } })),
            );
        }
        if behavior.omit_access_token {
            return (StatusCode::OK, Json(json!({ "token_type": "Bearer" })));
        }
        return (
            StatusCode::OK,
            Json(json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "Bearer",
                "scope": "user-top-read playlist-modify-public",
                "expires_in": 3600,
                "refresh_token": "refresh"
            })),
        );
    }

    let expected = format!("Bearer {}", ACCESS_TOKEN);
    if authorization.as_deref() != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "status": 401, "message": "Invalid access token" } })),
        );
    }

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    let limit = query
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(20);
    let count = limit.min(behavior.available_items);

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["v1", "me"]) if behavior.malformed_profile => {
            (StatusCode::OK, Json(json!({ "display_name": "Ada" })))
        }
        ("GET", ["v1", "me"]) => (
            StatusCode::OK,
            Json(json!({ "id": "user-1", "display_name": "Ada", "type": "user" })),
        ),
        ("GET", ["v1", "me", "top", "tracks"]) => {
            let items: Vec<Value> = (0..count)
                .map(|i| {
                    json!({
                        "id": format!("t{}", i),
                        "name": format!("Track {}", i),
                        "uri": format!("spotify:track:t{}", i),
                        "popularity": 80 - i as u32,
                        "artists": [{ "id": "a", "name": format!("Track Artist {}", i) }],
                        "album": {
                            "name": "Album",
                            "artists": [{ "id": "b", "name": format!("Album Artist {}", i) }]
                        }
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "items": items, "limit": limit })))
        }
        ("GET", ["v1", "me", "top", "artists"]) => {
            let items: Vec<Value> = (0..count)
                .map(|i| {
                    json!({
                        "id": format!("ar{}", i),
                        "name": format!("Artist {}", i),
                        "uri": format!("spotify:artist:ar{}", i),
                        "popularity": 60,
                        "genres": ["pop"]
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "items": items, "limit": limit })))
        }
        ("GET", ["v1", "audio-features", id]) => {
            let index: f64 = id.trim_start_matches('t').parse().unwrap_or(0.0);
            (
                StatusCode::OK,
                Json(json!({
                    "id": id,
                    "acousticness": 0.5 + 0.2 * index,
                    "danceability": 0.5,
                    "energy": 0.25,
                    "tempo": 100.0 + 40.0 * index,
                    "valence": 0.75,
                    "loudness": -5.0
                })),
            )
        }
        ("POST", ["v1", "users", _, "playlists"]) => {
            let body = recorded.json.unwrap_or_default();
            (
                StatusCode::CREATED,
                Json(json!({
                    "id": "pl-1",
                    "name": body["name"],
                    "description": body["description"],
                    "public": body["public"],
                    "snapshot_id": "snap-0"
                })),
            )
        }
        ("POST", ["v1", "playlists", _, "tracks"]) => {
            (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap-1" })))
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "status": 404, "message": "Not found" } })),
        ),
    }
}
