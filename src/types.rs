use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: i64,
}

impl Token {
    /// Unix timestamp the token expires at, `None` if it does not fit an `i64`.
    pub fn expires_at(&self) -> Option<i64> {
        i64::try_from(self.expires_in)
            .ok()
            .and_then(|secs| self.obtained_at.checked_add(secs))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
}

impl Profile {
    /// Name to show the user; accounts without a display name fall back to the id.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItemType {
    Tracks,
    Artists,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Tracks => "tracks",
            ItemType::Artists => "artists",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a top items request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopItemsRequest {
    pub item_type: ItemType,
    pub time_range: TimeRange,
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub id: String,
    pub name: String,
    pub uri: String,
    /// Primary artist, tracks only.
    pub artist: Option<String>,
    pub popularity: Option<u32>,
}

/// A fetched top items list together with the request that produced it.
#[derive(Debug, Clone)]
pub struct TopItems {
    pub request: TopItemsRequest,
    pub items: Vec<TopItem>,
}

impl TopItems {
    pub fn uris(&self) -> Vec<String> {
        self.items.iter().map(|item| item.uri.clone()).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopArtistsResponse {
    pub items: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub popularity: Option<u32>,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<SimpleAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleAlbum {
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub popularity: Option<u32>,
}

impl From<TrackObject> for TopItem {
    fn from(track: TrackObject) -> Self {
        // album artist first, then the track's own artist list
        let artist = track
            .album
            .as_ref()
            .and_then(|album| album.artists.first())
            .or_else(|| track.artists.first())
            .map(|a| a.name.clone());

        TopItem {
            id: track.id,
            name: track.name,
            uri: track.uri,
            artist,
            popularity: track.popularity,
        }
    }
}

impl From<ArtistObject> for TopItem {
    fn from(artist: ArtistObject) -> Self {
        TopItem {
            id: artist.id,
            name: artist.name,
            uri: artist.uri,
            artist: None,
            popularity: artist.popularity,
        }
    }
}

#[derive(Tabled)]
pub struct TopItemTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub artist: String,
    pub popularity: String,
}

/// Audio features of a single track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub tempo: f64,
    pub valence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub snapshot_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistRequest {
    pub uris: Vec<String>,
    pub position: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct FeatureTableRow {
    pub feature: String,
    pub value: String,
}

/// What the provider sent to the redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    Denied(String),
}
