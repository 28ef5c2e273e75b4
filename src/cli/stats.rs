use tabled::Table;

use super::{auth::authenticate, spinner};
use crate::{
    Config, error, info,
    management::Session,
    spotify::SpotifyApi,
    stats::AudioReport,
    success,
    types::{FeatureTableRow, ItemType, TopItemTableRow, TopItems, TopItemsRequest},
    utils, warning,
};

/// Shows the user's top items and optionally their audio statistics.
///
/// The limit is checked before anything else; an invalid one prints an
/// inline message and no request is made, not even the authorization.
///
/// `features` adds the statistics block ("show more"). `playlist` saves the
/// list as a playlist and is only honored for tracks.
pub async fn stats(config: &Config, request: TopItemsRequest, features: bool, playlist: bool) {
    if let Err(e) = utils::validate_limit(request.limit) {
        error!("{}", e);
    }

    let tracks = request.item_type == ItemType::Tracks;
    if !tracks && (features || playlist) {
        warning!("Audio features and playlists are only available for tracks. Skipping.");
    }

    let api = SpotifyApi::new(config);
    let mut session = match authenticate(config, &api).await {
        Ok(session) => session,
        Err(e) => error!("Authentication failed: {}", e),
    };
    info!("Logged in as {}", session.profile().name());

    let pb = spinner(&format!("Fetching {}...", utils::top_items_title(&request)));
    let fetched = session.fetch_top_items(&api, request).await;
    pb.finish_and_clear();

    match fetched {
        Ok(result) => print_top_items(result),
        Err(e) => error!("Failed to fetch top {}: {}", request.item_type, e),
    }

    if tracks && features {
        show_audio_summary(&session, &api).await;
    }

    if tracks && playlist {
        save_playlist(&session, &api).await;
    }
}

fn print_top_items(result: &TopItems) {
    info!("{}", utils::top_items_title(&result.request));

    if result.items.is_empty() {
        warning!("Spotify has no top {} for this account yet.", result.request.item_type);
        return;
    }

    let rows: Vec<TopItemTableRow> = result
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| TopItemTableRow {
            rank: i + 1,
            name: item.name.clone(),
            artist: item.artist.clone().unwrap_or_default(),
            popularity: item.popularity.map(|p| p.to_string()).unwrap_or_default(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

async fn show_audio_summary(session: &Session, api: &SpotifyApi) {
    let pb = spinner("Fetching audio features...");
    let summary = session.audio_summary(api).await;
    pb.finish_and_clear();

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => {
            warning!("Failed to fetch audio features: {}", e);
            return;
        }
    };

    if let Some(result) = session.last_result() {
        let returned = result.items.len() as i64;
        if returned < summary.limit {
            warning!(
                "Only {} of {} tracks returned; averages are still taken over {}.",
                returned,
                summary.limit,
                summary.limit
            );
        }
    }

    println!("{}", Table::new(feature_rows(&summary.report())));
}

fn feature_rows(report: &AudioReport) -> Vec<FeatureTableRow> {
    let percent = |name: &str, value: i64| FeatureTableRow {
        feature: name.to_string(),
        value: format!("{}%", value),
    };

    vec![
        percent("acousticness", report.acousticness),
        percent("danceability", report.danceability),
        percent("energy", report.energy),
        percent("valence", report.valence),
        FeatureTableRow {
            feature: "tempo".to_string(),
            value: format!("{} bpm", report.tempo),
        },
    ]
}

async fn save_playlist(session: &Session, api: &SpotifyApi) {
    let pb = spinner("Creating playlist...");
    let created = session.save_as_playlist(api).await;
    pb.finish_and_clear();

    match created {
        Ok(playlist) => success!("Playlist {} created.", playlist.name),
        Err(e) => warning!("Failed to create playlist: {}", e),
    }
}
