use super::{SpotifyApi, read_json};
use crate::{error::Result, types::FeatureSet};

impl SpotifyApi {
    /// Fetches the audio features of one track (`GET /audio-features/{id}`).
    ///
    /// Only track IDs are meaningful here; artist IDs are answered with a
    /// 404 by the service.
    pub async fn fetch_audio_features(&self, token: &str, track_id: &str) -> Result<FeatureSet> {
        let res = self
            .client
            .get(self.endpoint(&format!("/audio-features/{}", track_id)))
            .bearer_auth(token)
            .send()
            .await?;

        read_json(res).await
    }
}
