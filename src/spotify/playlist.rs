use super::{SpotifyApi, read_json};
use crate::{
    error::Result,
    types::{
        AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, CreatePlaylistRequest, Playlist,
    },
};

impl SpotifyApi {
    /// Creates a playlist on the account of `user_id`.
    ///
    /// Calls `POST /users/{user_id}/playlists` with a JSON body of `name`,
    /// `description` and `public`. Creating a public playlist requires the
    /// `playlist-modify-public` scope.
    pub async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
        };

        let res = self
            .client
            .post(self.endpoint(&format!("/users/{}/playlists", user_id)))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        read_json(res).await
    }

    /// Inserts `uris` into a playlist at `position`, keeping their order.
    ///
    /// Returns the snapshot ID of the playlist after the change. Spotify
    /// accepts at most 100 URIs per request; top item lists never exceed 50.
    pub async fn add_tracks_to_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
        position: u32,
    ) -> Result<String> {
        let body = AddTracksToPlaylistRequest {
            uris: uris.to_vec(),
            position,
        };

        let res = self
            .client
            .post(self.endpoint(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let added: AddTracksToPlaylistResponse = read_json(res).await?;
        Ok(added.snapshot_id)
    }
}
