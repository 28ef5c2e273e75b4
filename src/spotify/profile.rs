use super::{SpotifyApi, read_json};
use crate::{error::Result, types::Profile};

impl SpotifyApi {
    /// Fetches the profile of the user the token belongs to (`GET /me`).
    pub async fn fetch_profile(&self, token: &str) -> Result<Profile> {
        let res = self
            .client
            .get(self.endpoint("/me"))
            .bearer_auth(token)
            .send()
            .await?;

        read_json(res).await
    }
}
