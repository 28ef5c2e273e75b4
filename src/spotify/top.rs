use super::{SpotifyApi, read_json};
use crate::{
    error::Result,
    types::{
        ItemType, TimeRange, TopArtistsResponse, TopItem, TopItems, TopItemsRequest,
        TopTracksResponse,
    },
    utils,
};

impl SpotifyApi {
    /// Retrieves the user's top tracks or artists.
    ///
    /// Calls `GET /me/top/{type}?time_range={range}&limit={limit}` and
    /// returns the items in the order Spotify ranked them, together with the
    /// request that produced them.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token
    /// * `item_type` - Rank tracks or artists
    /// * `time_range` - Roughly 4 weeks, 6 months or about a year
    /// * `limit` - Number of items to return, 1 to 50
    ///
    /// # Errors
    ///
    /// A `limit` outside 1..=50 fails with [`crate::Error::InvalidLimit`]
    /// before any request is sent. Remote failures are mapped as described in
    /// the [module documentation](super).
    ///
    /// Accounts with little listening history may return fewer items than
    /// `limit`.
    pub async fn fetch_top_items(
        &self,
        token: &str,
        item_type: ItemType,
        time_range: TimeRange,
        limit: i64,
    ) -> Result<TopItems> {
        utils::validate_limit(limit)?;

        let api_url = format!(
            "{uri}/me/top/{kind}?time_range={range}&limit={limit}",
            uri = self.api_url,
            kind = item_type,
            range = time_range,
            limit = limit
        );

        let res = self.client.get(&api_url).bearer_auth(token).send().await?;

        let items: Vec<TopItem> = match item_type {
            ItemType::Tracks => read_json::<TopTracksResponse>(res)
                .await?
                .items
                .into_iter()
                .map(TopItem::from)
                .collect(),
            ItemType::Artists => read_json::<TopArtistsResponse>(res)
                .await?
                .items
                .into_iter()
                .map(TopItem::from)
                .collect(),
        };

        Ok(TopItems {
            request: TopItemsRequest {
                item_type,
                time_range,
                limit,
            },
            items,
        })
    }
}
