use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::{
    error::{Error, Result},
    types::TopItemsRequest,
};

/// Verifier length used by the authorization flow.
pub const CODE_VERIFIER_LENGTH: usize = 128;

/// Smallest and largest `limit` accepted by the top items endpoint.
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 50;

/// Generates a PKCE code verifier of `length` alphanumeric characters.
///
/// Uses the thread-local CSPRNG. RFC 7636 allows 43 to 128 characters;
/// anything else is rejected.
pub fn generate_code_verifier(length: usize) -> Result<String> {
    if !(43..=128).contains(&length) {
        return Err(Error::InvalidVerifierLength(length));
    }

    Ok(rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect())
}

/// S256 challenge: URL-safe, unpadded base64 of the SHA-256 of the verifier.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds the provider authorization URL for the PKCE flow.
///
/// The query is form-urlencoded, so the space separated scope list is
/// sent with `+` between the scopes.
pub fn build_authorization_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[String],
    code_challenge: &str,
) -> Result<Url> {
    let mut url = Url::parse(auth_url)
        .map_err(|e| Error::Config(format!("invalid authorization URL {}: {}", auth_url, e)))?;

    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", &scopes.join(" "))
        .append_pair("code_challenge_method", "S256")
        .append_pair("code_challenge", code_challenge);

    Ok(url)
}

pub fn validate_limit(limit: i64) -> Result<()> {
    if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(Error::InvalidLimit(limit))
    }
}

/// Heading of a top items list, e.g. `Top 20 tracks (short term)`.
pub fn top_items_title(request: &TopItemsRequest) -> String {
    format!(
        "Top {} {} ({})",
        request.limit,
        request.item_type,
        request.time_range.as_str().replacen('_', " ", 1)
    )
}
