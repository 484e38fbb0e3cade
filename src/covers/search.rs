use std::time::Duration;

use reqwest::Client;

use crate::{
    types::{SearchResponse, SearchResult},
    utils,
};

/// Result limit requested from the search endpoint; only the top hit is
/// inspected but a small window keeps the response cheap.
const SEARCH_LIMIT: u32 = 5;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Queries the album-search endpoint for artwork matching an artist/album
/// pair.
///
/// Sends a combined free-text query and inspects the top result for an
/// artwork URL, preferring higher-resolution variants over lower ones -
/// `artworkUrl100`, then `artworkUrl60`, then `artworkUrl30`, first match
/// wins. A `100x100` thumbnail URL is upgraded to the `600x600` pattern via
/// string substitution where the provider supports it.
///
/// Returns `Ok(None)` when the search succeeds but yields no usable artwork
/// URL; network and HTTP errors are propagated for the caller to absorb.
pub async fn search_artwork_url(
    client: &Client,
    api_url: &str,
    artist: &str,
    album: &str,
) -> Result<Option<String>, reqwest::Error> {
    let term = format!("{} {}", artist, album);
    let limit = SEARCH_LIMIT.to_string();
    let response = client
        .get(api_url)
        .query(&[
            ("term", term.as_str()),
            ("entity", "album"),
            ("limit", limit.as_str()),
        ])
        .timeout(SEARCH_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<SearchResponse>().await?;

    Ok(json.results.first().and_then(best_artwork_url))
}

/// Picks the artwork URL out of one search hit: highest resolution first,
/// first match wins, with the `100x100` thumbnail pattern upgraded to
/// `600x600` where the provider supports it.
pub fn best_artwork_url(result: &SearchResult) -> Option<String> {
    result
        .artwork_url_100
        .as_deref()
        .or(result.artwork_url_60.as_deref())
        .or(result.artwork_url_30.as_deref())
        .map(utils::upgrade_artwork_url)
}
