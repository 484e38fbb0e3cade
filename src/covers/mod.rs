//! # Covers Module
//!
//! Cover-art acquisition: turning an artist/album pair or an explicit URL
//! into a saved image file in the covers directory.
//!
//! ## Overview
//!
//! Lookup goes through the iTunes Search API: a free-text album search whose
//! top result carries artwork URLs at several resolutions. The highest
//! available resolution wins, with a best-effort string upgrade from the
//! `100x100` thumbnail pattern to `600x600`. Downloads are written to a
//! deterministic filename derived from the sanitized artist and album, so a
//! repeated download of the same record is a no-op.
//!
//! Every failure in this module - network, HTTP status, disk - degrades to
//! "no cover" and a warning. Nothing here is ever fatal to the record
//! operation that triggered it.
//!
//! ## Testing seam
//!
//! The [`CoverSource`] trait is the boundary the update reconciler depends
//! on; tests substitute a stub implementation so reconciliation logic runs
//! without the network.

mod download;
mod search;

pub use download::download_and_save;
pub use search::best_artwork_url;
pub use search::search_artwork_url;

use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::{utils, warning};

/// Source of cover-art files. Both methods return the path of a saved image
/// file, or `None` when no cover could be produced - absence of a cover is
/// always a recoverable condition, never an error.
pub trait CoverSource {
    /// Looks up artwork for an artist/album pair and saves it to disk.
    fn resolve(
        &self,
        artist: &str,
        album: &str,
    ) -> impl std::future::Future<Output = Option<String>> + Send;

    /// Downloads artwork from an explicit URL, naming the file after the
    /// given artist/album pair.
    fn fetch_url(
        &self,
        url: &str,
        artist: &str,
        album: &str,
    ) -> impl std::future::Future<Output = Option<String>> + Send;
}

/// Production [`CoverSource`] backed by the iTunes Search API.
pub struct ItunesCoverSource {
    client: Client,
    api_url: String,
    covers_dir: PathBuf,
}

impl ItunesCoverSource {
    pub fn new(api_url: String, covers_dir: PathBuf) -> Self {
        Self {
            client: Client::new(),
            api_url,
            covers_dir,
        }
    }

    pub fn covers_dir(&self) -> &Path {
        &self.covers_dir
    }
}

impl CoverSource for ItunesCoverSource {
    async fn resolve(&self, artist: &str, album: &str) -> Option<String> {
        if artist.trim().is_empty() || album.trim().is_empty() {
            return None;
        }

        let artwork_url =
            match search_artwork_url(&self.client, &self.api_url, artist, album).await {
                Ok(Some(url)) => url,
                Ok(None) => {
                    warning!("No artwork found for '{}' by {}", album, artist);
                    return None;
                }
                Err(e) => {
                    warning!("Artwork search failed for '{}' by {}: {}", album, artist, e);
                    return None;
                }
            };

        let base = utils::cover_basename(artist, album);
        download_and_save(&self.client, &self.covers_dir, &artwork_url, &base).await
    }

    async fn fetch_url(&self, url: &str, artist: &str, album: &str) -> Option<String> {
        if artist.trim().is_empty() || album.trim().is_empty() {
            return None;
        }

        let base = utils::cover_basename(artist, album);
        download_and_save(&self.client, &self.covers_dir, url, &base).await
    }
}
