//! Configuration management for the record collection manager.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file. Every setting has a sensible
//! default, so a fresh installation works without any configuration at all.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults
//!
//! Note that these accessors only *produce* values; the catalog and cover
//! components never read configuration themselves and instead take paths and
//! URLs through their constructors.

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Looks for the file in the platform-specific local data directory under
/// `vinylcli/.env`:
/// - Linux: `~/.local/share/vinylcli/.env`
/// - macOS: `~/Library/Application Support/vinylcli/.env`
/// - Windows: `%LOCALAPPDATA%/vinylcli/.env`
///
/// A missing `.env` file is not an error since all settings have defaults.
pub async fn load_env() {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("vinylcli/.env");
    if let Some(parent) = path.parent() {
        if let Err(e) = async_fs::create_dir_all(parent).await {
            crate::warning!("Cannot create data directory: {}", e);
            return;
        }
    }

    let _ = dotenv::from_path(path);
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("vinylcli");
    path
}

/// Returns the path of the JSON file backing the record collection.
///
/// Overridden with the `VINYL_COLLECTION_FILE` environment variable; defaults
/// to `collection.json` in the local data directory.
pub fn collection_file() -> PathBuf {
    env::var("VINYL_COLLECTION_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("collection.json"))
}

/// Returns the directory where downloaded cover-art files are stored.
///
/// Overridden with the `VINYL_COVERS_DIR` environment variable; defaults to
/// `covers/` in the local data directory. Created on demand by the
/// download path, not here.
pub fn covers_dir() -> PathBuf {
    env::var("VINYL_COVERS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("covers"))
}

/// Returns the address the web interface binds to.
///
/// Overridden with the `SERVER_ADDRESS` environment variable.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string())
}

/// Returns the base URL of the album-search endpoint used for cover lookup.
///
/// Overridden with the `COVER_SEARCH_API_URL` environment variable; defaults
/// to the public iTunes Search API.
pub fn search_apiurl() -> String {
    env::var("COVER_SEARCH_API_URL")
        .unwrap_or_else(|_| "https://itunes.apple.com/search".to_string())
}
