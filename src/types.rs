use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One entry in the record collection.
///
/// Artist and album are required non-empty; the remaining text fields may be
/// empty strings. `year` is stored as free text - it is sometimes digits-only
/// and sorted numerically, but nothing enforces that. `cover_path` points at
/// a downloaded artwork file on disk, or is null when the record has no
/// cover. A record's identity is purely its index within the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub cover_path: Option<String>,
}

impl Record {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            genre: String::new(),
            year: String::new(),
            format: String::new(),
            notes: String::new(),
            cover_path: None,
        }
    }
}

/// Three-state cover instruction attached to a record update.
///
/// Distinguishes "the caller said nothing about the cover" from "the caller
/// explicitly cleared it" from "the caller set it to this exact path". The
/// reconciler's precedence rules depend on all three being representable.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CoverChange {
    #[default]
    Unspecified,
    Clear,
    Set(String),
}

/// Field edits to apply to an existing record.
///
/// `None` leaves the corresponding field untouched; the cover field carries
/// its own three-state type instead of a flat `Option`.
#[derive(Debug, Clone, Default)]
pub struct RecordChanges {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub format: Option<String>,
    pub notes: Option<String>,
    pub cover_path: CoverChange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "resultCount")]
    pub result_count: u32,
    pub results: Vec<SearchResult>,
}

/// A single album hit from the iTunes Search API. Only the fields we read
/// are modeled; the API returns many more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "artistName", default)]
    pub artist_name: String,
    #[serde(rename = "collectionName", default)]
    pub collection_name: String,
    #[serde(rename = "artworkUrl100")]
    pub artwork_url_100: Option<String>,
    #[serde(rename = "artworkUrl60")]
    pub artwork_url_60: Option<String>,
    #[serde(rename = "artworkUrl30")]
    pub artwork_url_30: Option<String>,
}

#[derive(Tabled)]
pub struct RecordTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: String,
    pub format: String,
    pub notes: String,
    pub cover: String,
}

impl RecordTableRow {
    /// Builds a display row; `index` is the zero-based catalog index and is
    /// shown one-based, matching the numbering the edit/delete commands take.
    pub fn from_record(index: usize, record: &Record) -> Self {
        Self {
            index: index + 1,
            artist: record.artist.clone(),
            album: record.album.clone(),
            genre: record.genre.clone(),
            year: record.year.clone(),
            format: record.format.clone(),
            notes: record.notes.clone(),
            cover: match &record.cover_path {
                Some(_) => "yes".to_string(),
                None => "-".to_string(),
            },
        }
    }
}
