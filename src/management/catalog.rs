use std::{fmt, io::Error, path::PathBuf};

use crate::{types::Record, utils, warning};

#[derive(Debug)]
pub enum CatalogError {
    IoError(Error),
    SerdeError(serde_json::Error),
    IndexOutOfRange(usize),
    MissingField(&'static str),
}

impl From<Error> for CatalogError {
    fn from(err: Error) -> Self {
        CatalogError::IoError(err)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::IoError(e) => write!(f, "I/O error: {}", e),
            CatalogError::SerdeError(e) => write!(f, "serialization error: {}", e),
            CatalogError::IndexOutOfRange(i) => write!(f, "no record at index {}", i + 1),
            CatalogError::MissingField(field) => write!(f, "{} is required", field),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Which record field a search term is matched against. Text fields match by
/// case-insensitive substring, the year matches exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchField {
    Artist,
    Album,
    Genre,
    Year,
}

/// Owns the in-memory ordered record collection and its backing JSON file.
///
/// The whole collection is loaded into memory up front; every mutation only
/// touches the in-memory `Vec`, and [`CatalogManager::persist`] is a separate
/// explicit step. In-memory and on-disk state may diverge until the caller
/// saves.
pub struct CatalogManager {
    path: PathBuf,
    records: Vec<Record>,
}

impl CatalogManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: Vec::new(),
        }
    }

    /// Loads the collection from the backing file. An absent file yields an
    /// empty catalog; an unreadable or corrupt file yields an empty catalog
    /// with a warning. Loading never fails.
    pub async fn load(path: PathBuf) -> Self {
        let records = match async_fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(records) => records,
                Err(e) => {
                    warning!(
                        "Could not decode {}: {}. Starting with an empty collection.",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warning!(
                    "Could not read {}: {}. Starting with an empty collection.",
                    path.display(),
                    e
                );
                Vec::new()
            }
        };

        Self { path, records }
    }

    /// Writes the collection to the backing file as a pretty-printed JSON
    /// array. On failure the in-memory state is left intact and the error is
    /// returned to the caller.
    pub async fn persist(&self) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(CatalogError::IoError)?;
        }

        let json =
            serde_json::to_string_pretty(&self.records).map_err(CatalogError::SerdeError)?;
        async_fs::write(&self.path, json)
            .await
            .map_err(CatalogError::IoError)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record after validating the required fields, returning its
    /// index.
    pub fn add(&mut self, record: Record) -> Result<usize, CatalogError> {
        if record.artist.trim().is_empty() {
            return Err(CatalogError::MissingField("artist"));
        }
        if record.album.trim().is_empty() {
            return Err(CatalogError::MissingField("album"));
        }

        self.records.push(record);
        Ok(self.records.len() - 1)
    }

    /// Replaces the record at `index`. Out of range leaves the catalog
    /// untouched.
    pub fn replace(&mut self, index: usize, record: Record) -> Result<(), CatalogError> {
        if index >= self.records.len() {
            return Err(CatalogError::IndexOutOfRange(index));
        }
        self.records[index] = record;
        Ok(())
    }

    /// Removes and returns the record at `index`. Out of range leaves the
    /// catalog untouched.
    pub fn remove(&mut self, index: usize) -> Result<Record, CatalogError> {
        if index >= self.records.len() {
            return Err(CatalogError::IndexOutOfRange(index));
        }
        Ok(self.records.remove(index))
    }

    /// Returns `(index, record)` pairs matching the term on the given field.
    /// Text fields match on a case-insensitive substring, the year matches
    /// exactly.
    pub fn search(&self, field: SearchField, term: &str) -> Vec<(usize, &Record)> {
        let term_lower = term.to_lowercase();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| match field {
                SearchField::Artist => r.artist.to_lowercase().contains(&term_lower),
                SearchField::Album => r.album.to_lowercase().contains(&term_lower),
                SearchField::Genre => r.genre.to_lowercase().contains(&term_lower),
                SearchField::Year => r.year == term,
            })
            .collect()
    }

    /// Reorders the collection by artist name, case-insensitively. Like every
    /// mutation this only touches memory; the caller persists.
    pub fn sort_by_artist(&mut self) {
        self.records
            .sort_by(|a, b| a.artist.to_lowercase().cmp(&b.artist.to_lowercase()));
    }

    /// Reorders the collection by year. Non-digit years get the lowest sort
    /// key and end up first; see [`utils::year_sort_key`].
    pub fn sort_by_year(&mut self) {
        self.records
            .sort_by_key(|r| utils::year_sort_key(&r.year));
    }
}
