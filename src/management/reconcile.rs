use crate::{
    covers::CoverSource,
    management::{CatalogError, CatalogManager},
    types::{CoverChange, Record, RecordChanges},
    warning,
};

/// Applies a record mutation: field edits plus cover-art changes, with the
/// precedence rules between explicit cover instructions and automatic lookup.
///
/// Cover precedence, highest first:
///
/// 1. `manual_cover_url` - download via the new artist/album. On failure the
///    old cover path is retained unchanged; the update still succeeds.
/// 2. An explicit [`CoverChange::Clear`] or [`CoverChange::Set`] in `changes`
///    is used verbatim, no download attempted.
/// 3. `manage_cover` - automatic lookup. On failure (or missing artist/album)
///    the cover becomes `None`. Note the asymmetry with the manual-URL
///    branch: automatic failure clears the cover, manual failure keeps it.
/// 4. Otherwise the cover is left as it was.
///
/// If the resolved cover differs from the original and the original path
/// points at an existing file, that file is deleted; a failed deletion is a
/// warning, the update has already logically succeeded. The only hard
/// failure is an out-of-range index, which mutates nothing.
pub async fn update_record<S: CoverSource>(
    catalog: &mut CatalogManager,
    index: usize,
    changes: RecordChanges,
    manage_cover: bool,
    manual_cover_url: Option<String>,
    source: &S,
) -> Result<Record, CatalogError> {
    let current = match catalog.get(index) {
        Some(record) => record.clone(),
        None => return Err(CatalogError::IndexOutOfRange(index)),
    };

    // Cover filenames derive from the post-update identity
    let new_artist = changes.artist.clone().unwrap_or_else(|| current.artist.clone());
    let new_album = changes.album.clone().unwrap_or_else(|| current.album.clone());

    let manual_url = manual_cover_url.filter(|url| !url.trim().is_empty());

    let resolved_cover = if let Some(url) = manual_url {
        match source.fetch_url(&url, &new_artist, &new_album).await {
            Some(path) => Some(path),
            None => {
                warning!(
                    "Manual cover download failed for '{}'; keeping existing cover",
                    new_album
                );
                current.cover_path.clone()
            }
        }
    } else {
        match changes.cover_path.clone() {
            CoverChange::Clear => None,
            CoverChange::Set(path) => Some(path),
            // Automatic lookup failure clears the cover instead of keeping
            // the old one - deliberate, see DESIGN.md
            CoverChange::Unspecified if manage_cover => {
                source.resolve(&new_artist, &new_album).await
            }
            CoverChange::Unspecified => current.cover_path.clone(),
        }
    };

    let merged = Record {
        artist: new_artist,
        album: new_album,
        genre: changes.genre.unwrap_or_else(|| current.genre.clone()),
        year: changes.year.unwrap_or_else(|| current.year.clone()),
        format: changes.format.unwrap_or_else(|| current.format.clone()),
        notes: changes.notes.unwrap_or_else(|| current.notes.clone()),
        cover_path: resolved_cover,
    };

    if merged.cover_path != current.cover_path {
        remove_orphaned_cover(current.cover_path.as_deref()).await;
    }

    catalog.replace(index, merged.clone())?;
    Ok(merged)
}

/// Deletes a superseded cover file if it still exists. Failure to delete is
/// reported but never fails the enclosing update.
async fn remove_orphaned_cover(old_path: Option<&str>) {
    let Some(path) = old_path else {
        return;
    };

    if async_fs::metadata(path).await.is_ok() {
        if let Err(e) = async_fs::remove_file(path).await {
            warning!("Could not delete old cover file {}: {}", path, e);
        }
    }
}

/// Sweeps the catalog for missing covers and downloads what it can.
///
/// A cover is missing when `cover_path` is null or when the referenced file
/// no longer exists on disk. Records with an empty artist or album are
/// counted missing but skipped for download. Records are processed strictly
/// in index order, one at a time; the catalog is mutated in place and the
/// caller is responsible for persisting afterwards.
///
/// Returns `(missing, downloaded)`.
pub async fn repair_missing_covers<S: CoverSource>(
    catalog: &mut CatalogManager,
    source: &S,
) -> (usize, usize) {
    let mut missing = 0;
    let mut downloaded = 0;

    for index in 0..catalog.len() {
        let Some(record) = catalog.get(index) else {
            continue;
        };
        let (artist, album) = (record.artist.clone(), record.album.clone());

        let is_missing = match &record.cover_path {
            None => true,
            Some(path) => async_fs::metadata(path).await.is_err(),
        };
        if !is_missing {
            continue;
        }
        missing += 1;

        if artist.trim().is_empty() || album.trim().is_empty() {
            continue;
        }

        if let Some(path) = source.resolve(&artist, &album).await {
            if let Some(record) = catalog.get(index) {
                let mut updated = record.clone();
                updated.cover_path = Some(path);
                if catalog.replace(index, updated).is_ok() {
                    downloaded += 1;
                }
            }
        }
    }

    (missing, downloaded)
}
