use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error,
    covers::ItunesCoverSource,
    info,
    management::{self, CatalogManager},
    success,
    types::{CoverChange, RecordChanges},
    warning,
};

/// Sweeps the collection for records with no cover or a dangling cover path
/// and downloads artwork where artist and album allow a lookup. Saves the
/// collection only when something was actually downloaded.
pub async fn repair_covers() {
    let mut catalog = CatalogManager::load(config::collection_file()).await;
    if catalog.is_empty() {
        info!("Your collection is empty.");
        return;
    }

    let source = ItunesCoverSource::new(config::search_apiurl(), config::covers_dir());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Checking for missing covers...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let (missing, downloaded) = management::repair_missing_covers(&mut catalog, &source).await;
    pb.finish_and_clear();

    if downloaded > 0 {
        if let Err(e) = catalog.persist().await {
            error!("Failed to save collection: {}", e);
        }
        success!(
            "Found {} missing covers, downloaded {}. Collection saved.",
            missing,
            downloaded
        );
    } else {
        info!("Found {} missing covers, downloaded 0.", missing);
    }
}

/// Deletes the cover file for one record and nulls its cover path.
pub async fn clear_cover(number: usize) {
    let Some(index) = number.checked_sub(1) else {
        error!("Record numbers start at 1.");
    };

    let mut catalog = CatalogManager::load(config::collection_file()).await;
    let record = match catalog.get(index) {
        Some(record) => record.clone(),
        None => error!("No record at number {}.", number),
    };

    let Some(cover_path) = record.cover_path.clone() else {
        info!("Record '{}' has no cover path set.", record.album);
        return;
    };

    if async_fs::metadata(&cover_path).await.is_err() {
        warning!(
            "Cover file '{}' not found on disk. Removing path from record.",
            cover_path
        );
    }

    let changes = RecordChanges {
        cover_path: CoverChange::Clear,
        ..RecordChanges::default()
    };

    // The reconciler deletes the old file as part of the cover change
    let source = ItunesCoverSource::new(config::search_apiurl(), config::covers_dir());
    if let Err(e) =
        management::update_record(&mut catalog, index, changes, false, None, &source).await
    {
        error!("Cannot update record {}: {}", number, e);
    }

    if let Err(e) = catalog.persist().await {
        error!("Failed to save collection: {}", e);
    }
    success!("Cover for '{}' removed.", record.album);
}
