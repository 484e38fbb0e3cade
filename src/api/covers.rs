use std::sync::Arc;

use axum::{
    Extension,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    api::records::redirect_with_msg,
    management,
    server::AppState,
    types::{CoverChange, RecordChanges},
    utils, warning,
};

/// Streams a file from the covers directory. Only bare filenames are
/// accepted; anything that could traverse out of the directory is rejected.
pub async fn serve_cover(
    Path(filename): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let path = state.source.covers_dir().join(&filename);
    match async_fs::read(&path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, utils::content_type_for_filename(&filename))],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Deletes only the cover file for a record and nulls its cover path. Covers
/// the "path set but file already gone" case by still clearing the path.
pub async fn delete_cover(
    Path(index): Path<usize>,
    Extension(state): Extension<Arc<AppState>>,
) -> Redirect {
    let mut catalog = state.catalog.lock().await;

    let record = match catalog.get(index) {
        Some(record) => record.clone(),
        None => return redirect_with_msg(&format!("Record with index {} not found.", index)),
    };

    let Some(cover_path) = record.cover_path.clone() else {
        return redirect_with_msg(&format!("Record '{}' has no cover path set.", record.album));
    };

    let file_was_present = async_fs::metadata(&cover_path).await.is_ok();

    let changes = RecordChanges {
        cover_path: CoverChange::Clear,
        ..RecordChanges::default()
    };
    if let Err(e) =
        management::update_record(&mut catalog, index, changes, false, None, &state.source).await
    {
        return redirect_with_msg(&format!("Failed to update record: {}", e));
    }

    if let Err(e) = catalog.persist().await {
        warning!("Failed to save collection: {}", e);
        return redirect_with_msg(&format!("Cover removed but saving failed: {}", e));
    }

    if file_was_present {
        redirect_with_msg(&format!(
            "Cover file for '{}' deleted and path removed.",
            record.album
        ))
    } else {
        redirect_with_msg(&format!(
            "Cover file for '{}' was not found on disk; path removed.",
            record.album
        ))
    }
}

/// Runs the missing-cover sweep and saves the collection when new covers
/// were downloaded.
pub async fn repair_covers(Extension(state): Extension<Arc<AppState>>) -> Redirect {
    let mut catalog = state.catalog.lock().await;
    let (missing, downloaded) =
        management::repair_missing_covers(&mut catalog, &state.source).await;

    if downloaded > 0 {
        if let Err(e) = catalog.persist().await {
            warning!("Failed to save collection: {}", e);
            return redirect_with_msg(&format!(
                "Downloaded {} covers but saving failed: {}",
                downloaded, e
            ));
        }
        redirect_with_msg(&format!(
            "Checked for missing covers. Found {}, downloaded {}. Collection saved.",
            missing, downloaded
        ))
    } else {
        redirect_with_msg(&format!(
            "Checked for missing covers. Found {}, downloaded {}.",
            missing, downloaded
        ))
    }
}
