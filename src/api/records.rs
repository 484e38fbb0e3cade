use std::{collections::HashMap, path::Path as FsPath, sync::Arc};

use axum::{
    Extension,
    extract::{Form, Path, Query},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    management,
    server::AppState,
    types::{CoverChange, Record, RecordChanges},
    utils::escape_html,
    warning,
};

/// Fields submitted by the add and edit forms. The cover controls only
/// appear on the edit form; checkboxes are absent from the body when
/// unchecked.
#[derive(Debug, Deserialize)]
pub struct RecordForm {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
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
    pub manage_cover: Option<String>,
    #[serde(default)]
    pub manual_cover_url: Option<String>,
}

pub async fn index(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Html<String> {
    let catalog = state.catalog.lock().await;

    let mut rows = String::new();
    for (i, record) in catalog.records().iter().enumerate() {
        rows.push_str(&render_row(i, record));
    }

    let body = if catalog.is_empty() {
        "<p>Your collection is empty.</p>".to_string()
    } else {
        format!(
            "<table>\
             <tr><th></th><th>#</th><th>Artist</th><th>Album</th><th>Genre</th>\
             <th>Year</th><th>Format</th><th>Notes</th><th></th></tr>{}</table>",
            rows
        )
    };

    let actions = "<p><a href=\"/add\">Add record</a> \
         <form method=\"post\" action=\"/covers/repair\" style=\"display:inline\">\
         <button type=\"submit\">Find missing covers</button></form></p>";

    page(
        "Record Collection",
        params.get("msg").map(String::as_str),
        &format!("{}{}", actions, body),
    )
}

pub async fn add_form() -> Html<String> {
    page("Add Record", None, &render_record_form("/add", None, None))
}

pub async fn add_submit(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<RecordForm>,
) -> Response {
    if form.artist.trim().is_empty() || form.album.trim().is_empty() {
        return page(
            "Add Record",
            Some("Artist and Album are required fields."),
            &render_record_form("/add", Some(&form), None),
        )
        .into_response();
    }

    let record = Record {
        artist: form.artist.clone(),
        album: form.album.clone(),
        genre: form.genre,
        year: form.year,
        format: form.format,
        notes: form.notes,
        cover_path: None,
    };

    let mut catalog = state.catalog.lock().await;
    if let Err(e) = catalog.add(record) {
        return redirect_with_msg(&format!("Error adding record: {}", e)).into_response();
    }

    if let Err(e) = catalog.persist().await {
        warning!("Failed to save collection: {}", e);
        return redirect_with_msg(&format!("Record added but saving failed: {}", e))
            .into_response();
    }

    redirect_with_msg(&format!(
        "Record '{}' by {} added successfully!",
        form.album, form.artist
    ))
    .into_response()
}

pub async fn edit_form(
    Path(index): Path<usize>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let catalog = state.catalog.lock().await;
    let Some(record) = catalog.get(index) else {
        return redirect_with_msg(&format!("Record with index {} not found.", index))
            .into_response();
    };

    let form = RecordForm {
        artist: record.artist.clone(),
        album: record.album.clone(),
        genre: record.genre.clone(),
        year: record.year.clone(),
        format: record.format.clone(),
        notes: record.notes.clone(),
        manage_cover: None,
        manual_cover_url: None,
    };

    page(
        &format!("Edit Record {}", index + 1),
        None,
        &render_record_form(
            &format!("/edit/{}", index),
            Some(&form),
            record.cover_path.as_deref(),
        ),
    )
    .into_response()
}

pub async fn edit_submit(
    Path(index): Path<usize>,
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<RecordForm>,
) -> Response {
    if form.artist.trim().is_empty() || form.album.trim().is_empty() {
        return page(
            &format!("Edit Record {}", index + 1),
            Some("Artist and Album are required fields."),
            &render_record_form(&format!("/edit/{}", index), Some(&form), None),
        )
        .into_response();
    }

    let changes = RecordChanges {
        artist: Some(form.artist),
        album: Some(form.album),
        genre: Some(form.genre),
        year: Some(form.year),
        format: Some(form.format),
        notes: Some(form.notes),
        cover_path: CoverChange::Unspecified,
    };
    let manage_cover = form.manage_cover.is_some();
    let manual_url = form
        .manual_cover_url
        .filter(|url| !url.trim().is_empty());

    let mut catalog = state.catalog.lock().await;
    if let Err(e) = management::update_record(
        &mut catalog,
        index,
        changes,
        manage_cover,
        manual_url,
        &state.source,
    )
    .await
    {
        return redirect_with_msg(&format!("Failed to update record {}: {}", index + 1, e))
            .into_response();
    }

    if let Err(e) = catalog.persist().await {
        warning!("Failed to save collection: {}", e);
        return redirect_with_msg(&format!("Record updated but saving failed: {}", e))
            .into_response();
    }

    redirect_with_msg(&format!("Record {} updated successfully!", index + 1)).into_response()
}

pub async fn delete_record(
    Path(index): Path<usize>,
    Extension(state): Extension<Arc<AppState>>,
) -> Redirect {
    let mut catalog = state.catalog.lock().await;
    let removed = match catalog.remove(index) {
        Ok(record) => record,
        Err(e) => return redirect_with_msg(&format!("Failed to delete record: {}", e)),
    };

    if let Err(e) = catalog.persist().await {
        warning!("Failed to save collection: {}", e);
        return redirect_with_msg(&format!("Record deleted but saving failed: {}", e));
    }

    redirect_with_msg(&format!("Record '{}' deleted successfully!", removed.album))
}

pub fn redirect_with_msg(msg: &str) -> Redirect {
    Redirect::to(&format!("/?msg={}", urlencoding::encode(msg)))
}

/// Wraps page content in the shared HTML shell, with an optional message
/// banner.
fn page(title: &str, msg: Option<&str>, body: &str) -> Html<String> {
    let banner = match msg {
        Some(msg) => format!("<p class=\"msg\">{}</p>", escape_html(msg)),
        None => String::new(),
    };

    Html(format!(
        "<!DOCTYPE html><html><head><title>{title}</title><style>\
         body{{font-family:sans-serif;margin:2em}}\
         table{{border-collapse:collapse}}\
         td,th{{border:1px solid #ccc;padding:4px 8px;text-align:left}}\
         img.cover{{height:60px}}\
         .msg{{background:#eef;padding:8px}}\
         </style></head><body><h1>{title}</h1>{banner}{body}</body></html>",
        title = escape_html(title),
        banner = banner,
        body = body,
    ))
}

fn render_row(index: usize, record: &Record) -> String {
    let cover_cell = match cover_filename(record) {
        Some(filename) => format!(
            "<img class=\"cover\" src=\"/covers/{}\" alt=\"cover\">",
            escape_html(&filename)
        ),
        None => String::new(),
    };

    format!(
        "<tr><td>{cover}</td><td>{num}</td><td>{artist}</td><td>{album}</td>\
         <td>{genre}</td><td>{year}</td><td>{format}</td><td>{notes}</td>\
         <td><a href=\"/edit/{index}\">edit</a> \
         <form method=\"post\" action=\"/delete/{index}\" style=\"display:inline\">\
         <button type=\"submit\">delete</button></form> \
         <form method=\"post\" action=\"/covers/delete/{index}\" style=\"display:inline\">\
         <button type=\"submit\">drop cover</button></form></td></tr>",
        cover = cover_cell,
        num = index + 1,
        artist = escape_html(&record.artist),
        album = escape_html(&record.album),
        genre = escape_html(&record.genre),
        year = escape_html(&record.year),
        format = escape_html(&record.format),
        notes = escape_html(&record.notes),
        index = index,
    )
}

/// The covers route serves by bare filename, so strip the directory part of
/// the stored path.
fn cover_filename(record: &Record) -> Option<String> {
    let path = record.cover_path.as_deref()?;
    FsPath::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn render_record_form(action: &str, prefill: Option<&RecordForm>, cover: Option<&str>) -> String {
    let field = |name: &str, value: &str| {
        format!(
            "<p><label>{name}: <input name=\"{name}\" value=\"{value}\"></label></p>",
            name = name,
            value = escape_html(value),
        )
    };

    let empty = String::new();
    let (artist, album, genre, year, format_, notes) = match prefill {
        Some(f) => (&f.artist, &f.album, &f.genre, &f.year, &f.format, &f.notes),
        None => (&empty, &empty, &empty, &empty, &empty, &empty),
    };

    // Cover controls only make sense on the edit form
    let cover_controls = if action.starts_with("/edit/") {
        let preview = match cover.and_then(|p| FsPath::new(p).file_name()) {
            Some(name) => format!(
                "<p>Current cover: <img class=\"cover\" src=\"/covers/{}\"></p>",
                escape_html(&name.to_string_lossy())
            ),
            None => "<p>No cover set.</p>".to_string(),
        };
        format!(
            "{preview}\
             <p><label><input type=\"checkbox\" name=\"manage_cover\"> \
             Fetch cover automatically</label></p>\
             <p><label>Manual cover URL: \
             <input name=\"manual_cover_url\" size=\"60\"></label></p>",
            preview = preview
        )
    } else {
        String::new()
    };

    format!(
        "<form method=\"post\" action=\"{action}\">\
         {artist}{album}{genre}{year}{format_}{notes}{cover_controls}\
         <p><button type=\"submit\">Save</button> <a href=\"/\">Cancel</a></p>\
         </form>",
        action = escape_html(action),
        artist = field("artist", artist),
        album = field("album", album),
        genre = field("genre", genre),
        year = field("year", year),
        format_ = field("format", format_),
        notes = field("notes", notes),
        cover_controls = cover_controls,
    )
}
