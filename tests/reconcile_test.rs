use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vinylcli::covers::{CoverSource, download_and_save};
use vinylcli::management::{self, CatalogError, CatalogManager};
use vinylcli::types::{CoverChange, Record, RecordChanges};
use vinylcli::utils::cover_basename;

/// Cover source that never touches the network: on success it writes a small
/// file into the covers directory the way the real resolver would.
struct StubSource {
    covers_dir: PathBuf,
    succeed: bool,
}

impl StubSource {
    fn new(covers_dir: &Path, succeed: bool) -> Self {
        Self {
            covers_dir: covers_dir.to_path_buf(),
            succeed,
        }
    }

    fn save_stub_cover(&self, artist: &str, album: &str) -> Option<String> {
        if !self.succeed || artist.trim().is_empty() || album.trim().is_empty() {
            return None;
        }
        let path = self
            .covers_dir
            .join(format!("{}.jpg", cover_basename(artist, album)));
        std::fs::create_dir_all(&self.covers_dir).ok()?;
        std::fs::write(&path, b"stub image bytes").ok()?;
        Some(path.to_string_lossy().into_owned())
    }
}

impl CoverSource for StubSource {
    async fn resolve(&self, artist: &str, album: &str) -> Option<String> {
        self.save_stub_cover(artist, album)
    }

    async fn fetch_url(&self, _url: &str, artist: &str, album: &str) -> Option<String> {
        self.save_stub_cover(artist, album)
    }
}

fn record_with_cover(artist: &str, album: &str, cover: Option<&str>) -> Record {
    let mut record = Record::new(artist, album);
    record.cover_path = cover.map(str::to_string);
    record
}

/// Writes an existing cover file and returns its path, simulating a record
/// that already owns artwork on disk.
fn place_existing_cover(dir: &TempDir, name: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, b"old cover").unwrap();
    path.to_string_lossy().into_owned()
}

fn catalog_in(dir: &TempDir) -> CatalogManager {
    CatalogManager::new(dir.path().join("collection.json"))
}

#[tokio::test]
async fn test_manual_url_success_replaces_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let old_cover = place_existing_cover(&dir, "old.jpg");
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Seefeel", "Quique", Some(&old_cover)))
        .unwrap();

    let source = StubSource::new(dir.path(), true);
    let updated = management::update_record(
        &mut catalog,
        0,
        RecordChanges::default(),
        false,
        Some("https://example.com/art.jpg".to_string()),
        &source,
    )
    .await
    .unwrap();

    let new_cover = updated.cover_path.expect("manual URL should set a cover");
    assert_ne!(new_cover, old_cover);
    assert!(new_cover.ends_with(".jpg"));
    assert!(Path::new(&new_cover).exists());
    // Superseded file is cleaned up
    assert!(!Path::new(&old_cover).exists());
}

#[tokio::test]
async fn test_manual_url_failure_keeps_old_cover() {
    let dir = TempDir::new().unwrap();
    let old_cover = place_existing_cover(&dir, "old.jpg");
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Seefeel", "Quique", Some(&old_cover)))
        .unwrap();

    let source = StubSource::new(dir.path(), false);
    let updated = management::update_record(
        &mut catalog,
        0,
        RecordChanges::default(),
        false,
        Some("https://example.com/art.jpg".to_string()),
        &source,
    )
    .await
    .unwrap();

    // Failure of a manual download retains the previous cover untouched
    assert_eq!(updated.cover_path.as_deref(), Some(old_cover.as_str()));
    assert!(Path::new(&old_cover).exists());
}

#[tokio::test]
async fn test_explicit_clear_nulls_cover_and_removes_file() {
    let dir = TempDir::new().unwrap();
    let old_cover = place_existing_cover(&dir, "old.jpg");
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Seefeel", "Quique", Some(&old_cover)))
        .unwrap();

    let changes = RecordChanges {
        cover_path: CoverChange::Clear,
        ..RecordChanges::default()
    };
    // Even with manage_cover set, an explicit clear wins and no download runs
    let source = StubSource::new(dir.path(), true);
    let updated = management::update_record(&mut catalog, 0, changes, true, None, &source)
        .await
        .unwrap();

    assert_eq!(updated.cover_path, None);
    assert!(!Path::new(&old_cover).exists());
}

#[tokio::test]
async fn test_explicit_set_is_used_verbatim() {
    let dir = TempDir::new().unwrap();
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Seefeel", "Quique", None))
        .unwrap();

    let changes = RecordChanges {
        cover_path: CoverChange::Set("/some/where/quique.png".to_string()),
        ..RecordChanges::default()
    };
    let source = StubSource::new(dir.path(), true);
    let updated = management::update_record(&mut catalog, 0, changes, false, None, &source)
        .await
        .unwrap();

    assert_eq!(updated.cover_path.as_deref(), Some("/some/where/quique.png"));
}

#[tokio::test]
async fn test_auto_lookup_failure_clears_cover() {
    let dir = TempDir::new().unwrap();
    let old_cover = place_existing_cover(&dir, "old.jpg");
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Seefeel", "Quique", Some(&old_cover)))
        .unwrap();

    let source = StubSource::new(dir.path(), false);
    let updated = management::update_record(
        &mut catalog,
        0,
        RecordChanges::default(),
        true,
        None,
        &source,
    )
    .await
    .unwrap();

    // Unlike the manual-URL branch, automatic failure clears the cover
    assert_eq!(updated.cover_path, None);
    assert!(!Path::new(&old_cover).exists());
}

#[tokio::test]
async fn test_auto_lookup_success_uses_new_identity() {
    let dir = TempDir::new().unwrap();
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Seefel", "Quique", None))
        .unwrap();

    // Artist typo fixed in the same update; the cover file must derive from
    // the corrected name
    let changes = RecordChanges {
        artist: Some("Seefeel".to_string()),
        ..RecordChanges::default()
    };
    let source = StubSource::new(dir.path(), true);
    let updated = management::update_record(&mut catalog, 0, changes, true, None, &source)
        .await
        .unwrap();

    assert_eq!(updated.artist, "Seefeel");
    let cover = updated.cover_path.unwrap();
    assert!(cover.contains("Seefeel_Quique"));
    assert!(Path::new(&cover).exists());
}

#[tokio::test]
async fn test_no_cover_instruction_leaves_cover_unchanged() {
    let dir = TempDir::new().unwrap();
    let old_cover = place_existing_cover(&dir, "old.jpg");
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Seefeel", "Quique", Some(&old_cover)))
        .unwrap();

    let changes = RecordChanges {
        notes: Some("first pressing".to_string()),
        ..RecordChanges::default()
    };
    let source = StubSource::new(dir.path(), true);
    let updated = management::update_record(&mut catalog, 0, changes, false, None, &source)
        .await
        .unwrap();

    assert_eq!(updated.cover_path.as_deref(), Some(old_cover.as_str()));
    assert_eq!(updated.notes, "first pressing");
    assert!(Path::new(&old_cover).exists());
}

#[tokio::test]
async fn test_out_of_range_index_mutates_nothing() {
    let dir = TempDir::new().unwrap();
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Seefeel", "Quique", None))
        .unwrap();
    let before: Vec<Record> = catalog.records().to_vec();

    let source = StubSource::new(dir.path(), true);
    let result = management::update_record(
        &mut catalog,
        7,
        RecordChanges::default(),
        true,
        None,
        &source,
    )
    .await;

    assert!(matches!(result, Err(CatalogError::IndexOutOfRange(7))));
    assert_eq!(catalog.records(), &before[..]);
}

#[tokio::test]
async fn test_repair_missing_covers_counts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("collection.json");
    let present_cover = place_existing_cover(&dir, "present.jpg");

    // One healthy cover, one null, one dangling path, one record without an
    // artist (only reachable through the file format, add() validates)
    let json = format!(
        r#"[
            {{"artist": "Autechre", "album": "Amber", "genre": "", "year": "", "format": "", "notes": "", "cover_path": {:?}}},
            {{"artist": "Burial", "album": "Untrue", "genre": "", "year": "", "format": "", "notes": "", "cover_path": null}},
            {{"artist": "Plaid", "album": "Not for Threes", "genre": "", "year": "", "format": "", "notes": "", "cover_path": "/nowhere/gone.jpg"}},
            {{"artist": "", "album": "Mystery Album", "genre": "", "year": "", "format": "", "notes": "", "cover_path": null}}
        ]"#,
        present_cover
    );
    std::fs::write(&path, json).unwrap();
    let mut catalog = CatalogManager::load(path).await;

    let source = StubSource::new(dir.path(), true);
    let (missing, downloaded) = management::repair_missing_covers(&mut catalog, &source).await;

    // Null, dangling and artist-less records count as missing; only the two
    // with full identity get a download
    assert_eq!(missing, 3);
    assert_eq!(downloaded, 2);

    assert_eq!(
        catalog.get(0).unwrap().cover_path.as_deref(),
        Some(present_cover.as_str())
    );
    assert!(catalog.get(1).unwrap().cover_path.is_some());
    let repaired = catalog.get(2).unwrap().cover_path.clone().unwrap();
    assert!(Path::new(&repaired).exists());
    assert_eq!(catalog.get(3).unwrap().cover_path, None);
}

#[tokio::test]
async fn test_repair_missing_covers_with_failing_source() {
    let dir = TempDir::new().unwrap();
    let mut catalog = catalog_in(&dir);
    catalog
        .add(record_with_cover("Autechre", "Amber", None))
        .unwrap();
    catalog
        .add(record_with_cover("Plaid", "Not for Threes", None))
        .unwrap();

    let source = StubSource::new(dir.path(), false);
    let (missing, downloaded) = management::repair_missing_covers(&mut catalog, &source).await;

    assert_eq!(missing, 2);
    assert_eq!(downloaded, 0);
    assert!(catalog.records().iter().all(|r| r.cover_path.is_none()));
}

#[tokio::test]
async fn test_download_and_save_short_circuits_on_existing_file() {
    let dir = TempDir::new().unwrap();
    let covers_dir = dir.path().join("covers");
    std::fs::create_dir_all(&covers_dir).unwrap();
    let existing = covers_dir.join("Seefeel_Quique.jpg");
    std::fs::write(&existing, b"previously downloaded").unwrap();

    // Unroutable URL: the probe fails fast, the extension comes from the URL
    // suffix and the pre-existing file is returned without any fetch
    let client = reqwest::Client::new();
    let saved = download_and_save(
        &client,
        &covers_dir,
        "http://127.0.0.1:1/art/cover.jpg",
        "Seefeel_Quique",
    )
    .await
    .expect("existing file should short-circuit");

    assert_eq!(saved, existing.to_string_lossy());
    assert_eq!(
        std::fs::read(&existing).unwrap(),
        b"previously downloaded"
    );
}

#[tokio::test]
async fn test_download_and_save_unreachable_url_is_none() {
    let dir = TempDir::new().unwrap();
    let covers_dir = dir.path().join("covers");

    let client = reqwest::Client::new();
    let saved = download_and_save(
        &client,
        &covers_dir,
        "http://127.0.0.1:1/art/cover.jpg",
        "Seefeel_Quique",
    )
    .await;

    assert_eq!(saved, None);
}
