use std::collections::HashSet;

use clap::ValueEnum;
use tabled::Table;

use crate::{
    config, error,
    covers::ItunesCoverSource,
    info,
    management::{self, CatalogManager, SearchField},
    success,
    types::{Record, RecordChanges, RecordTableRow},
    warning,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    Artist,
    Year,
}

pub async fn add(record: Record, cover_url: Option<String>, fetch_cover: bool) {
    let mut catalog = CatalogManager::load(config::collection_file()).await;

    let index = match catalog.add(record.clone()) {
        Ok(index) => index,
        Err(e) => error!("Cannot add record: {}", e),
    };

    if cover_url.is_some() || fetch_cover {
        let source = ItunesCoverSource::new(config::search_apiurl(), config::covers_dir());
        // All fields are already in place, only the cover is being resolved
        if let Err(e) = management::update_record(
            &mut catalog,
            index,
            RecordChanges::default(),
            fetch_cover,
            cover_url,
            &source,
        )
        .await
        {
            warning!("Cover lookup failed: {}", e);
        }
    }

    if let Err(e) = catalog.persist().await {
        error!("Failed to save collection: {}", e);
    }
    success!("Added '{}' by {} to your collection.", record.album, record.artist);
}

pub async fn list() {
    let catalog = CatalogManager::load(config::collection_file()).await;
    if catalog.is_empty() {
        info!("Your collection is empty.");
        return;
    }

    let rows: Vec<RecordTableRow> = catalog
        .records()
        .iter()
        .enumerate()
        .map(|(i, r)| RecordTableRow::from_record(i, r))
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

pub async fn search(
    artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    year: Option<String>,
) {
    let catalog = CatalogManager::load(config::collection_file()).await;
    if catalog.is_empty() {
        info!("Your collection is empty.");
        return;
    }

    let criteria = [
        (SearchField::Artist, artist),
        (SearchField::Album, album),
        (SearchField::Genre, genre),
        (SearchField::Year, year),
    ];

    if criteria.iter().all(|(_, term)| term.is_none()) {
        warning!("Give at least one of --artist, --album, --genre or --year.");
        return;
    }

    // Each given criterion narrows the result set
    let mut matches: HashSet<usize> = (0..catalog.len()).collect();
    for (field, term) in criteria {
        if let Some(term) = term {
            let hits: HashSet<usize> = catalog
                .search(field, &term)
                .into_iter()
                .map(|(i, _)| i)
                .collect();
            matches.retain(|i| hits.contains(i));
        }
    }

    if matches.is_empty() {
        info!("No records found matching your search.");
        return;
    }

    let mut indices: Vec<usize> = matches.into_iter().collect();
    indices.sort_unstable();

    let rows: Vec<RecordTableRow> = indices
        .into_iter()
        .filter_map(|i| catalog.get(i).map(|r| RecordTableRow::from_record(i, r)))
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

pub async fn edit(
    number: usize,
    changes: RecordChanges,
    fetch_cover: bool,
    cover_url: Option<String>,
) {
    let Some(index) = number.checked_sub(1) else {
        error!("Record numbers start at 1.");
    };

    let mut catalog = CatalogManager::load(config::collection_file()).await;
    let source = ItunesCoverSource::new(config::search_apiurl(), config::covers_dir());

    let updated = match management::update_record(
        &mut catalog,
        index,
        changes,
        fetch_cover,
        cover_url,
        &source,
    )
    .await
    {
        Ok(record) => record,
        Err(e) => error!("Cannot update record {}: {}", number, e),
    };

    if let Err(e) = catalog.persist().await {
        error!("Failed to save collection: {}", e);
    }
    success!("Updated '{}' by {}.", updated.album, updated.artist);
}

pub async fn delete(number: usize) {
    let Some(index) = number.checked_sub(1) else {
        error!("Record numbers start at 1.");
    };

    let mut catalog = CatalogManager::load(config::collection_file()).await;
    let removed = match catalog.remove(index) {
        Ok(record) => record,
        Err(e) => error!("Cannot delete record {}: {}", number, e),
    };

    if let Err(e) = catalog.persist().await {
        error!("Failed to save collection: {}", e);
    }
    success!("Deleted '{}' by {}.", removed.album, removed.artist);
}

pub async fn sort(key: SortKey) {
    let mut catalog = CatalogManager::load(config::collection_file()).await;
    if catalog.is_empty() {
        info!("Your collection is empty.");
        return;
    }

    match key {
        SortKey::Artist => catalog.sort_by_artist(),
        SortKey::Year => catalog.sort_by_year(),
    }

    if let Err(e) = catalog.persist().await {
        error!("Failed to save collection: {}", e);
    }
    success!("Collection sorted by {:?}.", key);
}
