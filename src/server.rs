use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{api, config, covers::ItunesCoverSource, error, info, management::CatalogManager};

/// Shared state for the web interface.
///
/// The catalog sits behind a single mutex: load-mutate-save sequences hold
/// the lock for their whole duration, which is the single-writer
/// serialization the otherwise single-actor core needs when embedded in a
/// multi-request server.
pub struct AppState {
    pub catalog: Mutex<CatalogManager>,
    pub source: ItunesCoverSource,
}

pub async fn start_web_server() {
    let catalog = CatalogManager::load(config::collection_file()).await;
    let source = ItunesCoverSource::new(config::search_apiurl(), config::covers_dir());
    let state = Arc::new(AppState {
        catalog: Mutex::new(catalog),
        source,
    });

    let app = Router::new()
        .route("/", get(api::index))
        .route("/add", get(api::add_form).post(api::add_submit))
        .route("/edit/{index}", get(api::edit_form).post(api::edit_submit))
        .route("/delete/{index}", post(api::delete_record))
        .route("/covers/repair", post(api::repair_covers))
        .route("/covers/delete/{index}", post(api::delete_cover))
        .route("/covers/{filename}", get(api::serve_cover))
        .route("/health", get(api::health))
        .layer(Extension(state));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    info!("Serving record collection on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
