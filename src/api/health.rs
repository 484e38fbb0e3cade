use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let catalog = state.catalog.lock().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "records": catalog.len()
    }))
}
