//! Knowledge bookmarks, addressed by list position.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::state::AppState;
use vastra_store::Bookmark;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(list_bookmarks))
        .route("/add", post(add_bookmark))
        .route("/delete/{index}", delete(delete_bookmark))
}

async fn list_bookmarks(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "success": true, "bookmarks": state.bookmarks.list() }))
}

async fn add_bookmark(State(state): State<Arc<AppState>>, Json(bookmark): Json<Bookmark>) -> AppResult<Json<Value>> {
    state.bookmarks.add(bookmark)?;
    Ok(Json(json!({ "success": true, "message": "Bookmark added" })))
}

async fn delete_bookmark(State(state): State<Arc<AppState>>, Path(index): Path<usize>) -> AppResult<Json<Value>> {
    state.bookmarks.delete(index)?;
    Ok(Json(json!({ "success": true, "message": "Bookmark deleted" })))
}
