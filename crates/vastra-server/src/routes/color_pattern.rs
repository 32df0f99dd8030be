//! Color & pattern analyzer routes.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::palette::{self, PaletteReport};
use crate::state::AppState;
use crate::upload::UploadForm;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(analyze).get(analyze_hint))
        .route("/health", post(health))
}

async fn analyze(State(state): State<Arc<AppState>>, multipart: Multipart) -> AppResult<Json<PaletteReport>> {
    let mut form = UploadForm::read(multipart).await?;
    let bytes = form.require_file("Error analyzing image: no file uploaded")?;

    let (colors, pattern) = tokio::task::spawn_blocking(move || {
        vastra_vision::decode_image(&bytes).map(|img| palette::inspect(&img))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
    .map_err(|e| AppError::BadRequest(format!("Error analyzing image: {}", e)))?;

    if colors.is_empty() {
        return Err(AppError::BadRequest("Could not extract colors from image".into()));
    }

    let llm = state.llm();
    let recommendations = palette::recommend_colors(llm.as_ref(), &colors, pattern.kind.label()).await;
    Ok(Json(palette::report(colors, pattern, recommendations)))
}

async fn analyze_hint() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Use POST /analyze with an image file for LLM-powered color analysis",
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let llm_available = state.llm_config.read().resolve_provider().is_some();
    Json(json!({ "status": "ok", "llm_available": llm_available }))
}
