//! AI design generator: brief → inspiration, summary and prompt → SDXL image.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use vastra_design::{
    download_filename, plan_design, transcode, DesignPlan, DesignRequest, DownloadFormat, ImageGenerationRequest,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-prompt", post(generate_prompt))
        .route("/generate-image", post(generate_image))
        .route("/download-image", post(download_image))
        .route("/status", get(status))
}

async fn generate_prompt(State(state): State<Arc<AppState>>, Json(req): Json<DesignRequest>) -> Json<DesignPlan> {
    let serp = state.serp();
    let llm = state.llm();
    Json(plan_design(&req, serp.as_ref(), llm.as_ref(), &state.http).await)
}

/// Raw SDXL output. Any failure, including a missing token, is reported
/// the same way to the client.
async fn render(state: &AppState, prompt: &str) -> AppResult<Vec<u8>> {
    let sdxl = state.sdxl().ok_or_else(|| {
        warn!("HUGGINGFACE_API_KEY not configured");
        AppError::Internal("Generation failed".into())
    })?;
    sdxl.generate(prompt).await.map_err(|e| {
        warn!("SDXL generation failed: {}", e);
        AppError::Internal("Generation failed".into())
    })
}

async fn generate_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImageGenerationRequest>,
) -> AppResult<Json<Value>> {
    let bytes = render(&state, &req.prompt).await?;
    let image = tokio::task::spawn_blocking(move || {
        vastra_vision::decode_image(&bytes).and_then(|img| vastra_vision::to_png_data_url(&img))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
    .map_err(|e| {
        warn!("SDXL output unusable: {}", e);
        AppError::Internal("Generation failed".into())
    })?;

    Ok(Json(json!({
        "success": true,
        "image": image,
        "timestamp": vastra_core::local_timestamp(),
    })))
}

fn default_format() -> String {
    "png".into()
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    prompt: String,
    #[serde(default = "default_format")]
    format: String,
}

async fn download_image(State(state): State<Arc<AppState>>, Query(q): Query<DownloadQuery>) -> AppResult<Response> {
    let format = DownloadFormat::parse(&q.format)?;
    let bytes = render(&state, &q.prompt).await?;
    let encoded = tokio::task::spawn_blocking(move || transcode(&bytes, format))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| {
            warn!("SDXL output unusable: {}", e);
            AppError::Internal("Generation failed".into())
        })?;

    let disposition = format!("attachment; filename={}", download_filename(chrono::Local::now(), format));
    Ok((
        [
            (header::CONTENT_TYPE, format.mime().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        encoded,
    )
        .into_response())
}

async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "Ready",
        "scraping": "SerpAPI (Google Images)",
        "images": "Real fashion images from Pinterest and Google Images",
        "serpapi_configured": state.config.api_keys.serpapi.is_some(),
        "huggingface_configured": state.config.api_keys.huggingface.is_some(),
    }))
}
