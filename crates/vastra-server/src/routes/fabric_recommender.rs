//! Fabric recommender agent: photo analysis, live listings, PDF export.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upload::UploadForm;
use vastra_fabric::{
    image_report, recommend, render_report, report_filename, FabricRecommendations, FabricRequest, ReportRequest,
    SEARCH_ENGINES_USED,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze-image", post(analyze_image))
        .route("/recommend", post(recommend_fabrics))
        .route("/export-pdf", post(export_pdf))
        .route("/status", get(status))
}

// ---------------------------------------------------------------
// Analysis & recommendations
// ---------------------------------------------------------------

async fn analyze_image(multipart: Multipart) -> AppResult<Json<Value>> {
    let mut form = UploadForm::read(multipart).await?;
    let bytes = form.require_file("Invalid image file")?;
    let garment_type = form.field_or("garment_type", "shirt");

    let report = tokio::task::spawn_blocking(move || -> AppResult<Value> {
        let img = vastra_vision::decode_image(&bytes)
            .map_err(|_| AppError::BadRequest("Invalid image file".into()))?;
        let preview = vastra_vision::to_jpeg_data_url(&img)?;
        Ok(image_report(&img, &garment_type, preview))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(report))
}

async fn recommend_fabrics(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FabricRequest>,
) -> Json<FabricRecommendations> {
    let serp = state.serp();
    let llm = state.llm();
    let result = recommend(&req, serp.as_ref(), llm.as_ref()).await;
    info!(count = result.total_count, garment = %req.garment_type, "Fabric recommendations ready");
    Json(result)
}

// ---------------------------------------------------------------
// Export
// ---------------------------------------------------------------

async fn export_pdf(Json(req): Json<ReportRequest>) -> AppResult<Response> {
    let now = chrono::Local::now();
    let pdf = tokio::task::spawn_blocking(move || render_report(&req, now))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(format!("PDF generation failed: {}", e)))?;

    let disposition = format!("attachment; filename={}", report_filename(now));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "Fabric Recommendation Agent v4.0 Ready",
        "version": "4.0",
        "engine": "SerpAPI",
        "features": [
            "SerpAPI Multi-Platform Scraping",
            "Google Shopping Integration",
            "Amazon, Flipkart, AJIO, Myntra, Fabriclore",
            "Computer Vision Analysis",
            "AI Reasoning Generation",
            "PDF Export",
            "Real-Time E-commerce Data",
            "Intelligent Fallbacks",
        ],
        "serpapi_configured": state.config.api_keys.serpapi.is_some(),
        "llm_configured": state.llm_config.read().resolve_provider().is_some(),
        "search_engines": SEARCH_ENGINES_USED,
        "response_time": "30-60 seconds (parallel searches)",
    }))
}
