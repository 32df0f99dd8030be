//! Advanced trend analysis over scraped Instagram and Pinterest posts.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::state::AppState;
use vastra_trends::{analyze_trends, TrendReport, TrendRequest};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze-advanced", post(analyze_advanced))
        .route("/status", get(scraper_status))
}

async fn analyze_advanced(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrendRequest>,
) -> AppResult<Json<TrendReport>> {
    let apify = state.apify();
    let llm = state.llm();
    let report = analyze_trends(&req, apify.as_ref(), llm.as_ref(), &state.http).await?;
    Ok(Json(report))
}

async fn scraper_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let configured = state.config.api_keys.apify.is_some();
    Json(json!({
        "status": if configured { "Ready" } else { "Not configured" },
        "apify_api_key_set": configured,
        "scraping_method": "Apify actor API",
        "platforms": ["instagram", "pinterest"],
    }))
}
