//! Banner and health check at the server root.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub const FEATURES: [&str; 9] = [
    "Trend Prediction (Groq AI)",
    "Advanced Trend Analysis (Web Scraping)",
    "AI Design Generator (SDXL)",
    "Fabric Recommendations",
    "Fabric Recommender Agent",
    "Color Palette Generator",
    "Personal Stylist Chat",
    "Smart Pricing Strategy",
    "Knowledge Bookmarks",
];

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "VastraVaani AI Platform v3.0",
        "status": "running",
        "features": FEATURES,
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let keys = &state.config.api_keys;
    let groq_configured = state.llm_config.read().groq_api_key.is_some();

    Json(json!({
        "status": "healthy",
        "groq_configured": groq_configured,
        "apify_configured": keys.apify.is_some(),
        "huggingface_configured": keys.huggingface.is_some(),
        "serpapi_configured": keys.serpapi.is_some(),
    }))
}
