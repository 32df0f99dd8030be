//! Instant design sketches through Pollinations.

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;
use vastra_design::{pollinations_url, SimpleDesignRequest};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(generate_design))
}

async fn generate_design(Json(req): Json<SimpleDesignRequest>) -> Json<Value> {
    let image_url = pollinations_url(&req.description, &req.style);
    Json(json!({
        "success": true,
        "description": req.description,
        "style": req.style,
        "image_url": image_url,
        "download_url": image_url,
        "model": "Pollinations AI (Free)",
    }))
}
