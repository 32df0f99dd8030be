//! Quick text-only fabric advice.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::advisor::{quick_fabric_prompt, QuickFabricRequest};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/recommend", post(recommend_fabrics))
}

async fn recommend_fabrics(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuickFabricRequest>,
) -> AppResult<Json<Value>> {
    let llm = state.llm().ok_or_else(AppError::no_llm)?;
    let recommendations = llm.prompt(&quick_fabric_prompt(&req), 0.6, 800).await?;

    Ok(Json(json!({
        "success": true,
        "garment_type": req.garment_type,
        "season": req.season,
        "recommendations": recommendations,
        "model": llm.model_label(),
    })))
}
