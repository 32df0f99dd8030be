//! Pricing strategy suggestions.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::advisor::{pricing_prompt, PricingRequest};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/suggest", post(suggest_pricing))
}

async fn suggest_pricing(State(state): State<Arc<AppState>>, Json(req): Json<PricingRequest>) -> AppResult<Json<Value>> {
    let llm = state.llm().ok_or_else(AppError::no_llm)?;
    let strategy = llm.prompt(&pricing_prompt(&req), 0.6, 700).await?;

    Ok(Json(json!({
        "success": true,
        "product": req.product_name,
        "cost": req.cost,
        "strategy": strategy,
        "model": llm.model_label(),
    })))
}
