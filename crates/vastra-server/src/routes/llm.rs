//! LLM provider settings shared by every AI tool.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use crate::auth::AuthUser;
use crate::state::AppState;
use vastra_chat::providers;
use vastra_chat::types::{LLMConfigUpdate, TestKeyRequest};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/config", get(get_config).put(update_config))
        .route("/config/test", post(test_key))
}

async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.llm_config.read().to_response())
}

/// Server-wide settings: only accounts listed in `ADMIN_EMAILS` may change them.
async fn update_config(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(update): Json<LLMConfigUpdate>,
) -> impl IntoResponse {
    if !state.config.is_admin(&auth.email) {
        warn!(user = %auth.email, "Rejected LLM config update from non-admin");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "detail": "Admin access required" })),
        );
    }

    let mut live = state.llm_config.write();
    let mut config = (*live).clone();
    config.apply_update(&update);

    if let Err(e) = config.save() {
        warn!("Failed to save LLM config: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": format!("Failed to save config: {}", e) })),
        );
    }
    info!(user = %auth.email, provider = %config.preferred_provider, "LLM config updated");

    let response = json!(config.to_response());
    *live = config;
    (StatusCode::OK, Json(response))
}

async fn test_key(Json(req): Json<TestKeyRequest>) -> impl IntoResponse {
    match providers::test_api_key(&req.provider, &req.api_key).await {
        Ok(()) => Json(json!({ "success": true })),
        Err(e) => Json(json!({ "success": false, "error": e })),
    }
}
