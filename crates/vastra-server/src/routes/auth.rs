//! Account routes: register, login, profile.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use crate::auth::{
    create_access_token, hash_password, verify_password, AuthUser, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use vastra_core::Error as CoreError;
use vastra_store::{NewUser, ProfileUpdate, User};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/test", get(test_auth))
}

fn token_response(state: &AppState, user: User) -> AppResult<Json<LoginResponse>> {
    let access_token = create_access_token(&user.email, &state.config.auth)
        .map_err(|e| AppError::Internal(format!("Token creation failed: {}", e)))?;
    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
        user,
    }))
}

// ---------------------------------------------------------------
// Register / login
// ---------------------------------------------------------------

async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    if state.users.find_by_email(&req.email)?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password = req.password.clone();
    let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
    let user = state
        .users
        .create_user(NewUser {
            name: req.name,
            email: req.email,
            hashed_password,
        })
        .map_err(|e| match e {
            // Lost a race with a concurrent registration
            CoreError::Conflict(msg) => AppError::BadRequest(msg),
            other => other.into(),
        })?;

    info!(user_id = user.id, "Registered account");
    token_response(&state, user)
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    let invalid = || AppError::Unauthorized("Invalid email or password".into());
    let user = state.users.find_by_email(&req.email)?.ok_or_else(invalid)?;

    let password = req.password;
    let hash = user.hashed_password.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !verified {
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Forbidden("Account is inactive. Contact support.".into()));
    }

    token_response(&state, user)
}

// ---------------------------------------------------------------
// Profile
// ---------------------------------------------------------------

async fn get_profile(State(state): State<Arc<AppState>>, auth: AuthUser) -> AppResult<Json<Value>> {
    let user = state
        .users
        .find_by_email(&auth.email)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(json!({ "user": user })))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> AppResult<Json<Value>> {
    let user = state.users.update_profile(&auth.email, &update)?;
    Ok(Json(json!({ "user": user })))
}

async fn test_auth() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Authentication router is working!",
        "endpoints": [
            "POST /auth/register",
            "POST /auth/login",
            "GET /auth/profile?token=...",
            "PUT /auth/profile?token=...",
        ],
    }))
}
