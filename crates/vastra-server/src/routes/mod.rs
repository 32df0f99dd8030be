//! HTTP route handlers, one module per tool, mounted under `/api/<tool>`.

pub mod ar_tryon;
pub mod auth;
pub mod bookmarks;
pub mod color_pattern;
pub mod design;
pub mod design_generator;
pub mod fabric_recommender;
pub mod fabrics;
pub mod llm;
pub mod pricing;
pub mod stylist;
pub mod system;
pub mod trends;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Largest accepted request body (image uploads, base64 payloads).
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(system::routes())
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/advanced-trends", trends::routes())
        .nest("/stylist", stylist::routes())
        .nest("/pricing", pricing::routes())
        .nest("/bookmarks", bookmarks::routes())
        .nest("/design-generator", design_generator::routes())
        .nest("/fabric-recommender", fabric_recommender::routes())
        .nest("/color-pattern-analyzer", color_pattern::routes())
        .nest("/ar-tryon", ar_tryon::routes())
        .nest("/auth", auth::routes())
        .nest("/fabrics", fabrics::routes())
        .nest("/design", design::routes())
        .nest("/llm", llm::routes())
}

/// Credentialed CORS for the configured origins. Any request header is
/// allowed by echoing the preflight's list back.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(3600))
}
