//! 3D AR try-on: body analysis, fabric simulation, fit and scene export.

use std::sync::Arc;

use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppResult;
use crate::state::AppState;
use vastra_tryon::{
    analyze_body, fit_recommendation, generate_tryon, simulate_fabric, BodyAnalysis, BodyMeasurements,
    FabricProperties, FabricSimulation, FabricType, FitReport, GarmentCategory, TryOnRequest, TryOnResponse,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze-body", post(body))
        .route("/simulate-fabric", post(fabric))
        .route("/fit-recommendation", post(fit))
        .route("/generate-tryon", post(tryon))
        .route("/status", get(status))
}

fn default_skin_tone() -> String {
    "#E5BCA8".into()
}
fn default_garment_length() -> f64 {
    80.0
}
fn default_garment_category() -> String {
    "shirt".into()
}

#[derive(Debug, Deserialize)]
struct SkinToneQuery {
    #[serde(default = "default_skin_tone")]
    skin_tone: String,
}

#[derive(Debug, Deserialize)]
struct GarmentLengthQuery {
    #[serde(default = "default_garment_length")]
    garment_length: f64,
}

#[derive(Debug, Deserialize)]
struct GarmentCategoryQuery {
    #[serde(default = "default_garment_category")]
    garment_category: String,
}

async fn body(
    Query(q): Query<SkinToneQuery>,
    Json(measurements): Json<BodyMeasurements>,
) -> AppResult<Json<BodyAnalysis>> {
    measurements.validate()?;
    let analysis = analyze_body(&measurements, &q.skin_tone);
    info!(bmi = analysis.bmi, shape = analysis.body_shape.as_str(), "Body analysis complete");
    Ok(Json(analysis))
}

async fn fabric(
    Query(q): Query<GarmentLengthQuery>,
    Json(fabric): Json<FabricProperties>,
) -> AppResult<Json<FabricSimulation>> {
    fabric.validate()?;
    Ok(Json(simulate_fabric(&fabric, q.garment_length)))
}

async fn fit(
    Query(q): Query<GarmentCategoryQuery>,
    Json(measurements): Json<BodyMeasurements>,
) -> AppResult<Json<FitReport>> {
    measurements.validate()?;
    let garment = GarmentCategory::parse(&q.garment_category)?;
    Ok(Json(fit_recommendation(&measurements, garment)))
}

async fn tryon(Json(req): Json<TryOnRequest>) -> AppResult<Json<TryOnResponse>> {
    Ok(Json(generate_tryon(&req)?))
}

async fn status() -> Json<Value> {
    let garments: Vec<&str> = GarmentCategory::ALL.iter().map(|g| g.as_str()).collect();
    let fabrics: Vec<&str> = FabricType::ALL.iter().map(|f| f.as_str()).collect();

    Json(json!({
        "status": "3D AR Try-On Agent Ready",
        "version": "2.1",
        "features": [
            "Body Measurement Analysis",
            "3D Avatar Generation",
            "Fabric Physics Simulation",
            "Fit Recommendation Engine",
            "Three.js 3D Rendering Config",
            "WebXR AR Preview",
            "GLB Model Export",
            "Multi-angle Visualization",
        ],
        "supported_garments": garments,
        "supported_fabrics": fabrics,
        "ar_ready": true,
        "webxr_compatible": true,
    }))
}
