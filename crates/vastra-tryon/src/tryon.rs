//! Full try-on generation: avatar, fit, fabric and the encoded scene configs.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::body::avatar;
use crate::fabric::fabric_physics;
use crate::fit::{adjustments, fit_metrics, fit_score, size_recommendation, FitMetrics, Size};
use crate::scene::{ar_config, encode_json, glb_export, three_js_config};
use crate::types::TryOnRequest;
use vastra_core::{local_timestamp, Result};

#[derive(Debug, Clone, Serialize)]
pub struct FitRecommendation {
    pub size_recommendation: Size,
    pub fit_score: f64,
    pub adjustments_needed: Vec<String>,
    pub length_recommendation: String,
    pub width_recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TryOnResponse {
    pub success: bool,
    /// Base64 of the Three.js scene JSON.
    pub try_on_model_base64: String,
    pub fit_recommendations: FitRecommendation,
    /// Physics parameters, or `{}` when no fabric was given.
    pub fabric_simulation: Value,
    pub visualizations: Vec<String>,
    /// Base64 of the WebXR session JSON.
    pub ar_preview: String,
    /// Base64 of the glTF export JSON.
    pub downloadable_glb: String,
    pub fit_metrics: FitMetrics,
    pub timestamp: String,
}

pub fn generate_tryon(req: &TryOnRequest) -> Result<TryOnResponse> {
    req.validate()?;
    let measurements = &req.user_avatar.measurements;
    let prefs = &req.preferences;

    let body = avatar(measurements, &req.user_avatar.skin_tone);
    let size = size_recommendation(measurements);
    let physics = req.fabric_properties.as_ref().map(fabric_physics);

    let model = encode_json(&three_js_config(&body, prefs.garment_category, &prefs.color))?;
    let ar_preview = encode_json(&ar_config(&model))?;
    let timestamp = local_timestamp();
    let glb = encode_json(&glb_export(&body, &prefs.color, physics.as_ref(), &timestamp))?;

    info!(
        size = ?size,
        garment = prefs.garment_category.as_str(),
        "Try-on generated"
    );

    Ok(TryOnResponse {
        success: true,
        fit_recommendations: FitRecommendation {
            size_recommendation: size,
            fit_score: fit_score(measurements, size),
            adjustments_needed: adjustments(measurements, prefs.garment_category),
            length_recommendation: "standard".into(),
            width_recommendation: "standard".into(),
        },
        fabric_simulation: physics.map_or_else(|| json!({}), |p| json!(p)),
        visualizations: vec![model.clone(), ar_preview.clone()],
        try_on_model_base64: model,
        ar_preview,
        downloadable_glb: glb,
        fit_metrics: fit_metrics(measurements, size),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{fabric, measurements};
    use crate::types::{FabricType, GarmentCategory};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use vastra_core::Error;

    fn request(with_fabric: bool) -> TryOnRequest {
        let mut value = json!({
            "user_avatar": {
                "avatar_type": "3d",
                "measurements": measurements(),
                "skin_tone": "#C68642",
                "body_shape": "auto"
            },
            "garment_model": {"model_type": "gown", "model_format": "glb"},
            "preferences": {"garment_category": "dress", "color": "#1d4ed8"}
        });
        if with_fabric {
            value["fabric_properties"] = json!(fabric(FabricType::Silk, 90.0, 0.4));
        }
        serde_json::from_value(value).unwrap()
    }

    fn decode(b64: &str) -> Value {
        serde_json::from_slice(&STANDARD.decode(b64).unwrap()).unwrap()
    }

    #[test]
    fn test_generate_with_fabric() {
        let res = generate_tryon(&request(true)).unwrap();
        assert!(res.success);
        assert_eq!(res.visualizations, vec![res.try_on_model_base64.clone(), res.ar_preview.clone()]);

        let scene = decode(&res.try_on_model_base64);
        assert_eq!(scene["garment_model"]["type"], "dress");
        assert_eq!(scene["garment_model"]["color"], "#1d4ed8");

        let ar = decode(&res.ar_preview);
        assert_eq!(ar["model_url"], res.try_on_model_base64);

        let glb = decode(&res.downloadable_glb);
        assert_eq!(glb["physics"]["mass"], 0.9);
        assert_eq!(res.fabric_simulation["fold_simulation"], true);
        assert_eq!(res.fit_recommendations.length_recommendation, "standard");
        assert_eq!(res.fit_metrics.size_recommendation, Size::M);
    }

    #[test]
    fn test_generate_without_fabric() {
        let res = generate_tryon(&request(false)).unwrap();
        assert_eq!(res.fabric_simulation, json!({}));
        assert_eq!(decode(&res.downloadable_glb)["physics"], json!({}));
        assert_eq!(res.fit_recommendations.adjustments_needed.len(), 1);
    }

    #[test]
    fn test_invalid_fabric_rejected() {
        let mut req = request(true);
        if let Some(f) = req.fabric_properties.as_mut() {
            f.shine = 2.0;
        }
        assert!(matches!(generate_tryon(&req), Err(Error::Validation(_))));
        assert_eq!(req.preferences.garment_category, GarmentCategory::Dress);
    }
}
