//! Three.js scene, WebXR session and GLB export descriptions.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use serde_json::{json, Value};

use crate::body::Avatar;
use crate::fabric::FabricPhysics;
use crate::types::GarmentCategory;
use vastra_core::Result;

pub fn three_js_config(avatar: &Avatar, garment: GarmentCategory, color: &str) -> Value {
    json!({
        "scene": {
            "background": 0xf5f5f5,
            "lighting": {
                "ambient": {"intensity": 0.6, "color": 0xffffff},
                "directional": {"intensity": 0.8, "color": 0xffffff, "position": [5, 10, 7]},
                "point": {"intensity": 0.4, "color": 0xffffff, "position": [-5, 5, 5]}
            }
        },
        "body_model": {
            "geometry": "humanoid",
            "scale": avatar.scale_factors,
            "skin_color": avatar.skin_tone,
            "material": {"type": "phong", "shininess": 30}
        },
        "garment_model": {
            "type": garment.as_str(),
            "color": color,
            "material": {"type": "cloth", "shininess": 50},
            "physics": "cloth_simulation"
        },
        "camera": {"position": [0, 1.5, 3], "target": [0, 1, 0], "fov": 60},
        "controls": {"autoRotate": true, "autoRotateSpeed": 2, "enableZoom": true}
    })
}

/// Immersive-AR session settings; `model` is the base64 scene config.
pub fn ar_config(model: &str) -> Value {
    json!({
        "ar_enabled": true,
        "webxr_required": true,
        "session_mode": "immersive-ar",
        "supported_features": ["dom-overlay", "hit-test", "light-estimation"],
        "required_permissions": ["camera"],
        "model_url": model,
        "scale": 1.0,
        "rotation": [0, 0, 0],
        "position": [0, 0, -1.5],
        "interaction": {
            "rotation_enabled": true,
            "scale_enabled": true,
            "translation_enabled": true
        }
    })
}

/// glTF export description. `created` is passed in so callers control the clock.
pub fn glb_export(avatar: &Avatar, color: &str, physics: Option<&FabricPhysics>, created: &str) -> Value {
    json!({
        "format": "glb",
        "body": {
            "geometry": avatar,
            "materials": {"skin": {"color": avatar.skin_tone, "roughness": 0.4}}
        },
        "garment": {
            "geometry": {"color": color},
            "materials": {
                "fabric": {"color": color, "roughness": 0.7, "metalness": 0}
            }
        },
        "physics": physics.map_or_else(|| json!({}), |p| json!(p)),
        "metadata": {"created": created, "version": "3.0", "format": "glTF 2.0"}
    })
}

/// Serialize to compact JSON and base64 it; the frontend decodes with `atob`.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(STANDARD.encode(serde_json::to_vec(value)?))
}
