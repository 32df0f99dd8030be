//! BMI, body shape and avatar scaling.

use serde::Serialize;

use crate::types::BodyMeasurements;

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let metres = height_cm / 100.0;
    weight_kg / (metres * metres)
}

pub fn health_category(bmi: f64) -> &'static str {
    if bmi > 18.5 && bmi < 25.0 {
        "healthy"
    } else {
        "check_doctor"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyShape {
    Hourglass,
    Pear,
    Apple,
    Rectangle,
    Athletic,
}

impl BodyShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourglass => "hourglass",
            Self::Pear => "pear",
            Self::Apple => "apple",
            Self::Rectangle => "rectangle",
            Self::Athletic => "athletic",
        }
    }
}

/// Classify by chest/hip balance and waist-to-hip ratio. The narrower
/// hourglass band is tested before pear.
pub fn body_shape(m: &BodyMeasurements) -> BodyShape {
    let balanced = (m.chest - m.hip).abs() < 5.0;
    let waist_hip = if m.hip > 0.0 { m.waist / m.hip } else { 0.0 };

    if balanced && m.waist < 0.7 * m.hip {
        BodyShape::Hourglass
    } else if balanced && m.waist < 0.75 * m.hip {
        BodyShape::Pear
    } else if balanced && m.waist > 0.75 * m.hip {
        BodyShape::Apple
    } else if (m.chest - m.hip).abs() > 10.0 && waist_hip > 0.9 {
        BodyShape::Rectangle
    } else {
        BodyShape::Athletic
    }
}

/// Measurements relative to the reference avatar (180 cm tall, 42 cm
/// shoulders, 98/75/100 cm chest/waist/hip).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactors {
    pub height_scale: f64,
    pub width_scale: f64,
    pub chest_scale: f64,
    pub waist_scale: f64,
    pub hip_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreeJsParams {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Avatar {
    pub bmi: f64,
    pub body_shape: BodyShape,
    pub scale_factors: ScaleFactors,
    pub skin_tone: String,
    pub model_format: &'static str,
    pub three_js_params: ThreeJsParams,
}

pub fn avatar(m: &BodyMeasurements, skin_tone: &str) -> Avatar {
    let scale = ScaleFactors {
        height_scale: m.height / 180.0,
        width_scale: m.shoulder_width / 42.0,
        chest_scale: m.chest / 98.0,
        waist_scale: m.waist / 75.0,
        hip_scale: m.hip / 100.0,
    };
    Avatar {
        bmi: round_to(bmi(m.height, m.weight), 2),
        body_shape: body_shape(m),
        scale_factors: scale,
        skin_tone: skin_tone.to_string(),
        model_format: "gltf",
        three_js_params: ThreeJsParams {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [scale.height_scale, scale.width_scale, scale.chest_scale],
        },
    }
}

/// Response of `analyze-body`.
#[derive(Debug, Clone, Serialize)]
pub struct BodyAnalysis {
    pub success: bool,
    pub avatar: Avatar,
    pub bmi: f64,
    pub body_shape: BodyShape,
    pub health_category: &'static str,
}

pub fn analyze_body(m: &BodyMeasurements, skin_tone: &str) -> BodyAnalysis {
    let bmi = bmi(m.height, m.weight);
    BodyAnalysis {
        success: true,
        avatar: avatar(m, skin_tone),
        bmi,
        body_shape: body_shape(m),
        health_category: health_category(bmi),
    }
}
