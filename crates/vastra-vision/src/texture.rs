//! Fabric texture and print-pattern classification from edge statistics.

use std::fmt;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::edges::{edge_density, gray_std, grayscale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureType {
    SmoothSilk,
    CottonBlend,
    TexturedWool,
    WovenLinen,
    SyntheticBlend,
}

impl TextureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmoothSilk => "smooth_silk",
            Self::CottonBlend => "cotton_blend",
            Self::TexturedWool => "textured_wool",
            Self::WovenLinen => "woven_linen",
            Self::SyntheticBlend => "synthetic_blend",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SmoothSilk => "Smooth, silky texture with minimal surface variation",
            Self::CottonBlend => "Soft, slightly textured cotton-like surface",
            Self::TexturedWool => "Rough, heavily textured wool-like material",
            Self::WovenLinen => "Distinct woven pattern with visible texture",
            Self::SyntheticBlend => "Uniform synthetic fabric texture",
        }
    }
}

impl fmt::Display for TextureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify from gray-level spread and edge density. First match wins.
pub fn classify_texture(std: f64, edge_density: f64) -> TextureType {
    if std < 30.0 && edge_density < 0.05 {
        TextureType::SmoothSilk
    } else if std < 50.0 && edge_density < 0.1 {
        TextureType::CottonBlend
    } else if std > 60.0 && edge_density > 0.15 {
        TextureType::TexturedWool
    } else if edge_density > 0.2 {
        TextureType::WovenLinen
    } else {
        TextureType::SyntheticBlend
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureAnalysis {
    pub texture_type: TextureType,
    /// Standard deviation of the grayscale image.
    pub roughness: f64,
    /// Share of edge pixels, in `[0, 1]`.
    pub pattern_complexity: f64,
    pub texture_description: String,
}

pub fn analyze_texture(img: &DynamicImage) -> TextureAnalysis {
    let gray = grayscale(img);
    let roughness = gray_std(&gray);
    let pattern_complexity = edge_density(&gray, 50.0, 150.0);
    let texture_type = classify_texture(roughness, pattern_complexity);

    TextureAnalysis {
        texture_type,
        roughness,
        pattern_complexity,
        texture_description: texture_type.description().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Print patterns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    #[serde(rename = "Complex Pattern")]
    Complex,
    #[serde(rename = "Moderate Pattern")]
    Moderate,
    #[serde(rename = "Simple/Solid")]
    Simple,
}

impl PatternKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complex => "Complex Pattern",
            Self::Moderate => "Moderate Pattern",
            Self::Simple => "Simple/Solid",
        }
    }

    fn from_edge_percentage(pct: f64) -> Self {
        if pct > 30.0 {
            Self::Complex
        } else if pct > 15.0 {
            Self::Moderate
        } else {
            Self::Simple
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    /// Edge percentage capped at 100, one decimal.
    pub confidence: f64,
    pub description: String,
}

/// Busy prints produce many strong edges; solids produce almost none.
pub fn detect_pattern(img: &DynamicImage) -> PatternAnalysis {
    let gray = grayscale(img);
    let pct = edge_density(&gray, 100.0, 200.0) * 100.0;
    let kind = PatternKind::from_edge_percentage(pct);

    PatternAnalysis {
        kind,
        confidence: (pct.min(100.0) * 10.0).round() / 10.0,
        description: format!("Pattern complexity: {}", kind.label()),
    }
}
