//! Color & pattern analyzer: dominant colors of an upload, how busy its
//! pattern is, and LLM-suggested companion colors.

use image::DynamicImage;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use vastra_chat::{extract_json_object, Llm};
use vastra_vision::{detect_pattern, dominant_colors, ColorExtraction, ColorSwatch, PatternAnalysis};

/// Swatches returned to the client.
pub const MAX_SWATCHES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorRecommendation {
    pub color_hex: String,
    pub color_name: String,
    pub reason: String,
    pub use_case: String,
    pub psychology: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaletteReport {
    pub success: bool,
    pub dominant_colors: Vec<ColorSwatch>,
    pub pattern_analysis: PatternAnalysis,
    pub llm_recommendations: Vec<ColorRecommendation>,
    pub llm_analysis_summary: String,
}

/// The CPU-bound half: palette and pattern of one image.
pub fn inspect(img: &DynamicImage) -> (Vec<ColorSwatch>, PatternAnalysis) {
    (dominant_colors(img, &ColorExtraction::palette()), detect_pattern(img))
}

pub fn recommendation_prompt(colors: &[ColorSwatch], pattern_type: &str) -> String {
    let color_text = colors
        .iter()
        .take(MAX_SWATCHES)
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{}. {} ({}) - {:?}% - {}",
                i + 1,
                c.name,
                c.hex,
                c.percentage,
                c.psychology.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r##"You are an expert fashion color consultant and stylist. Analyze these dominant colors from an image and recommend complementary colors for fashion design.

IMAGE COLORS DETECTED:
{color_text}

PATTERN TYPE: {pattern_type}

Based on these colors, provide:
1. 3-4 specific color recommendations (with hex codes) that would pair well with these colors for fashion design
2. For each recommendation, explain:
   - Why this color works with the detected colors (color psychology & harmony)
   - Best use case in fashion design
   - Specific hex code to use

3. A brief summary (2-3 sentences) of the overall color mood and styling recommendations

Format your response as JSON with this structure:
{{
    "recommendations": [
        {{
            "hex": "#RRGGBB",
            "name": "Color Name",
            "reason": "Why this color works",
            "use_case": "Where to use in design",
            "psychology": "Color psychology"
        }}
    ],
    "summary": "Overall styling recommendation"
}}

Be specific with hex codes and fashion design insights."##
    )
}

/// Used when the model answers without parseable JSON.
pub fn fallback_recommendations() -> Value {
    json!({
        "recommendations": [
            {
                "hex": "#E8D5FF",
                "name": "Lavender",
                "reason": "Complementary to warm tones",
                "use_case": "Accent color in designs",
                "psychology": "Creativity and elegance"
            },
            {
                "hex": "#FFE5D0",
                "name": "Peach",
                "reason": "Soft and versatile",
                "use_case": "Primary or secondary color",
                "psychology": "Warmth and comfort"
            }
        ],
        "summary": "These colors create a balanced and fashionable palette suitable for various design styles."
    })
}

/// Read the model's JSON leniently; missing fields get placeholders.
pub fn parse_recommendations(value: &Value) -> (Vec<ColorRecommendation>, String) {
    let field = |rec: &Value, key: &str, default: &str| {
        rec.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    let recommendations = value
        .get("recommendations")
        .and_then(Value::as_array)
        .map(|recs| {
            recs.iter()
                .map(|rec| ColorRecommendation {
                    color_hex: field(rec, "hex", "#000000"),
                    color_name: field(rec, "name", "Color"),
                    reason: field(rec, "reason", ""),
                    use_case: field(rec, "use_case", ""),
                    psychology: field(rec, "psychology", ""),
                })
                .collect()
        })
        .unwrap_or_default();

    let summary = field(value, "summary", "Color analysis complete");
    (recommendations, summary)
}

/// Companion colors for a palette.
///
/// A failed call yields no recommendations and an `Error: ...` summary;
/// an answer without JSON yields the Lavender/Peach defaults.
pub async fn recommend_colors(
    llm: Option<&Llm>,
    colors: &[ColorSwatch],
    pattern_type: &str,
) -> (Vec<ColorRecommendation>, String) {
    let Some(llm) = llm else {
        return (Vec::new(), "Error: No LLM provider configured".into());
    };

    let prompt = recommendation_prompt(colors, pattern_type);
    match llm.prompt(&prompt, 0.7, 1500).await {
        Ok(text) => {
            let value = extract_json_object(&text).unwrap_or_else(|| {
                warn!("Color recommendations were not JSON, using defaults");
                fallback_recommendations()
            });
            parse_recommendations(&value)
        }
        Err(e) => {
            warn!("Color recommendation call failed: {}", e);
            (Vec::new(), format!("Error: {}", e))
        }
    }
}

pub fn report(
    mut colors: Vec<ColorSwatch>,
    pattern: PatternAnalysis,
    recommendations: (Vec<ColorRecommendation>, String),
) -> PaletteReport {
    colors.truncate(MAX_SWATCHES);
    PaletteReport {
        success: true,
        dominant_colors: colors,
        pattern_analysis: pattern,
        llm_recommendations: recommendations.0,
        llm_analysis_summary: recommendations.1,
    }
}
