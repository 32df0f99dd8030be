use serde::{Deserialize, Serialize};
use serde_json::Value;

use vastra_vision::{ColorSwatch, TextureAnalysis};

fn default_style() -> String {
    "modern".into()
}
fn default_season() -> String {
    "summer".into()
}
fn default_budget_min() -> f64 {
    100.0
}
fn default_budget_max() -> f64 {
    5000.0
}
fn default_occasion() -> String {
    "casual".into()
}
fn default_garment() -> String {
    "shirt".into()
}

/// Body of `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricRequest {
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default = "default_style")]
    pub style_preference: String,
    #[serde(default = "default_season")]
    pub season: String,
    #[serde(default)]
    pub color_preferences: Vec<String>,
    #[serde(default)]
    pub fabric_preferences: Vec<String>,
    #[serde(default = "default_budget_min")]
    pub budget_min: f64,
    #[serde(default = "default_budget_max")]
    pub budget_max: f64,
    #[serde(default = "default_occasion")]
    pub occasion: String,
    #[serde(default)]
    pub sustainability: bool,
    #[serde(default = "default_garment")]
    pub garment_type: String,
}

impl Default for FabricRequest {
    fn default() -> Self {
        Self {
            image_base64: None,
            style_preference: default_style(),
            season: default_season(),
            color_preferences: Vec::new(),
            fabric_preferences: Vec::new(),
            budget_min: default_budget_min(),
            budget_max: default_budget_max(),
            occasion: default_occasion(),
            sustainability: false,
            garment_type: default_garment(),
        }
    }
}

impl FabricRequest {
    pub fn preferences(&self) -> UserPreferences {
        UserPreferences {
            style_preference: self.style_preference.clone(),
            season: self.season.clone(),
            occasion: self.occasion.clone(),
            sustainability: self.sustainability,
            garment_type: self.garment_type.clone(),
            budget_min: self.budget_min,
            budget_max: self.budget_max,
        }
    }

    pub fn within_budget(&self, price: f64) -> bool {
        self.budget_min <= price && price <= self.budget_max
    }
}

/// The request fields the prompts and the PDF report care about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub style_preference: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub occasion: String,
    #[serde(default)]
    pub sustainability: bool,
    #[serde(default)]
    pub garment_type: String,
    #[serde(default)]
    pub budget_min: f64,
    #[serde(default)]
    pub budget_max: f64,
}

/// Result of looking at a garment photo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageAnalysis {
    #[serde(default)]
    pub dominant_colors: Vec<ColorSwatch>,
    #[serde(default)]
    pub texture_analysis: Option<TextureAnalysis>,
    #[serde(default)]
    pub predicted_fabric_types: Vec<String>,
}

impl ImageAnalysis {
    /// Names of the first three colors, comma separated.
    pub fn color_names(&self) -> String {
        self.dominant_colors
            .iter()
            .take(3)
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn texture_label(&self) -> &str {
        self.texture_analysis
            .as_ref()
            .map(|t| t.texture_type.as_str())
            .unwrap_or("Unknown")
    }
}

/// One purchasable fabric, from a search engine or the built-in table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricListing {
    pub fabric_name: String,
    pub fabric_type: String,
    pub price_per_meter: f64,
    pub currency: String,
    pub supplier: String,
    pub material: String,
    pub purchase_link: String,
    #[serde(default)]
    pub image_url: String,
    /// `google_shopping`, a site domain, or `database`.
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_score: Option<f64>,
}

/// Response of `POST /recommend`.
#[derive(Debug, Clone, Serialize)]
pub struct FabricRecommendations {
    pub success: bool,
    /// Empty object when no usable image was sent.
    pub image_analysis: Value,
    pub recommendations: Vec<FabricListing>,
    pub ai_summary: String,
    pub total_count: usize,
    pub timestamp: String,
    pub data_source: &'static str,
    pub search_engines_used: Vec<&'static str>,
}

/// Body of `POST /export-pdf`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub recommendations: Vec<Value>,
    #[serde(default)]
    pub image_analysis: Value,
    #[serde(default)]
    pub user_preferences: Value,
    #[serde(default)]
    pub ai_summary: String,
}
