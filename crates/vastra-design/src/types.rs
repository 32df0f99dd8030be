use serde::{Deserialize, Serialize};

/// Body of `POST /api/design-generator/generate-prompt`.
#[derive(Debug, Clone, Deserialize)]
pub struct DesignRequest {
    pub outfit_type: String,
    pub occasion: String,
    pub gender: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub fabric_preference: Option<String>,
    #[serde(default)]
    pub regional_preference: Option<String>,
    #[serde(default)]
    pub style_keywords: Vec<String>,
    #[serde(default)]
    pub design_description: Option<String>,
}

impl DesignRequest {
    pub fn is_male(&self) -> bool {
        self.gender == "Male"
    }

    /// "men's" or "women's".
    pub fn gender_context(&self) -> &'static str {
        if self.is_male() {
            "men's"
        } else {
            "women's"
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    /// Accepted for compatibility; the base model is always used.
    #[serde(default = "default_true")]
    pub use_refiner: bool,
}

/// One scraped inspiration photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspiration {
    pub platform: String,
    pub image_url: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FabricSuggestion {
    pub fabric: String,
    pub properties: String,
    pub care: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DesignPlan {
    pub success: bool,
    pub summary: String,
    pub prompt: String,
    pub fabrics: Vec<FabricSuggestion>,
    pub inspiration_collage: Option<String>,
    pub inspiration_count: usize,
    pub message: &'static str,
}

fn default_style() -> String {
    "modern".into()
}

/// Body of `POST /api/design/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleDesignRequest {
    pub description: String,
    #[serde(default = "default_style")]
    pub style: String,
}
