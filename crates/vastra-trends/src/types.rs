use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::charts::Chart;
use vastra_vision::Rgb;

fn default_region() -> String {
    "global".into()
}

fn default_time_range() -> String {
    "30".into()
}

fn default_detailed() -> String {
    "detailed".into()
}

/// Body of `POST /api/advanced-trends/analyze-advanced`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendRequest {
    pub theme: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_time_range")]
    pub time_range: String,
    #[serde(default = "default_detailed")]
    pub output_format: String,
    #[serde(default = "default_detailed")]
    pub depth: String,
}

/// Outcome of scraping one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformStatus {
    pub success: bool,
    pub posts: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HashtagAnalysis {
    pub top_hashtags: Vec<TagCount>,
    pub top_keywords: Vec<KeywordCount>,
    pub total_posts: usize,
    pub total_unique_hashtags: usize,
}

/// A palette entry pooled over many post images.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorCount {
    pub hex: String,
    pub name: String,
    pub count: usize,
    pub rgb: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleScore {
    pub style: String,
    pub score: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub hashtags: HashtagAnalysis,
    pub dominant_colors: Vec<ColorCount>,
    pub popular_styles: Vec<StyleScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendMetrics {
    pub total_posts: usize,
    pub instagram: usize,
    pub pinterest: usize,
    pub unique_hashtags: usize,
    pub analysis_depth: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendData {
    pub theme: String,
    pub requested_at: String,
    pub scraping_status: BTreeMap<&'static str, PlatformStatus>,
    pub analysis: TrendAnalysis,
    pub insights: Value,
    pub charts: BTreeMap<&'static str, Chart>,
    pub metrics: TrendMetrics,
}

/// Response of the analyze route.
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub success: bool,
    pub data: TrendData,
    pub timestamp: String,
    pub status: &'static str,
}
