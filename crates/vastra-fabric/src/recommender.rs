//! The `/recommend` pipeline: analyze, search, fall back, explain, summarize.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::analysis::analyze_garment;
use crate::fallback::fallback_fabrics;
use crate::matcher::{annotate_listings, summarize};
use crate::search::{build_keywords, gather_fabrics, SEARCH_ENGINES_USED};
use crate::types::{FabricRecommendations, FabricRequest, ImageAnalysis};
use vastra_chat::Llm;
use vastra_scrape::SerpApiClient;
use vastra_vision::decode_base64_image;

/// Build fabric recommendations for `req`.
///
/// Live search runs only with a SerpAPI client; when it yields nothing the
/// built-in table is used. A missing LLM only downgrades the prose to
/// template text.
pub async fn recommend(
    req: &FabricRequest,
    serp: Option<&SerpApiClient>,
    llm: Option<&Llm>,
) -> FabricRecommendations {
    let analysis = req.image_base64.as_deref().and_then(|data| {
        match decode_base64_image(data) {
            Ok(img) => Some(analyze_garment(&img, &req.garment_type)),
            Err(e) => {
                warn!("Image analysis skipped: {}", e);
                None
            }
        }
    });

    let keywords = build_keywords(&req.fabric_preferences, &req.garment_type);
    let mut fabrics = match serp {
        Some(serp) => gather_fabrics(serp, &keywords, req.budget_min, req.budget_max).await,
        None => {
            warn!("SERPAPI_API_KEY not configured, skipping live search");
            Vec::new()
        }
    };
    if fabrics.is_empty() {
        info!("No live results, using the built-in fabric table");
        fabrics = fallback_fabrics(&keywords, req.budget_min, req.budget_max);
    }

    let prefs = req.preferences();
    let empty = ImageAnalysis::default();
    let analysis_ref = analysis.as_ref().unwrap_or(&empty);
    let recommendations = annotate_listings(llm, fabrics, analysis_ref, &prefs).await;
    let ai_summary = summarize(llm, &recommendations, analysis_ref, &prefs).await;

    let image_analysis = analysis
        .as_ref()
        .and_then(|a| serde_json::to_value(a).ok())
        .unwrap_or_else(|| json!({}));

    FabricRecommendations {
        success: true,
        image_analysis,
        total_count: recommendations.len(),
        recommendations,
        ai_summary,
        timestamp: vastra_core::local_timestamp(),
        data_source: "serpapi-powered",
        search_engines_used: SEARCH_ENGINES_USED.to_vec(),
    }
}

/// Payload of `POST /analyze-image`.
pub fn image_report(img: &image::DynamicImage, garment_type: &str, jpeg_data_url: String) -> Value {
    let analysis = analyze_garment(img, garment_type);
    json!({
        "success": true,
        "image_base64": jpeg_data_url,
        "dominant_colors": analysis.dominant_colors,
        "texture_analysis": analysis.texture_analysis,
        "predicted_fabric_types": analysis.predicted_fabric_types,
        "garment_type": garment_type,
    })
}
