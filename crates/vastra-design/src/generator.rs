//! The generate-prompt flow.

use reqwest::Client;
use tracing::info;

use crate::fabrics::occasion_fabrics;
use crate::inspiration::{inspiration_collage, search_inspiration};
use crate::prompts::{image_prompt, summarize_design};
use crate::types::{DesignPlan, DesignRequest};
use vastra_chat::Llm;
use vastra_scrape::SerpApiClient;

/// Inspiration, summary, image prompt and fabrics for a design brief.
///
/// Every step degrades on its own: no SerpAPI key means no inspiration, no
/// LLM means the canned summary and prompt.
pub async fn plan_design(
    req: &DesignRequest,
    serp: Option<&SerpApiClient>,
    llm: Option<&Llm>,
    http: &Client,
) -> DesignPlan {
    info!(outfit = %req.outfit_type, gender = %req.gender, "Generating design plan");

    let keywords = if req.style_keywords.is_empty() {
        vec![req.outfit_type.clone(), req.occasion.clone()]
    } else {
        req.style_keywords.clone()
    };
    let inspirations = match serp {
        Some(serp) => search_inspiration(serp, &keywords, req.is_male()).await,
        None => Vec::new(),
    };
    let collage = inspiration_collage(http, &inspirations).await;

    let summary = summarize_design(llm, req).await;
    let prompt = image_prompt(llm, req, &summary).await;

    DesignPlan {
        success: true,
        summary,
        prompt,
        fabrics: occasion_fabrics(&req.occasion),
        inspiration_collage: collage,
        inspiration_count: inspirations.len(),
        message: "Review and edit the prompt",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn request(style_keywords: &[&str]) -> DesignRequest {
        serde_json::from_value(json!({
            "outfit_type": "Lehenga",
            "occasion": "Festival",
            "gender": "Female",
            "colors": ["maroon"],
            "style_keywords": style_keywords
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_plan_without_services() {
        let plan = plan_design(&request(&[]), None, None, &Client::new()).await;
        assert!(plan.success);
        assert_eq!(plan.summary, "Beautiful Female Lehenga for Festival.");
        assert_eq!(plan.prompt, "Professional women's fashion photography of Lehenga.");
        assert_eq!(plan.fabrics.len(), 5);
        assert_eq!(plan.fabrics[0].fabric, "Silk");
        assert!(plan.inspiration_collage.is_none());
        assert_eq!(plan.inspiration_count, 0);
    }

    #[tokio::test]
    async fn test_plan_searches_outfit_and_occasion_by_default() {
        let server = MockServer::start_async().await;
        let outfit = server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "Lehenga women's outfit fashion");
                then.status(200).json_body(json!({"images_results": []}));
            })
            .await;
        let occasion = server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "Festival women's outfit fashion");
                then.status(200).json_body(json!({"images_results": []}));
            })
            .await;

        let serp = SerpApiClient::with_base_url(Client::new(), "k", &server.base_url());
        let plan = plan_design(&request(&[]), Some(&serp), None, &Client::new()).await;

        outfit.assert_async().await;
        occasion.assert_async().await;
        assert_eq!(plan.inspiration_count, 0);
        assert!(plan.inspiration_collage.is_none());
    }
}
