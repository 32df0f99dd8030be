//! The analyze-advanced flow end to end.

use std::collections::BTreeMap;

use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};

use crate::analysis::{hashtag_keyword_analysis, popular_styles};
use crate::charts::build_charts;
use crate::colors::aggregate_colors;
use crate::forecast::forecast;
use crate::types::{PlatformStatus, TrendAnalysis, TrendData, TrendMetrics, TrendReport, TrendRequest};
use vastra_chat::Llm;
use vastra_core::{local_timestamp, Error, Result};
use vastra_scrape::{ApifyClient, Platform, SocialPost};

fn wants(req: &TrendRequest, platform: Platform) -> bool {
    req.platforms.iter().any(|name| Platform::parse(name) == Some(platform))
}

fn record(
    status: &mut BTreeMap<&'static str, PlatformStatus>,
    posts: &mut Vec<SocialPost>,
    platform: Platform,
    outcome: Option<Result<Vec<SocialPost>>>,
) {
    let Some(outcome) = outcome else { return };
    let entry = match outcome {
        Ok(scraped) => {
            let entry = PlatformStatus {
                success: true,
                posts: scraped.len(),
                error: None,
            };
            posts.extend(scraped);
            entry
        }
        Err(e) => {
            warn!("{} scrape failed: {}", platform.display_name(), e);
            PlatformStatus {
                success: false,
                posts: 0,
                error: Some(e.to_string()),
            }
        }
    };
    status.insert(platform.as_str(), entry);
}

/// Scrape, analyze and chart a fashion theme.
///
/// Fails with a validation error when Apify is not configured or when no
/// platform returned any posts.
pub async fn analyze_trends(
    req: &TrendRequest,
    apify: Option<&ApifyClient>,
    llm: Option<&Llm>,
    http: &Client,
) -> Result<TrendReport> {
    let apify = apify.ok_or_else(|| Error::Validation("APIFY_API_KEY not set in .env file".into()))?;
    let requested_at = local_timestamp();

    let instagram = async {
        if wants(req, Platform::Instagram) {
            Some(apify.scrape_instagram(&req.hashtags).await)
        } else {
            None
        }
    };
    let pinterest = async {
        if wants(req, Platform::Pinterest) {
            Some(apify.scrape_pinterest(&req.keywords).await)
        } else {
            None
        }
    };
    let (instagram, pinterest) = tokio::join!(instagram, pinterest);

    let mut scraping_status = BTreeMap::new();
    let mut posts = Vec::new();
    record(&mut scraping_status, &mut posts, Platform::Instagram, instagram);
    record(&mut scraping_status, &mut posts, Platform::Pinterest, pinterest);

    if posts.is_empty() {
        return Err(Error::Validation(
            "No posts scraped. Verify API key and hashtags/keywords.".into(),
        ));
    }
    info!("Trend analysis for '{}': {} posts", req.theme, posts.len());

    let hashtags = hashtag_keyword_analysis(&posts);
    let dominant_colors = aggregate_colors(http, &posts).await;
    let styles = popular_styles(&posts);
    let ai_forecast = forecast(llm, &req.theme, &posts, &dominant_colors, &hashtags).await;

    let instagram_count = posts.iter().filter(|p| p.platform == Platform::Instagram).count();
    let pinterest_count = posts.len() - instagram_count;
    let charts = build_charts(&hashtags, &dominant_colors, &styles, instagram_count, pinterest_count);

    let metrics = TrendMetrics {
        total_posts: posts.len(),
        instagram: instagram_count,
        pinterest: pinterest_count,
        unique_hashtags: hashtags.total_unique_hashtags,
        analysis_depth: req.depth.clone(),
    };

    Ok(TrendReport {
        success: true,
        data: TrendData {
            theme: req.theme.clone(),
            requested_at,
            scraping_status,
            analysis: TrendAnalysis {
                hashtags,
                dominant_colors,
                popular_styles: styles,
            },
            insights: json!({ "ai_forecast": ai_forecast }),
            charts,
            metrics,
        },
        timestamp: local_timestamp(),
        status: "Real web scraping + charts analysis complete",
    })
}
