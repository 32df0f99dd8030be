//! LLM-written explanations for fabric picks.

use std::collections::BTreeSet;

use futures::stream::{self, StreamExt};
use rand::Rng;

use crate::types::{FabricListing, ImageAnalysis, UserPreferences};
use vastra_chat::{ask_or, Llm};

/// Listings that get a written rationale.
pub const REASONED_LISTINGS: usize = 25;
/// Reasoning calls in flight at once.
const REASONING_CONCURRENCY: usize = 5;

pub const SUMMARY_FALLBACK: &str = "Our curated fabric recommendations combine real-time e-commerce data with AI-powered matching. All options have been selected for quality, price, and compatibility with your design requirements.";

fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        format!("{}", price)
    }
}

pub fn reasoning_prompt(fabric: &FabricListing, analysis: &ImageAnalysis, prefs: &UserPreferences) -> String {
    format!(
        "As a professional fabric consultant, analyze this recommendation:\n\n\
         **Design:** {} | Texture: {}\n\
         **Fabric:** {} | ₹{}/m\n\
         **Supplier:** {} | {}\n\
         **Platform:** {}\n\n\
         **User:** {} style | {} season | {} occasion\n\n\
         Provide 2-3 sentences explaining why this fabric is perfect.",
        analysis.color_names(),
        analysis.texture_label(),
        fabric.fabric_name,
        format_price(fabric.price_per_meter),
        fabric.supplier,
        fabric.material,
        fabric.platform,
        prefs.style_preference,
        prefs.season,
        prefs.occasion,
    )
}

pub fn reasoning_fallback(fabric: &FabricListing) -> String {
    format!(
        "This {} from {} offers excellent quality at ₹{}/m.",
        fabric.fabric_name,
        fabric.supplier,
        format_price(fabric.price_per_meter)
    )
}

/// Attach a rationale and a compatibility score to the first 25 listings.
/// The rest are dropped.
pub async fn annotate_listings(
    llm: Option<&Llm>,
    listings: Vec<FabricListing>,
    analysis: &ImageAnalysis,
    prefs: &UserPreferences,
) -> Vec<FabricListing> {
    stream::iter(listings.into_iter().take(REASONED_LISTINGS))
        .map(|mut fabric| async move {
            let prompt = reasoning_prompt(&fabric, analysis, prefs);
            let fallback = reasoning_fallback(&fabric);
            fabric.ai_reasoning = Some(ask_or(llm, &prompt, 0.6, 180, fallback).await);
            fabric.compatibility_score = Some(compatibility_score(&mut rand::rng()));
            fabric
        })
        .buffered(REASONING_CONCURRENCY)
        .collect()
        .await
}

/// Uniform in [0.78, 0.99], two decimals.
pub fn compatibility_score<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw: f64 = rng.random_range(0.78..=0.99);
    (raw * 100.0).round() / 100.0
}

pub fn summary_prompt(recommendations: &[FabricListing], analysis: &ImageAnalysis, prefs: &UserPreferences) -> String {
    let platforms: BTreeSet<&str> = recommendations
        .iter()
        .take(5)
        .map(|r| r.platform.as_str())
        .collect();
    let top_picks: Vec<String> = recommendations
        .iter()
        .take(3)
        .map(|r| r.fabric_name.chars().take(25).collect())
        .collect();

    format!(
        "Create a professional summary of fabric recommendations:\n\n\
         **Design:** {}\n\
         **Top Picks:** {}\n\
         **Platforms:** {}\n\
         **Budget:** ₹{}-{}\n\
         **Style:** {} | Season: {}\n\n\
         Write 4-5 sentences covering: compatibility, recommendations, quality, platforms, and value.",
        analysis.color_names(),
        top_picks.join(", "),
        platforms.into_iter().collect::<Vec<_>>().join(", "),
        format_price(prefs.budget_min),
        format_price(prefs.budget_max),
        prefs.style_preference,
        prefs.season,
    )
}

pub async fn summarize(
    llm: Option<&Llm>,
    recommendations: &[FabricListing],
    analysis: &ImageAnalysis,
    prefs: &UserPreferences,
) -> String {
    let prompt = summary_prompt(recommendations, analysis, prefs);
    ask_or(llm, &prompt, 0.7, 300, SUMMARY_FALLBACK).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_fabrics;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn prefs() -> UserPreferences {
        UserPreferences {
            style_preference: "ethnic".into(),
            season: "winter".into(),
            occasion: "wedding".into(),
            sustainability: false,
            garment_type: "kurta".into(),
            budget_min: 100.0,
            budget_max: 2000.0,
        }
    }

    #[test]
    fn test_score_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let score = compatibility_score(&mut rng);
            assert!((0.78..=0.99).contains(&score));
            assert_eq!(score, (score * 100.0).round() / 100.0);
        }
    }

    #[test]
    fn test_reasoning_prompt_and_fallback() {
        let fabric = &fallback_fabrics(&["silk".to_string()], 0.0, 5000.0)[0];
        let prompt = reasoning_prompt(fabric, &ImageAnalysis::default(), &prefs());
        assert!(prompt.contains("**Fabric:** Pure Mulberry Silk | ₹1500/m"));
        assert!(prompt.contains("Texture: Unknown"));
        assert!(prompt.contains("ethnic style | winter season | wedding occasion"));
        assert_eq!(
            reasoning_fallback(fabric),
            "This Pure Mulberry Silk from Silk Mark Certified offers excellent quality at ₹1500/m."
        );
    }

    #[tokio::test]
    async fn test_annotate_without_llm() {
        let listings = fallback_fabrics(&["cotton".to_string()], 0.0, 5000.0);
        let annotated = annotate_listings(None, listings, &ImageAnalysis::default(), &prefs()).await;

        assert_eq!(annotated.len(), 3);
        assert_eq!(annotated[0].fabric_name, "Premium Cotton Poplin");
        assert!(annotated[0]
            .ai_reasoning
            .as_deref()
            .unwrap()
            .starts_with("This Premium Cotton Poplin from Local Textile Mill"));
        assert!(annotated.iter().all(|f| f.compatibility_score.is_some()));

        let summary = summarize(None, &annotated, &ImageAnalysis::default(), &prefs()).await;
        assert_eq!(summary, SUMMARY_FALLBACK);
    }

    #[test]
    fn test_summary_prompt_lists_platforms_once() {
        let listings = fallback_fabrics(&["cotton".to_string()], 0.0, 5000.0);
        let prompt = summary_prompt(&listings, &ImageAnalysis::default(), &prefs());
        assert!(prompt.contains("**Platforms:** database\n"));
        assert!(prompt.contains("**Budget:** ₹100-2000"));
    }
}
