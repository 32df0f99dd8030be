//! Live fabric search across Google Shopping and Indian retail sites.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{info, warn};

use crate::types::FabricListing;
use vastra_core::Result;
use vastra_scrape::{find_inr_price, parse_inr_price, SerpApiClient};

/// Retail sites searched through Google, in result order.
pub const SEARCH_SITES: [&str; 5] = [
    "amazon.in",
    "flipkart.com",
    "ajio.com",
    "myntra.com",
    "fabriclore.com",
];

pub const SEARCH_ENGINES_USED: [&str; 6] = [
    "Google Shopping",
    "Amazon",
    "Flipkart",
    "AJIO",
    "Myntra",
    "Fabriclore",
];

const MAX_KEYWORDS: usize = 7;
const MAX_LISTINGS: usize = 40;
const SHOPPING_RESULTS: usize = 25;
const SITE_RESULTS: usize = 20;

/// Fabric preferences then the garment type, deduplicated in order.
pub fn build_keywords(fabric_preferences: &[String], garment_type: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for kw in fabric_preferences.iter().map(String::as_str).chain([garment_type]) {
        let kw = kw.trim();
        if !kw.is_empty() && !keywords.iter().any(|k| k == kw) {
            keywords.push(kw.to_string());
        }
    }
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Query all six sources at once and merge what comes back.
///
/// A source that fails contributes nothing. Listings are deduplicated on
/// (name, price), keeping the first seen, and capped at 40.
pub async fn gather_fabrics(
    serp: &SerpApiClient,
    keywords: &[String],
    budget_min: f64,
    budget_max: f64,
) -> Vec<FabricListing> {
    let terms = keywords.iter().take(2).cloned().collect::<Vec<_>>().join(" ");
    let primary = keywords.first().map(String::as_str);

    let shopping = search_shopping(serp, &terms, primary, budget_min, budget_max);
    let sites = join_all(
        SEARCH_SITES
            .iter()
            .map(|site| search_site(serp, site, &terms, primary, budget_min, budget_max)),
    );
    let (shopping, sites) = tokio::join!(shopping, sites);

    let mut all = Vec::new();
    for (source, result) in std::iter::once(("google_shopping", shopping))
        .chain(SEARCH_SITES.iter().copied().zip(sites))
    {
        match result {
            Ok(listings) => {
                info!("{}: {} fabrics found", source, listings.len());
                all.extend(listings);
            }
            Err(e) => warn!("{} search failed: {}", source, e),
        }
    }

    dedup_and_cap(all)
}

fn dedup_and_cap(listings: Vec<FabricListing>) -> Vec<FabricListing> {
    let mut seen: HashSet<(String, u64)> = HashSet::new();
    let mut unique: Vec<FabricListing> = listings
        .into_iter()
        .filter(|f| seen.insert((f.fabric_name.clone(), f.price_per_meter.to_bits())))
        .collect();
    unique.truncate(MAX_LISTINGS);
    unique
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

async fn search_shopping(
    serp: &SerpApiClient,
    terms: &str,
    primary: Option<&str>,
    budget_min: f64,
    budget_max: f64,
) -> Result<Vec<FabricListing>> {
    let query = format!("{} fabric per meter", terms);
    let results = serp.search_shopping(&query, 30).await?;

    Ok(results
        .into_iter()
        .take(SHOPPING_RESULTS)
        .filter_map(|item| {
            let price = parse_inr_price(item.price.as_deref().unwrap_or("0"))?;
            if !(budget_min <= price && price <= budget_max) {
                return None;
            }
            Some(FabricListing {
                fabric_name: truncate_chars(&item.title, 80),
                fabric_type: primary.unwrap_or("Fabric").to_string(),
                price_per_meter: price,
                currency: "INR".into(),
                supplier: item.source.clone().unwrap_or_else(|| "Google Shopping".into()),
                material: primary.unwrap_or("Mixed fibers").to_string(),
                purchase_link: item.link.clone().unwrap_or_else(|| "#".into()),
                image_url: item.image_url().unwrap_or_default().to_string(),
                platform: "google_shopping".into(),
                rating: Some(item.rating.unwrap_or(0.0)),
                snippet: None,
                ai_reasoning: None,
                compatibility_score: None,
            })
        })
        .collect())
}

async fn search_site(
    serp: &SerpApiClient,
    site: &str,
    terms: &str,
    primary: Option<&str>,
    budget_min: f64,
    budget_max: f64,
) -> Result<Vec<FabricListing>> {
    let results = serp.search_site(site, &format!("{} fabric", terms), 40).await?;

    Ok(results
        .into_iter()
        .take(SITE_RESULTS)
        .filter_map(|item| {
            // Organic results only count when the snippet quotes a rupee price
            let price = find_inr_price(&item.snippet)?;
            if !(budget_min <= price && price <= budget_max) {
                return None;
            }
            Some(FabricListing {
                fabric_name: truncate_chars(&item.title, 80),
                fabric_type: primary.unwrap_or("Fabric").to_string(),
                price_per_meter: price,
                currency: "INR".into(),
                supplier: site.to_uppercase(),
                material: primary.unwrap_or("Mixed fibers").to_string(),
                purchase_link: item.link.clone().unwrap_or_else(|| "#".into()),
                image_url: String::new(),
                platform: site.to_string(),
                rating: None,
                snippet: Some(truncate_chars(&item.snippet, 100)),
                ai_reasoning: None,
                compatibility_score: None,
            })
        })
        .collect())
}
