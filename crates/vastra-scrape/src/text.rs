//! Text helpers for scraped content.

use once_cell::sync::Lazy;
use regex::Regex;

static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());
static INR_PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"₹\s*(\d+(?:,\d+)*(?:\.\d+)?)").unwrap());

/// Lowercased hashtags in order of appearance, `#` included.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    HASHTAG_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parse a listing price such as `"₹1,299.00"`. Blank means zero.
pub fn parse_inr_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '₹' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse().ok()
}

/// First rupee amount mentioned in free text.
pub fn find_inr_price(text: &str) -> Option<f64> {
    let caps = INR_PRICE_RE.captures(text)?;
    caps.get(1)?.as_str().replace(',', "").parse().ok()
}
