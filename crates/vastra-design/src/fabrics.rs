//! Occasion-based fabric suggestions.

use crate::types::FabricSuggestion;

const OCCASION_FABRICS: &[(&str, [&str; 5])] = &[
    ("Wedding", ["Silk", "Velvet", "Brocade", "Georgette", "Satin"]),
    ("Grand", ["Silk", "Satin", "Brocade", "Tissue", "Crepe"]),
    ("Partywear", ["Satin", "Crepe", "Georgette", "Shimmer", "Net"]),
    ("Casual", ["Cotton", "Linen", "Khadi", "Rayon", "Jersey"]),
    ("Office", ["Cotton blend", "Linen", "Crepe", "Rayon", "Polyester"]),
    ("Festival", ["Silk", "Georgette", "Brocade", "Shimmer", "Tissue"]),
];

const DEFAULT_FABRICS: &[&str] = &["Cotton", "Silk"];

pub fn fabric_properties(fabric: &str) -> &'static str {
    match fabric {
        "Silk" => "Luxurious, smooth, breathable, drapes well",
        "Cotton" => "Breathable, comfortable, durable, easy to care",
        "Satin" => "Shiny, smooth, elegant, formal",
        "Georgette" => "Lightweight, fluid, elegant, formal",
        "Crepe" => "Textured, elegant, drapes well, professional",
        "Velvet" => "Rich, luxurious, soft, formal",
        "Brocade" => "Heavy, ornate, traditional, formal",
        "Linen" => "Natural, breathable, casual, durable",
        _ => "Quality fabric",
    }
}

pub fn fabric_care(fabric: &str) -> &'static str {
    match fabric {
        "Silk" | "Velvet" | "Brocade" => "Dry clean only",
        "Cotton" => "Machine wash cold",
        "Satin" => "Gentle wash or dry clean",
        "Georgette" => "Hand wash or dry clean",
        "Crepe" => "Dry clean recommended",
        "Linen" => "Machine wash",
        _ => "Follow care label",
    }
}

/// Five fabrics for a known occasion (exact, case-sensitive name), Cotton
/// and Silk otherwise.
pub fn occasion_fabrics(occasion: &str) -> Vec<FabricSuggestion> {
    let fabrics: &[&str] = OCCASION_FABRICS
        .iter()
        .find(|(name, _)| *name == occasion)
        .map(|(_, fabrics)| fabrics.as_slice())
        .unwrap_or(DEFAULT_FABRICS);

    fabrics
        .iter()
        .map(|fabric| FabricSuggestion {
            fabric: fabric.to_string(),
            properties: fabric_properties(fabric).to_string(),
            care: fabric_care(fabric).to_string(),
        })
        .collect()
}
