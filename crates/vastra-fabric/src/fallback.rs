//! Built-in fabric table used when live search finds nothing.

use crate::types::FabricListing;

struct Entry {
    name: &'static str,
    price: f64,
    supplier: &'static str,
}

const FABRIC_TABLE: &[(&str, &[Entry])] = &[
    (
        "cotton",
        &[
            Entry { name: "Premium Cotton Poplin", price: 250.0, supplier: "Local Textile Mill" },
            Entry { name: "Cotton Lawn Fabric", price: 180.0, supplier: "Fabriclore" },
            Entry { name: "Organic Cotton Muslin", price: 320.0, supplier: "Khadi India" },
        ],
    ),
    (
        "silk",
        &[
            Entry { name: "Pure Mulberry Silk", price: 1500.0, supplier: "Silk Mark Certified" },
            Entry { name: "Silk Charmeuse", price: 1200.0, supplier: "South Indian Silk" },
        ],
    ),
    (
        "polyester",
        &[
            Entry { name: "Polyester Jersey", price: 120.0, supplier: "Affordable Textiles" },
            Entry { name: "Polyester Satin", price: 180.0, supplier: "Dress Fabrics" },
        ],
    ),
    (
        "viscose",
        &[Entry { name: "Viscose Rayon", price: 200.0, supplier: "Premium Viscose" }],
    ),
    (
        "linen",
        &[Entry { name: "Pure Linen Fabric", price: 450.0, supplier: "European Linen" }],
    ),
];

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Table entries whose family matches one of the first five keywords
/// (substring either way, case-insensitive) and whose price is in budget.
///
/// A keyword matching several families, or several keywords matching one
/// family, yields the entries once per match.
pub fn fallback_fabrics(keywords: &[String], budget_min: f64, budget_max: f64) -> Vec<FabricListing> {
    let mut fabrics = Vec::new();
    for keyword in keywords.iter().take(5) {
        let keyword = keyword.to_lowercase();
        for (family, entries) in FABRIC_TABLE {
            if !(family.contains(keyword.as_str()) || keyword.contains(family)) {
                continue;
            }
            for entry in entries.iter() {
                if budget_min <= entry.price && entry.price <= budget_max {
                    fabrics.push(FabricListing {
                        fabric_name: entry.name.to_string(),
                        fabric_type: capitalize(family),
                        price_per_meter: entry.price,
                        currency: "INR".into(),
                        supplier: entry.supplier.to_string(),
                        material: format!("100% {}", capitalize(family)),
                        purchase_link: "#".into(),
                        image_url: String::new(),
                        platform: "database".into(),
                        rating: None,
                        snippet: None,
                        ai_reasoning: None,
                        compatibility_score: None,
                    });
                }
            }
        }
    }
    fabrics
}
