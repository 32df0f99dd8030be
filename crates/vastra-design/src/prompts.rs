//! Design summary and SDXL prompt writing.

use crate::types::DesignRequest;
use vastra_chat::{ask_or, Llm};

pub fn summary_prompt(req: &DesignRequest) -> String {
    let keywords = if req.style_keywords.is_empty() {
        "elegant, modern".to_string()
    } else {
        req.style_keywords.join(", ")
    };

    format!(
        "Create a professional fashion design summary for a {} {} for {}:\n\n\
         Design: {} ({})\n\
         Occasion: {}\n\
         Colors: {}\n\
         Fabric: {}\n\
         Region: {}\n\
         Keywords: {}\n\n\
         Include: design overview, color placement, embellishments, fit, styling.\n\
         Professional and detailed.",
        req.gender_context(),
        req.outfit_type,
        req.occasion,
        req.outfit_type,
        req.gender,
        req.occasion,
        req.colors.join(", "),
        req.fabric_preference.as_deref().unwrap_or("Not specified"),
        req.regional_preference.as_deref().unwrap_or("Any"),
        keywords,
    )
}

pub async fn summarize_design(llm: Option<&Llm>, req: &DesignRequest) -> String {
    let fallback = format!("Beautiful {} {} for {}.", req.gender, req.outfit_type, req.occasion);
    ask_or(llm, &summary_prompt(req), 0.7, 600, fallback).await
}

pub fn image_prompt_request(summary: &str) -> String {
    format!(
        "Create a detailed SDXL prompt based on:\n{}\n\n\
         Include: model, outfit details, colors, fabric, styling, professional photography.\n\
         Max 250 words. Single paragraph. Optimize for image generation.",
        summary
    )
}

/// A single-paragraph image prompt derived from the design summary.
pub async fn image_prompt(llm: Option<&Llm>, req: &DesignRequest, summary: &str) -> String {
    let fallback = format!(
        "Professional {} fashion photography of {}.",
        req.gender_context(),
        req.outfit_type
    );
    ask_or(llm, &image_prompt_request(summary), 0.8, 500, fallback)
        .await
        .trim()
        .to_string()
}
