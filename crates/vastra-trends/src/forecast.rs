//! LLM trend forecast over the scraped data.

use crate::types::{ColorCount, HashtagAnalysis};
use vastra_chat::{ask_or, Llm};
use vastra_scrape::SocialPost;

const SAMPLE_POSTS: usize = 10;
const SAMPLE_CHARS: usize = 400;

pub fn forecast_prompt(
    theme: &str,
    posts: &[SocialPost],
    colors: &[ColorCount],
    analysis: &HashtagAnalysis,
) -> String {
    let sample: String = posts
        .iter()
        .take(SAMPLE_POSTS)
        .map(|p| if p.caption.is_empty() { p.description.as_str() } else { p.caption.as_str() })
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(SAMPLE_CHARS)
        .collect();
    let keywords: Vec<&str> = analysis.top_keywords.iter().take(5).map(|k| k.keyword.as_str()).collect();
    let color_names: Vec<&str> = colors.iter().take(5).map(|c| c.name.as_str()).collect();
    let hashtags: Vec<&str> = analysis.top_hashtags.iter().take(5).map(|h| h.tag.as_str()).collect();

    format!(
        "Analyze this REAL fashion trend data scraped from Instagram and Pinterest:\n\n\
         Theme: {}\n\
         Total Posts: {}\n\
         Top Keywords: {}\n\
         Dominant Colors: {}\n\
         Top Hashtags: {}\n\n\
         Sample Content:\n{}\n\n\
         Provide a detailed trend forecast with:\n\
         1. Trend strength (1-10) and classification\n\
         2. Key characteristics defining this trend\n\
         3. Target demographic and lifestyle\n\
         4. Visual identity and aesthetics\n\
         5. Predicted longevity of trend\n\
         6. Emerging sub-trends within this\n\
         7. Geographic hotspots/popularity\n\
         8. Commercial opportunities\n\
         9. Designer recommendations\n\
         10. Competition/saturation analysis\n\n\
         Be specific and data-driven based on the actual posts.",
        theme,
        posts.len(),
        keywords.join(", "),
        color_names.join(", "),
        hashtags.join(", "),
        sample,
    )
}

pub fn forecast_fallback(post_count: usize) -> String {
    format!("Analysis complete with {} posts scraped and analyzed.", post_count)
}

pub async fn forecast(
    llm: Option<&Llm>,
    theme: &str,
    posts: &[SocialPost],
    colors: &[ColorCount],
    analysis: &HashtagAnalysis,
) -> String {
    let prompt = forecast_prompt(theme, posts, colors, analysis);
    ask_or(llm, &prompt, 0.7, 2000, forecast_fallback(posts.len())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::hashtag_keyword_analysis;
    use vastra_scrape::{extract_hashtags, Platform};
    use vastra_vision::Rgb;

    fn posts() -> Vec<SocialPost> {
        let mut posts: Vec<SocialPost> = (0..12)
            .map(|i| {
                let caption = format!("Linen look {} #linen #summer", i);
                SocialPost {
                    hashtags: extract_hashtags(&caption),
                    caption,
                    ..SocialPost::empty(Platform::Instagram)
                }
            })
            .collect();
        posts[1] = SocialPost {
            description: "Pinned boho dress".into(),
            title: "unused".into(),
            ..SocialPost::empty(Platform::Pinterest)
        };
        posts
    }

    #[test]
    fn test_prompt_fields() {
        let posts = posts();
        let analysis = hashtag_keyword_analysis(&posts);
        let colors = vec![ColorCount {
            hex: "#FFFFFF".into(),
            name: "White".into(),
            count: 3,
            rgb: Rgb::new(255, 255, 255),
        }];
        let prompt = forecast_prompt("summer linen", &posts, &colors, &analysis);

        assert!(prompt.starts_with("Analyze this REAL fashion trend data"));
        assert!(prompt.contains("Theme: summer linen\nTotal Posts: 12\n"));
        assert!(prompt.contains("Dominant Colors: White\n"));
        assert!(prompt.contains("Top Hashtags: #linen, #summer\n"));
        assert!(prompt.contains("Sample Content:\nLinen look 0 #linen #summer Pinned boho dress Linen look 2"));
        assert!(!prompt.contains("Linen look 10"));
        assert!(prompt.ends_with("based on the actual posts."));
    }

    #[test]
    fn test_sample_is_truncated() {
        let caption = "ab ".repeat(500);
        let long = SocialPost {
            caption: caption.clone(),
            ..SocialPost::empty(Platform::Instagram)
        };
        let analysis = hashtag_keyword_analysis(std::slice::from_ref(&long));
        let prompt = forecast_prompt("t", &[long], &[], &analysis);
        assert!(prompt.contains(&format!("Sample Content:\n{}\n\n", &caption[..400])));
    }

    #[tokio::test]
    async fn test_forecast_without_llm() {
        let posts = posts();
        let analysis = hashtag_keyword_analysis(&posts);
        let text = forecast(None, "linen", &posts, &[], &analysis).await;
        assert_eq!(text, "Analysis complete with 12 posts scraped and analyzed.");
    }
}
