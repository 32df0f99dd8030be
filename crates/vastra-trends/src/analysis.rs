//! Hashtag, keyword and style statistics over scraped posts.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{HashtagAnalysis, KeywordCount, StyleScore, TagCount};
use vastra_scrape::SocialPost;

const TOP_HASHTAGS: usize = 15;
const TOP_KEYWORDS: usize = 10;
const TOP_STYLES: usize = 6;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());

const STYLE_FAMILIES: &[(&str, &[&str])] = &[
    ("oversized", &["oversized", "baggy", "loose fit", "relaxed"]),
    ("vintage", &["vintage", "retro", "90s", "80s", "throwback"]),
    ("minimalist", &["minimal", "clean", "simple", "neutral"]),
    ("streetwear", &["street", "urban", "hype", "sneaker"]),
    ("y2k", &["y2k", "2000s", "early 2000", "throwback"]),
    ("maximalist", &["bold", "statement", "loud", "colorful"]),
    ("sustainable", &["eco", "sustainable", "organic", "recycled"]),
    ("preppy", &["preppy", "classic", "polo", "structured"]),
    ("athleisure", &["athletic", "sporty", "gym", "casual"]),
    ("bohemian", &["boho", "festival", "hippie", "free"]),
];

/// Counts in first-seen order, sorted by count descending. The sort is
/// stable, so ties stay in the order they first appeared.
fn most_common<I>(items: I, limit: usize) -> (Vec<(String, usize)>, usize)
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    let unique = counts.len();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    (counts, unique)
}

pub fn hashtag_keyword_analysis(posts: &[SocialPost]) -> HashtagAnalysis {
    let (top_hashtags, unique_hashtags) = most_common(
        posts.iter().flat_map(|p| p.hashtags.iter().cloned()),
        TOP_HASHTAGS,
    );

    let words = posts.iter().flat_map(|p| {
        let text = p.text().to_lowercase();
        WORD_RE
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .filter(|w| w.chars().count() > 3)
            .collect::<Vec<_>>()
    });
    let (top_keywords, _) = most_common(words, TOP_KEYWORDS);

    HashtagAnalysis {
        top_hashtags: top_hashtags
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect(),
        top_keywords: top_keywords
            .into_iter()
            .map(|(keyword, count)| KeywordCount { keyword, count })
            .collect(),
        total_posts: posts.len(),
        total_unique_hashtags: unique_hashtags,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Score each style family by how many of its cue words appear in each
/// post's caption (or description). Top six families with any hits; a
/// canned ranking when nothing matches.
pub fn popular_styles(posts: &[SocialPost]) -> Vec<StyleScore> {
    let mut scores = vec![0usize; STYLE_FAMILIES.len()];
    for post in posts {
        let text = if post.caption.is_empty() {
            post.description.to_lowercase()
        } else {
            post.caption.to_lowercase()
        };
        for (score, (_, cues)) in scores.iter_mut().zip(STYLE_FAMILIES) {
            *score += cues.iter().filter(|cue| text.contains(*cue)).count();
        }
    }

    let mut ranked: Vec<StyleScore> = STYLE_FAMILIES
        .iter()
        .zip(scores)
        .filter(|(_, score)| *score > 0)
        .map(|((name, _), score)| StyleScore {
            style: capitalize(name),
            score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(TOP_STYLES);

    if ranked.is_empty() {
        return [("Oversized", 5), ("Vintage", 4), ("Minimalist", 3)]
            .into_iter()
            .map(|(style, score)| StyleScore {
                style: style.to_string(),
                score,
            })
            .collect();
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use vastra_scrape::{extract_hashtags, Platform};

    fn insta(caption: &str) -> SocialPost {
        SocialPost {
            caption: caption.to_string(),
            hashtags: extract_hashtags(caption),
            ..SocialPost::empty(Platform::Instagram)
        }
    }

    fn pin(title: &str, description: &str) -> SocialPost {
        SocialPost {
            title: title.to_string(),
            description: description.to_string(),
            hashtags: extract_hashtags(description),
            ..SocialPost::empty(Platform::Pinterest)
        }
    }

    #[test]
    fn test_hashtags_ranked_with_stable_ties() {
        let posts = vec![
            insta("Linen summer #linen #summer"),
            insta("More #summer #ootd"),
            insta("#ootd #linen #summer"),
            pin("Boho Maxi", "#boho"),
        ];
        let analysis = hashtag_keyword_analysis(&posts);

        let tags: Vec<(&str, usize)> = analysis
            .top_hashtags
            .iter()
            .map(|t| (t.tag.as_str(), t.count))
            .collect();
        assert_eq!(
            tags,
            vec![("#summer", 3), ("#linen", 2), ("#ootd", 2), ("#boho", 1)]
        );
        assert_eq!(analysis.total_posts, 4);
        assert_eq!(analysis.total_unique_hashtags, 4);
    }

    #[test]
    fn test_keywords_skip_short_words_and_use_fallback_text() {
        let posts = vec![
            insta("The Linen shirt and the LINEN trousers"),
            // no caption or description: the title is used
            pin("Linen Kurta", ""),
        ];
        let analysis = hashtag_keyword_analysis(&posts);

        assert_eq!(analysis.top_keywords[0].keyword, "linen");
        assert_eq!(analysis.top_keywords[0].count, 3);
        let words: Vec<&str> = analysis
            .top_keywords
            .iter()
            .map(|k| k.keyword.as_str())
            .collect();
        assert_eq!(words, vec!["linen", "shirt", "trousers", "kurta"]);
    }

    #[test]
    fn test_keyword_cap() {
        let caption = (0..20).map(|i| format!("word{:02}", i)).collect::<Vec<_>>().join(" ");
        let analysis = hashtag_keyword_analysis(&[insta(&caption)]);
        assert_eq!(analysis.top_keywords.len(), 10);
        assert_eq!(analysis.top_keywords[0].keyword, "word00");
    }

    #[test]
    fn test_popular_styles_scores() {
        let posts = vec![
            insta("Oversized baggy tee with a retro vibe"),
            insta("Relaxed fit, throwback denim"),
            pin("ignored title", "Y2K butterfly top"),
        ];
        let styles = popular_styles(&posts);
        let ranked: Vec<(&str, usize)> = styles.iter().map(|s| (s.style.as_str(), s.score)).collect();
        // "throwback" counts for both vintage and y2k
        assert_eq!(ranked, vec![("Oversized", 3), ("Vintage", 2), ("Y2k", 2)]);
    }

    #[test]
    fn test_popular_styles_fallback() {
        let styles = popular_styles(&[insta("nothing to see")]);
        assert_eq!(
            styles,
            vec![
                StyleScore { style: "Oversized".into(), score: 5 },
                StyleScore { style: "Vintage".into(), score: 4 },
                StyleScore { style: "Minimalist".into(), score: 3 },
            ]
        );
    }
}
