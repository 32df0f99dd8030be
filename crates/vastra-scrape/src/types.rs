//! Result types shared by the scraping clients.

use serde::{Deserialize, Serialize};

/// One Google Shopping listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingResult {
    #[serde(default)]
    pub title: String,
    /// Display price, e.g. `"₹1,299.00"`.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl ShoppingResult {
    /// Product image, falling back to the thumbnail.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().or(self.thumbnail.as_deref())
    }
}

/// One organic Google result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: String,
}

/// One Google Images hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Pinterest,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Pinterest => "pinterest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Pinterest => "Pinterest",
        }
    }

    /// Parse a platform name as sent by the frontend (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "instagram" => Some(Self::Instagram),
            "pinterest" => Some(Self::Pinterest),
            _ => None,
        }
    }
}

/// A scraped Instagram post or Pinterest pin.
///
/// Instagram fills `caption`, `comments`, `posted_at` and `author`; Pinterest
/// fills `title`, `description`, `saves` and `source_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: Platform,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub posted_at: String,
    #[serde(default)]
    pub author: String,
}

impl SocialPost {
    pub fn empty(platform: Platform) -> Self {
        Self {
            platform,
            caption: String::new(),
            title: String::new(),
            description: String::new(),
            likes: 0,
            comments: 0,
            saves: 0,
            hashtags: Vec::new(),
            image_url: String::new(),
            source_url: String::new(),
            posted_at: String::new(),
            author: String::new(),
        }
    }

    /// The post's main text: caption, else description, else title.
    pub fn text(&self) -> &str {
        [&self.caption, &self.description, &self.title]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}
