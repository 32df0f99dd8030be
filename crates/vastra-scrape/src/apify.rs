//! Apify actor client for social media scraping.

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::text::extract_hashtags;
use crate::types::{Platform, SocialPost};
use vastra_core::{Error, Result};

pub const APIFY_BASE_URL: &str = "https://api.apify.com/v2";
pub const INSTAGRAM_ACTOR: &str = "apify/instagram-hashtag-scraper";
pub const PINTEREST_ACTOR: &str = "apify/pinterest-scraper";

/// Items kept per actor run.
const MAX_ITEMS: usize = 50;
/// Search terms forwarded per actor run.
const MAX_TERMS: usize = 3;

#[derive(Clone)]
pub struct ApifyClient {
    client: Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self::with_base_url(client, token, APIFY_BASE_URL)
    }

    pub fn with_base_url(client: Client, token: impl Into<String>, base_url: &str) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run `actor_id` to completion and return its dataset items.
    pub async fn run_actor(&self, actor_id: &str, input: &Value) -> Result<Vec<Value>> {
        // Actor ids go in the path with `~` in place of `/`
        let url = format!(
            "{}/acts/{}/run-sync-get-dataset-items",
            self.base_url,
            actor_id.replace('/', "~")
        );
        debug!(actor = actor_id, %input, "Running Apify actor");

        let response = self
            .client
            .post(url)
            .query(&[("token", self.token.as_str())])
            .json(input)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Apify actor {} returned {}: {}",
                actor_id, status, body
            )));
        }

        let items: Vec<Value> = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Apify dataset: {}", e)))?;
        Ok(items)
    }

    /// Recent posts for up to three hashtags.
    pub async fn scrape_instagram(&self, hashtags: &[String]) -> Result<Vec<SocialPost>> {
        let tags: Vec<&str> = hashtags
            .iter()
            .take(MAX_TERMS)
            .map(|h| h.trim_start_matches('#'))
            .collect();
        let input = json!({
            "hashtags": tags,
            "resultsLimit": MAX_ITEMS,
            "resultsType": "posts",
        });

        let items = self.run_actor(INSTAGRAM_ACTOR, &input).await?;
        let posts: Vec<SocialPost> = items.iter().take(MAX_ITEMS).map(instagram_post).collect();
        info!("Instagram: {} posts scraped", posts.len());
        Ok(posts)
    }

    /// Pins for up to three keywords.
    pub async fn scrape_pinterest(&self, keywords: &[String]) -> Result<Vec<SocialPost>> {
        let terms: Vec<&String> = keywords.iter().take(MAX_TERMS).collect();
        let input = json!({
            "keywords": terms,
            "resultsLimit": MAX_ITEMS,
            "maxRequests": MAX_ITEMS,
        });

        let items = self.run_actor(PINTEREST_ACTOR, &input).await?;
        let pins: Vec<SocialPost> = items.iter().take(MAX_ITEMS).map(pinterest_pin).collect();
        info!("Pinterest: {} pins scraped", pins.len());
        Ok(pins)
    }
}

fn str_field(item: &Value, key: &str) -> String {
    item.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn count_field(item: &Value, key: &str) -> u64 {
    item.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn instagram_post(item: &Value) -> SocialPost {
    let caption = str_field(item, "caption");
    SocialPost {
        hashtags: extract_hashtags(&caption),
        caption,
        likes: count_field(item, "likesCount"),
        comments: count_field(item, "commentsCount"),
        image_url: str_field(item, "displayUrl"),
        posted_at: str_field(item, "timestamp"),
        author: str_field(item, "ownerUsername"),
        ..SocialPost::empty(Platform::Instagram)
    }
}

fn pinterest_pin(item: &Value) -> SocialPost {
    let description = str_field(item, "description");
    SocialPost {
        hashtags: extract_hashtags(&description),
        description,
        title: str_field(item, "title"),
        saves: count_field(item, "saveCount"),
        likes: count_field(item, "likeCount"),
        image_url: str_field(item, "imageUrl"),
        source_url: str_field(item, "sourceUrl"),
        ..SocialPost::empty(Platform::Pinterest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_instagram_run() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/acts/apify~instagram-hashtag-scraper/run-sync-get-dataset-items")
                    .query_param("token", "apify-token")
                    .json_body(json!({
                        "hashtags": ["fashion", "ootd", "streetstyle"],
                        "resultsLimit": 50,
                        "resultsType": "posts"
                    }));
                then.status(201).json_body(json!([
                    {
                        "caption": "Monsoon layers #OOTD #Linen",
                        "likesCount": 120,
                        "commentsCount": 4,
                        "displayUrl": "https://cdn/ig1.jpg",
                        "timestamp": "2025-06-01T10:00:00Z",
                        "ownerUsername": "stylist"
                    },
                    {"caption": null, "likesCount": null}
                ]));
            })
            .await;

        let apify = ApifyClient::with_base_url(Client::new(), "apify-token", &server.base_url());
        let tags: Vec<String> = ["#fashion", "ootd", "#streetstyle", "#ignored"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let posts = apify.scrape_instagram(&tags).await.unwrap();

        mock.assert_async().await;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].platform, Platform::Instagram);
        assert_eq!(posts[0].hashtags, vec!["#ootd", "#linen"]);
        assert_eq!(posts[0].likes, 120);
        assert_eq!(posts[0].author, "stylist");
        assert_eq!(posts[1].caption, "");
        assert_eq!(posts[1].likes, 0);
    }

    #[tokio::test]
    async fn test_pinterest_caps_items() {
        let server = MockServer::start_async().await;
        let items: Vec<Value> = (0..60)
            .map(|i| json!({"title": format!("Pin {}", i), "description": "#boho dress", "saveCount": i}))
            .collect();
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/acts/apify~pinterest-scraper/run-sync-get-dataset-items")
                    .json_body_partial(r#"{"maxRequests": 50}"#);
                then.status(200).json_body(Value::Array(items));
            })
            .await;

        let apify = ApifyClient::with_base_url(Client::new(), "t", &server.base_url());
        let pins = apify
            .scrape_pinterest(&["boho".to_string()])
            .await
            .unwrap();

        assert_eq!(pins.len(), 50);
        assert_eq!(pins[3].saves, 3);
        assert_eq!(pins[0].hashtags, vec!["#boho"]);
        assert_eq!(pins[0].text(), "#boho dress");
    }

    #[tokio::test]
    async fn test_actor_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(402).body("Not enough credits");
            })
            .await;

        let apify = ApifyClient::with_base_url(Client::new(), "t", &server.base_url());
        let err = apify.scrape_pinterest(&[]).await.unwrap_err();
        assert!(err.to_string().contains("Not enough credits"));
    }
}
