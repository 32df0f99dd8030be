//! SerpAPI search client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{ImageResult, OrganicResult, ShoppingResult};
use vastra_core::{Error, Result};

pub const SERPAPI_BASE_URL: &str = "https://serpapi.com";

/// Thin client over `GET /search`. All searches are localized to India
/// (`gl=in`, `hl=en`).
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, SERPAPI_BASE_URL)
    }

    pub fn with_base_url(client: Client, api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Google Shopping listings for `query`.
    pub async fn search_shopping(&self, query: &str, num: u32) -> Result<Vec<ShoppingResult>> {
        let data = self
            .search(&[("engine", "google_shopping"), ("q", query)], num)
            .await?;
        Ok(results(&data, "shopping_results"))
    }

    /// Google web results restricted to `site`.
    pub async fn search_site(&self, site: &str, terms: &str, num: u32) -> Result<Vec<OrganicResult>> {
        let query = format!("site:{} {}", site, terms);
        let data = self.search(&[("engine", "google"), ("q", &query)], num).await?;
        Ok(results(&data, "organic_results"))
    }

    /// Google Images, first page.
    pub async fn search_images(&self, query: &str, num: u32) -> Result<Vec<ImageResult>> {
        let data = self
            .search(&[("q", query), ("tbm", "isch"), ("ijn", "0")], num)
            .await?;
        Ok(results(&data, "images_results"))
    }

    async fn search(&self, params: &[(&str, &str)], num: u32) -> Result<Value> {
        debug!(?params, "SerpAPI search");
        let num = num.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(params)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("gl", "in"),
                ("hl", "en"),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 401 {
                warn!("SerpAPI rejected the API key");
            }
            return Err(Error::Upstream(format!("SerpAPI returned {}: {}", status, body)));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("SerpAPI response: {}", e)))?;
        if let Some(err) = data.get("error").and_then(Value::as_str) {
            return Err(Error::Upstream(format!("SerpAPI: {}", err)));
        }
        Ok(data)
    }
}

/// Deserialize the array at `key`, skipping entries that do not fit.
fn results<T: DeserializeOwned>(data: &Value, key: &str) -> Vec<T> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_shopping_search() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("engine", "google_shopping")
                    .query_param("q", "cotton fabric per meter")
                    .query_param("api_key", "serp-key")
                    .query_param("gl", "in")
                    .query_param("num", "30");
                then.status(200).json_body(json!({
                    "shopping_results": [
                        {"title": "Cotton Poplin", "price": "₹249.00", "source": "Fabriclore",
                         "link": "https://example.com/p", "thumbnail": "https://example.com/p.jpg"},
                        {"title": "Cambric", "rating": 4.5}
                    ]
                }));
            })
            .await;

        let serp = SerpApiClient::with_base_url(Client::new(), "serp-key", &server.base_url());
        let results = serp.search_shopping("cotton fabric per meter", 30).await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].price.as_deref(), Some("₹249.00"));
        assert_eq!(results[0].image_url(), Some("https://example.com/p.jpg"));
        assert_eq!(results[1].rating, Some(4.5));
    }

    #[tokio::test]
    async fn test_site_and_image_queries() {
        let server = MockServer::start_async().await;
        let site_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("engine", "google")
                    .query_param("q", "site:myntra.com silk saree fabric");
                then.status(200).json_body(json!({
                    "organic_results": [{"title": "Silk", "snippet": "₹999", "link": "https://m"}]
                }));
            })
            .await;
        let image_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("tbm", "isch")
                    .query_param("ijn", "0");
                then.status(200).json_body(json!({
                    "images_results": [{"original": "https://img/1.jpg", "title": "Look"}]
                }));
            })
            .await;

        let serp = SerpApiClient::with_base_url(Client::new(), "k", &server.base_url());
        let organic = serp.search_site("myntra.com", "silk saree fabric", 40).await.unwrap();
        let images = serp.search_images("kurta men's outfit fashion", 10).await.unwrap();

        site_mock.assert_async().await;
        image_mock.assert_async().await;
        assert_eq!(organic[0].snippet, "₹999");
        assert_eq!(images[0].original.as_deref(), Some("https://img/1.jpg"));
    }

    #[tokio::test]
    async fn test_errors_surface() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(401).body("Invalid API key");
            })
            .await;

        let serp = SerpApiClient::with_base_url(Client::new(), "bad", &server.base_url());
        let err = serp.search_shopping("linen", 10).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn test_missing_results_key_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!({"search_metadata": {}}));
            })
            .await;

        let serp = SerpApiClient::with_base_url(Client::new(), "k", &server.base_url());
        assert!(serp.search_images("anything", 10).await.unwrap().is_empty());
    }
}
