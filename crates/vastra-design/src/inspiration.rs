//! Inspiration photos from Google Images and the 3×3 collage built from them.

use futures::future::join_all;
use image::DynamicImage;
use reqwest::Client;
use tracing::{info, warn};

use crate::types::Inspiration;
use vastra_scrape::{download, SerpApiClient};
use vastra_vision::{build_collage, decode_image, to_png_data_url};

const SEARCHED_KEYWORDS: usize = 3;
const IMAGES_PER_KEYWORD: usize = 10;
const MAX_INSPIRATIONS: usize = 15;
const COLLAGE_SLOTS: usize = 9;

fn search_query(keyword: &str, male: bool) -> String {
    let audience = if male { "men's" } else { "women's" };
    format!("{} {} outfit fashion", keyword, audience)
}

async fn search_keyword(serp: &SerpApiClient, query: String) -> Vec<Inspiration> {
    match serp.search_images(&query, IMAGES_PER_KEYWORD as u32).await {
        Ok(images) => images
            .into_iter()
            .take(IMAGES_PER_KEYWORD)
            .filter_map(|img| {
                let url = img.original.filter(|u| u.starts_with("http"))?;
                Some(Inspiration {
                    platform: "pinterest/google".into(),
                    image_url: url,
                    title: img.title.unwrap_or_else(|| query.clone()),
                    description: query.clone(),
                })
            })
            .collect(),
        Err(e) => {
            warn!("image search '{}' failed: {}", query, e);
            Vec::new()
        }
    }
}

/// Image results for the first three keywords, searched concurrently and
/// kept in keyword order, at most 15.
pub async fn search_inspiration(serp: &SerpApiClient, keywords: &[String], male: bool) -> Vec<Inspiration> {
    let searches = keywords
        .iter()
        .take(SEARCHED_KEYWORDS)
        .map(|kw| search_keyword(serp, search_query(kw, male)));
    let mut found: Vec<Inspiration> = join_all(searches).await.into_iter().flatten().collect();
    found.truncate(MAX_INSPIRATIONS);
    info!("{} inspiration images found", found.len());
    found
}

async fn load(client: &Client, url: &str) -> Option<DynamicImage> {
    let loaded = match download(client, url).await {
        Ok(bytes) => decode_image(&bytes),
        Err(e) => Err(e),
    };
    match loaded {
        Ok(img) => Some(img),
        Err(e) => {
            warn!("collage image {} skipped: {}", url, e);
            None
        }
    }
}

/// Collage of the first nine inspirations as a PNG data URL. Images that
/// fail to load leave their tile empty. `None` when there is nothing to show.
pub async fn inspiration_collage(client: &Client, inspirations: &[Inspiration]) -> Option<String> {
    if inspirations.is_empty() {
        return None;
    }
    let tiles: Vec<Option<DynamicImage>> = join_all(
        inspirations
            .iter()
            .take(COLLAGE_SLOTS)
            .map(|insp| load(client, &insp.image_url)),
    )
    .await;
    let loaded = tiles.iter().filter(|t| t.is_some()).count();

    let rendered = tokio::task::spawn_blocking(move || to_png_data_url(&build_collage(&tiles))).await;
    match rendered {
        Ok(Ok(url)) => {
            info!("Collage created with {} images", loaded);
            Some(url)
        }
        Ok(Err(e)) => {
            warn!("collage encoding failed: {}", e);
            None
        }
        Err(e) => {
            warn!("collage task failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use vastra_vision::{decode_base64_image, encode_png, COLLAGE_BACKGROUND, COLLAGE_SIZE};

    #[tokio::test]
    async fn test_search_uses_gender_and_filters_urls() {
        let server = MockServer::start_async().await;
        let kurta = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("q", "kurta men's outfit fashion")
                    .query_param("tbm", "isch");
                then.status(200).json_body(json!({
                    "images_results": [
                        {"original": "https://img/1.jpg", "title": "Kurta 1"},
                        {"original": "/relative.jpg"},
                        {"original": "https://img/2.jpg"}
                    ]
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "wedding men's outfit fashion");
                then.status(500);
            })
            .await;

        let serp = SerpApiClient::with_base_url(Client::new(), "k", &server.base_url());
        let keywords = vec!["kurta".to_string(), "wedding".to_string()];
        let found = search_inspiration(&serp, &keywords, true).await;

        kurta.assert_async().await;
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title, "Kurta 1");
        assert_eq!(found[1].title, "kurta men's outfit fashion");
        assert_eq!(found[1].description, "kurta men's outfit fashion");
        assert_eq!(found[0].platform, "pinterest/google");
    }

    #[tokio::test]
    async fn test_search_caps_total() {
        let server = MockServer::start_async().await;
        let results: Vec<_> = (0..12)
            .map(|i| json!({"original": format!("https://img/{}.jpg", i)}))
            .collect();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!({ "images_results": results }));
            })
            .await;

        let serp = SerpApiClient::with_base_url(Client::new(), "k", &server.base_url());
        let keywords: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let found = search_inspiration(&serp, &keywords, false).await;
        // 10 per keyword, three keywords, capped at 15
        assert_eq!(found.len(), 15);
        assert_eq!(found[10].description, "b women's outfit fashion");
    }

    #[tokio::test]
    async fn test_collage_places_loaded_tiles() {
        let server = MockServer::start_async().await;
        let green = encode_png(&DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            60,
            40,
            image::Rgb([0, 200, 0]),
        )))
        .unwrap();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/green.png");
                then.status(200).body(green.clone());
            })
            .await;

        let insp = |url: String| Inspiration {
            platform: "pinterest/google".into(),
            image_url: url,
            title: String::new(),
            description: String::new(),
        };
        let inspirations = vec![insp(server.url("/missing.png")), insp(server.url("/green.png"))];

        let url = inspiration_collage(&Client::new(), &inspirations).await.unwrap();
        let collage = decode_base64_image(&url).unwrap().to_rgb8();
        assert_eq!(collage.dimensions(), (COLLAGE_SIZE, COLLAGE_SIZE));
        assert_eq!(collage.get_pixel(150, 150).0, COLLAGE_BACKGROUND);
        assert_eq!(collage.get_pixel(450, 150).0, [0, 200, 0]);

        assert!(inspiration_collage(&Client::new(), &[]).await.is_none());
    }
}
