//! Pooled palette of the scraped post images.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, info};

use crate::types::ColorCount;
use vastra_core::{Error, Result};
use vastra_scrape::{download, SocialPost};
use vastra_vision::{decode_image, dominant_colors, ColorExtraction, ColorSwatch};

/// Post images fetched per analysis.
pub const MAX_COLOR_IMAGES: usize = 20;
const FETCH_CONCURRENCY: usize = 4;
const TOP_COLORS: usize = 10;

/// Download each post image (http URLs only, at most [`MAX_COLOR_IMAGES`])
/// and pool their three-color palettes. Images that fail to load are skipped.
pub async fn aggregate_colors(client: &Client, posts: &[SocialPost]) -> Vec<ColorCount> {
    let urls: Vec<String> = posts
        .iter()
        .map(|p| p.image_url.as_str())
        .filter(|url| url.starts_with("http"))
        .take(MAX_COLOR_IMAGES)
        .map(str::to_owned)
        .collect();

    let palettes: Vec<Vec<ColorSwatch>> = stream::iter(urls)
        .map(|url| async move {
            match image_palette(client, &url).await {
                Ok(palette) => Some(palette),
                Err(e) => {
                    debug!("skipping {}: {}", url, e);
                    None
                }
            }
        })
        .buffered(FETCH_CONCURRENCY)
        .filter_map(|palette| async move { palette })
        .collect()
        .await;

    info!("Extracted palettes from {} post images", palettes.len());
    tally_colors(palettes)
}

async fn image_palette(client: &Client, url: &str) -> Result<Vec<ColorSwatch>> {
    let bytes = download(client, url).await?;
    tokio::task::spawn_blocking(move || {
        let img = decode_image(&bytes)?;
        Ok(dominant_colors(&img, &ColorExtraction::trend()))
    })
    .await
    .map_err(|e| Error::Internal(e.to_string()))?
}

/// Count swatches by hex, keeping the first name and rgb seen for each.
/// Top ten by count; ties stay in first-seen order.
pub fn tally_colors(palettes: Vec<Vec<ColorSwatch>>) -> Vec<ColorCount> {
    let mut counts: Vec<ColorCount> = Vec::new();
    for swatch in palettes.into_iter().flatten() {
        match counts.iter_mut().find(|c| c.hex == swatch.hex) {
            Some(existing) => existing.count += 1,
            None => counts.push(ColorCount {
                hex: swatch.hex,
                name: swatch.name,
                count: 1,
                rgb: swatch.rgb,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_COLORS);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use image::{DynamicImage, Rgb as Pixel, RgbImage};
    use vastra_scrape::Platform;
    use vastra_vision::{encode_png, Rgb};

    fn swatch(hex: &str, name: &str) -> ColorSwatch {
        ColorSwatch {
            hex: hex.to_string(),
            rgb: Rgb::from_hex(hex).unwrap(),
            percentage: 33.3,
            name: name.to_string(),
            psychology: None,
        }
    }

    #[test]
    fn test_tally_counts_by_hex() {
        let palettes = vec![
            vec![swatch("#FF0000", "Red"), swatch("#FFFFFF", "White")],
            vec![swatch("#000000", "Black"), swatch("#FFFFFF", "White")],
            vec![swatch("#000000", "Black"), swatch("#FFFFFF", "White")],
        ];
        let tally = tally_colors(palettes);
        let summary: Vec<(&str, usize)> = tally.iter().map(|c| (c.name.as_str(), c.count)).collect();
        assert_eq!(summary, vec![("White", 3), ("Black", 2), ("Red", 1)]);
        assert_eq!(tally[0].rgb, Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_tally_keeps_top_ten() {
        let palette: Vec<ColorSwatch> = (0..15)
            .map(|i| swatch(&format!("#0000{:02X}", i), "Blue"))
            .collect();
        assert_eq!(tally_colors(vec![palette]).len(), 10);
        assert!(tally_colors(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_skips_bad_images() {
        let server = MockServer::start_async().await;
        let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Pixel([250, 10, 10])));
        let png = encode_png(&red).unwrap();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/red.png");
                then.status(200).body(png.clone());
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/broken.png");
                then.status(200).body("not an image");
            })
            .await;

        let posts: Vec<SocialPost> = [server.url("/red.png"), server.url("/broken.png"), "relative.png".into()]
            .into_iter()
            .map(|image_url| SocialPost {
                image_url,
                ..SocialPost::empty(Platform::Instagram)
            })
            .collect();

        let colors = aggregate_colors(&Client::new(), &posts).await;
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].name, "Red");
        assert_eq!(colors[0].count, 1);
    }
}
