//! Bar and pie charts rendered to PNG.
//!
//! The PNG carries only the shapes; titles, labels and values travel next
//! to it in the JSON so the frontend can draw its own legend.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use image::{DynamicImage, Rgb as Pixel, RgbImage};
use serde::Serialize;
use tracing::warn;

use crate::types::{ColorCount, HashtagAnalysis, StyleScore};
use vastra_core::Result;
use vastra_vision::{to_png_data_url, Rgb};

pub const BACKGROUND: Pixel<u8> = Pixel([0x1e, 0x29, 0x3b]);
const AXIS: Pixel<u8> = Pixel([0x47, 0x55, 0x69]);

pub const BAR_WIDTH: u32 = 960;
pub const BAR_HEIGHT: u32 = 480;
pub const PLOT_LEFT: u32 = 60;
pub const PLOT_TOP: u32 = 30;
const PLOT_RIGHT: u32 = 20;
const PLOT_BOTTOM: u32 = 50;

pub const PIE_SIZE: u32 = 600;
pub const PIE_RADIUS: f64 = 250.0;

/// Fallback wedge colors when a label has none of its own.
const PALETTE: [&str; 8] = [
    "#06b6d4", "#ec4899", "#f59e0b", "#8b5cf6", "#10b981", "#ef4444", "#3b82f6", "#eab308",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Pie,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    /// `data:image/png;base64,...`
    pub image: String,
}

impl Chart {
    /// Render a chart. `None` when there is nothing to draw.
    pub fn render(
        kind: ChartKind,
        title: &str,
        labels: Vec<String>,
        values: Vec<f64>,
        colors: Vec<String>,
    ) -> Result<Option<Chart>> {
        if values.is_empty() || values.iter().sum::<f64>() <= 0.0 {
            return Ok(None);
        }
        let fills: Vec<Pixel<u8>> = (0..values.len())
            .map(|i| {
                colors
                    .get(i)
                    .or_else(|| colors.first())
                    .and_then(|hex| Rgb::from_hex(hex))
                    .or_else(|| Rgb::from_hex(PALETTE[i % PALETTE.len()]))
                    .map(|c| Pixel([c.r, c.g, c.b]))
                    .unwrap_or(AXIS)
            })
            .collect();

        let canvas = match kind {
            ChartKind::Bar => draw_bars(&values, &fills),
            ChartKind::HorizontalBar => draw_horizontal_bars(&values, &fills),
            ChartKind::Pie => draw_pie(&values, &fills),
        };

        Ok(Some(Chart {
            kind,
            title: title.to_string(),
            labels,
            values,
            colors,
            image: to_png_data_url(&DynamicImage::ImageRgb8(canvas))?,
        }))
    }
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Pixel<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().cloned().fold(0.0, f64::max)
}

fn draw_bars(values: &[f64], fills: &[Pixel<u8>]) -> RgbImage {
    let mut img = RgbImage::from_pixel(BAR_WIDTH, BAR_HEIGHT, BACKGROUND);
    let plot_w = BAR_WIDTH - PLOT_LEFT - PLOT_RIGHT;
    let plot_h = BAR_HEIGHT - PLOT_TOP - PLOT_BOTTOM;
    let baseline = PLOT_TOP + plot_h;
    let max = max_value(values);

    let slot = plot_w as f64 / values.len() as f64;
    let bar = (slot * 0.7).max(1.0);
    for (i, (value, fill)) in values.iter().zip(fills).enumerate() {
        let height = (value / max * plot_h as f64).round() as u32;
        let x0 = PLOT_LEFT as f64 + slot * i as f64 + (slot - bar) / 2.0;
        fill_rect(
            &mut img,
            x0.round() as u32,
            baseline - height,
            (x0 + bar).round() as u32,
            baseline,
            *fill,
        );
    }
    fill_rect(&mut img, PLOT_LEFT, baseline, PLOT_LEFT + plot_w, baseline + 2, AXIS);
    img
}

/// First value on top.
fn draw_horizontal_bars(values: &[f64], fills: &[Pixel<u8>]) -> RgbImage {
    let mut img = RgbImage::from_pixel(BAR_WIDTH, BAR_HEIGHT, BACKGROUND);
    let plot_w = BAR_WIDTH - PLOT_LEFT - PLOT_RIGHT;
    let plot_h = BAR_HEIGHT - PLOT_TOP - PLOT_BOTTOM;
    let max = max_value(values);

    let slot = plot_h as f64 / values.len() as f64;
    let bar = (slot * 0.7).max(1.0);
    for (i, (value, fill)) in values.iter().zip(fills).enumerate() {
        let width = (value / max * plot_w as f64).round() as u32;
        let y0 = PLOT_TOP as f64 + slot * i as f64 + (slot - bar) / 2.0;
        fill_rect(
            &mut img,
            PLOT_LEFT,
            y0.round() as u32,
            PLOT_LEFT + width,
            (y0 + bar).round() as u32,
            *fill,
        );
    }
    fill_rect(&mut img, PLOT_LEFT - 2, PLOT_TOP, PLOT_LEFT, PLOT_TOP + plot_h, AXIS);
    img
}

/// Wedges start at twelve o'clock and run counter-clockwise.
fn draw_pie(values: &[f64], fills: &[Pixel<u8>]) -> RgbImage {
    let mut img = RgbImage::from_pixel(PIE_SIZE, PIE_SIZE, BACKGROUND);
    let total: f64 = values.iter().sum();
    let mut bounds = Vec::with_capacity(values.len());
    let mut acc = 0.0;
    for value in values {
        acc += value / total * TAU;
        bounds.push(acc);
    }

    let center = PIE_SIZE as f64 / 2.0;
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - center;
        let dy = center - (y as f64 + 0.5);
        if dx * dx + dy * dy > PIE_RADIUS * PIE_RADIUS {
            continue;
        }
        let angle = (dy.atan2(dx) - FRAC_PI_2).rem_euclid(TAU);
        let wedge = bounds
            .iter()
            .position(|end| angle < *end)
            .unwrap_or(values.len() - 1);
        *pixel = fills[wedge];
    }
    img
}

fn push_chart(
    charts: &mut BTreeMap<&'static str, Chart>,
    key: &'static str,
    rendered: Result<Option<Chart>>,
) {
    match rendered {
        Ok(Some(chart)) => {
            charts.insert(key, chart);
        }
        Ok(None) => {}
        Err(e) => warn!("{} chart failed: {}", key, e),
    }
}

/// The five trend charts. Charts without data are left out.
pub fn build_charts(
    hashtags: &HashtagAnalysis,
    colors: &[ColorCount],
    styles: &[StyleScore],
    instagram_posts: usize,
    pinterest_posts: usize,
) -> BTreeMap<&'static str, Chart> {
    let mut charts = BTreeMap::new();

    let top_tags = &hashtags.top_hashtags[..hashtags.top_hashtags.len().min(10)];
    push_chart(
        &mut charts,
        "hashtag_frequency",
        Chart::render(
            ChartKind::Bar,
            "Top 10 Hashtags Frequency",
            top_tags.iter().map(|t| t.tag.trim_start_matches('#').to_string()).collect(),
            top_tags.iter().map(|t| t.count as f64).collect(),
            vec!["#06b6d4".into()],
        ),
    );

    let top_colors = &colors[..colors.len().min(8)];
    push_chart(
        &mut charts,
        "color_distribution",
        Chart::render(
            ChartKind::Pie,
            "Color Palette Distribution",
            top_colors.iter().map(|c| c.name.clone()).collect(),
            top_colors.iter().map(|c| c.count as f64).collect(),
            top_colors.iter().map(|c| c.hex.clone()).collect(),
        ),
    );

    let top_keywords = &hashtags.top_keywords[..hashtags.top_keywords.len().min(8)];
    push_chart(
        &mut charts,
        "keyword_frequency",
        Chart::render(
            ChartKind::HorizontalBar,
            "Top Keywords Distribution",
            top_keywords.iter().map(|k| k.keyword.clone()).collect(),
            top_keywords.iter().map(|k| k.count as f64).collect(),
            vec!["#ec4899".into()],
        ),
    );

    let top_styles = &styles[..styles.len().min(6)];
    push_chart(
        &mut charts,
        "style_distribution",
        Chart::render(
            ChartKind::Bar,
            "Popular Styles Distribution",
            top_styles.iter().map(|s| s.style.clone()).collect(),
            top_styles.iter().map(|s| s.score as f64).collect(),
            vec!["#f59e0b".into()],
        ),
    );

    push_chart(
        &mut charts,
        "platform_distribution",
        Chart::render(
            ChartKind::Pie,
            "Data Source Distribution",
            vec!["Instagram".into(), "Pinterest".into()],
            vec![instagram_posts as f64, pinterest_posts as f64],
            vec!["#E4405F".into(), "#E60B51".into()],
        ),
    );

    charts
}
