//! Dominant color extraction and color naming.

use image::imageops::FilterType;
use image::DynamicImage;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::kmeans::{kmeans, KMeansInit, KMeansOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex_upper(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn hex_lower(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Packed `0xRRGGBB`, the form three.js materials take.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// One extracted color and its share of the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub hex: String,
    pub rgb: Rgb,
    /// Share of pixels, in percent, one decimal.
    pub percentage: f64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychology: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Exact(u32, u32),
    /// Shrink so the longer side is at most this many pixels.
    MaxSide(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// Nearest of twelve basic colors.
    Nearest,
    /// Coarse color family plus a psychology note.
    Family,
}

/// Everything that varies between the tools' color pickers.
#[derive(Debug, Clone)]
pub struct ColorExtraction {
    pub resize: Resize,
    pub kmeans: KMeansOptions,
    pub uppercase_hex: bool,
    pub naming: Naming,
    /// Keep at most this many swatches after sorting.
    pub limit: usize,
}

impl ColorExtraction {
    /// Garment photo analysis for fabric matching.
    pub fn fabric() -> Self {
        Self {
            resize: Resize::Exact(150, 150),
            kmeans: KMeansOptions {
                k: 5,
                init: KMeansInit::PlusPlus,
                max_iter: 100,
                epsilon: 0.2,
                attempts: 10,
            },
            uppercase_hex: true,
            naming: Naming::Nearest,
            limit: 5,
        }
    }

    /// Quick palette of a scraped social post image.
    pub fn trend() -> Self {
        Self {
            resize: Resize::Exact(150, 150),
            kmeans: KMeansOptions {
                k: 3,
                init: KMeansInit::Random,
                max_iter: 10,
                epsilon: 1.0,
                attempts: 10,
            },
            uppercase_hex: true,
            naming: Naming::Nearest,
            limit: 3,
        }
    }

    /// Color & pattern analyzer uploads.
    pub fn palette() -> Self {
        Self {
            resize: Resize::MaxSide(500),
            kmeans: KMeansOptions {
                k: 6,
                init: KMeansInit::Random,
                max_iter: 10,
                epsilon: 1.0,
                attempts: 10,
            },
            uppercase_hex: false,
            naming: Naming::Family,
            limit: 6,
        }
    }
}

/// Extract dominant colors with the thread-local RNG.
pub fn dominant_colors(img: &DynamicImage, extraction: &ColorExtraction) -> Vec<ColorSwatch> {
    dominant_colors_with_rng(img, extraction, &mut rand::rng())
}

/// Extract dominant colors, sorted by share (largest first).
pub fn dominant_colors_with_rng<R: Rng + ?Sized>(
    img: &DynamicImage,
    extraction: &ColorExtraction,
    rng: &mut R,
) -> Vec<ColorSwatch> {
    let resized = match extraction.resize {
        Resize::Exact(w, h) => img.resize_exact(w, h, FilterType::Triangle),
        Resize::MaxSide(max) if img.width() > max || img.height() > max => {
            img.resize(max, max, FilterType::Triangle)
        }
        Resize::MaxSide(_) => img.clone(),
    };
    let rgb = resized.to_rgb8();
    let points: Vec<[f32; 3]> = rgb
        .pixels()
        .map(|p| [p[0] as f32, p[1] as f32, p[2] as f32])
        .collect();
    if points.is_empty() {
        return Vec::new();
    }

    let total = points.len() as f64;
    let mut swatches: Vec<ColorSwatch> = kmeans(&points, &extraction.kmeans, rng)
        .into_iter()
        .map(|cluster| {
            // Truncate like a u8 cast of the float center
            let channel = |v: f32| v.clamp(0.0, 255.0) as u8;
            let rgb = Rgb::new(
                channel(cluster.center[0]),
                channel(cluster.center[1]),
                channel(cluster.center[2]),
            );
            let (name, psychology) = match extraction.naming {
                Naming::Nearest => (nearest_color_name(rgb).to_string(), None),
                Naming::Family => {
                    let (name, psychology) = color_family(rgb);
                    (name.to_string(), Some(psychology.to_string()))
                }
            };
            ColorSwatch {
                hex: if extraction.uppercase_hex { rgb.hex_upper() } else { rgb.hex_lower() },
                rgb,
                percentage: round1(cluster.size as f64 / total * 100.0),
                name,
                psychology,
            }
        })
        .collect();

    swatches.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    swatches.truncate(extraction.limit);
    swatches
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

const NAMED_COLORS: &[((i32, i32, i32), &str)] = &[
    ((255, 0, 0), "Red"),
    ((0, 255, 0), "Green"),
    ((0, 0, 255), "Blue"),
    ((255, 255, 0), "Yellow"),
    ((255, 165, 0), "Orange"),
    ((128, 0, 128), "Purple"),
    ((0, 0, 0), "Black"),
    ((255, 255, 255), "White"),
    ((128, 128, 128), "Gray"),
    ((165, 42, 42), "Brown"),
    ((255, 192, 203), "Pink"),
    ((0, 128, 128), "Teal"),
];

/// Nearest basic color by Euclidean RGB distance. Ties keep table order.
pub fn nearest_color_name(rgb: Rgb) -> &'static str {
    let (r, g, b) = (rgb.r as i32, rgb.g as i32, rgb.b as i32);
    NAMED_COLORS
        .iter()
        .min_by_key(|((cr, cg, cb), _)| (r - cr).pow(2) + (g - cg).pow(2) + (b - cb).pow(2))
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

/// Coarse color family and the mood it conveys. First matching rule wins.
pub fn color_family(rgb: Rgb) -> (&'static str, &'static str) {
    let (r, g, b) = (rgb.r, rgb.g, rgb.b);
    if r > 200 && g > 100 && b < 100 {
        ("Red/Orange", "Warm, energetic, passionate")
    } else if r > 100 && g > 100 && b < 100 {
        ("Yellow/Brown", "Warm, earthy, natural")
    } else if r < 100 && g > 150 && b < 100 {
        ("Green", "Calm, nature, growth")
    } else if r < 100 && g < 100 && b > 150 {
        ("Blue", "Cool, trust, stability")
    } else if r > 150 && g < 100 && b > 150 {
        ("Purple", "Royal, creative, mysterious")
    } else if r > 150 && g > 150 && b > 150 {
        ("White/Light", "Clean, pure, minimalist")
    } else {
        ("Dark/Gray", "Sophisticated, neutral, elegant")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb as Px, RgbImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn split_image(width: u32, blue_cols: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, 100, |x, _| {
            if x < blue_cols {
                Px([20, 30, 220])
            } else {
                Px([250, 250, 250])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_fabric_extraction() {
        let mut rng = StdRng::seed_from_u64(42);
        // 150 wide: the 150x150 resize only stretches vertically
        let img = split_image(150, 120);
        let colors = dominant_colors_with_rng(&img, &ColorExtraction::fabric(), &mut rng);

        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].hex, "#141EDC");
        assert_eq!(colors[0].name, "Blue");
        assert_eq!(colors[0].percentage, 80.0);
        assert_eq!(colors[1].name, "White");
        assert_eq!(colors[1].percentage, 20.0);
        assert!(colors[0].psychology.is_none());
    }

    #[test]
    fn test_palette_uses_lowercase_and_psychology() {
        let mut rng = StdRng::seed_from_u64(9);
        let colors = dominant_colors_with_rng(&split_image(200, 150), &ColorExtraction::palette(), &mut rng);

        assert_eq!(colors[0].hex, "#141edc");
        assert_eq!(colors[0].percentage, 75.0);
        assert_eq!(colors[0].name, "Blue");
        assert_eq!(colors[1].name, "White/Light");
        assert_eq!(
            colors[1].psychology.as_deref(),
            Some("Clean, pure, minimalist")
        );
    }

    #[test]
    fn test_nearest_color_name() {
        assert_eq!(nearest_color_name(Rgb::new(250, 10, 10)), "Red");
        assert_eq!(nearest_color_name(Rgb::new(120, 120, 130)), "Gray");
        assert_eq!(nearest_color_name(Rgb::new(250, 190, 200)), "Pink");
        assert_eq!(nearest_color_name(Rgb::new(0, 0, 0)), "Black");
    }

    #[test]
    fn test_color_family_order() {
        assert_eq!(color_family(Rgb::new(230, 120, 40)).0, "Red/Orange");
        assert_eq!(color_family(Rgb::new(150, 120, 40)).0, "Yellow/Brown");
        assert_eq!(color_family(Rgb::new(40, 200, 40)).0, "Green");
        assert_eq!(color_family(Rgb::new(20, 20, 200)).0, "Blue");
        assert_eq!(color_family(Rgb::new(200, 40, 200)).0, "Purple");
        assert_eq!(color_family(Rgb::new(220, 220, 220)).0, "White/Light");
        assert_eq!(color_family(Rgb::new(60, 60, 60)).0, "Dark/Gray");
    }

    #[test]
    fn test_hex_round_trip_and_packing() {
        let rgb = Rgb::from_hex("#E5BCA8").unwrap();
        assert_eq!(rgb, Rgb::new(0xE5, 0xBC, 0xA8));
        assert_eq!(rgb.to_u32(), 0xE5BCA8);
        assert!(Rgb::from_hex("#12345").is_none());
        assert!(Rgb::from_hex("zzzzzz").is_none());
    }
}
