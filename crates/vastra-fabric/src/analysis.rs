//! Garment photo analysis and fabric type prediction.

use image::DynamicImage;

use crate::types::ImageAnalysis;
use vastra_vision::{analyze_texture, dominant_colors, ColorExtraction, TextureType};

/// Colors, texture and likely fabrics for one garment photo.
pub fn analyze_garment(img: &DynamicImage, garment_type: &str) -> ImageAnalysis {
    let colors = dominant_colors(img, &ColorExtraction::fabric());
    let texture = analyze_texture(img);
    let predicted = predict_fabric_types(texture.texture_type, garment_type);

    ImageAnalysis {
        dominant_colors: colors,
        texture_analysis: Some(texture),
        predicted_fabric_types: predicted,
    }
}

/// Up to five distinct fabric names: three for the texture family, then three
/// that suit the garment (dresses and gowns, shirts and blouses).
pub fn predict_fabric_types(texture: TextureType, garment_type: &str) -> Vec<String> {
    let by_texture: [&str; 3] = match texture {
        TextureType::SmoothSilk => ["Silk", "Satin", "Charmeuse"],
        TextureType::CottonBlend => ["Cotton", "Cotton Blend", "Poplin"],
        TextureType::TexturedWool => ["Wool", "Tweed", "Flannel"],
        TextureType::WovenLinen => ["Linen", "Linen Blend", "Canvas"],
        TextureType::SyntheticBlend => ["Polyester", "Rayon", "Viscose"],
    };
    let by_garment: &[&str] = match garment_type {
        "dress" | "gown" => &["Georgette", "Chiffon", "Crepe"],
        "shirt" | "blouse" => &["Oxford", "Chambray", "Lawn"],
        _ => &[],
    };

    let mut predicted: Vec<String> = Vec::new();
    for name in by_texture.iter().chain(by_garment).take(5) {
        if !predicted.iter().any(|p| p.as_str() == *name) {
            predicted.push(name.to_string());
        }
    }
    predicted
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_predict_for_shirt() {
        assert_eq!(
            predict_fabric_types(TextureType::CottonBlend, "shirt"),
            vec!["Cotton", "Cotton Blend", "Poplin", "Oxford", "Chambray"]
        );
    }

    #[test]
    fn test_predict_unknown_garment() {
        assert_eq!(
            predict_fabric_types(TextureType::TexturedWool, "jacket"),
            vec!["Wool", "Tweed", "Flannel"]
        );
    }

    #[test]
    fn test_analyze_plain_garment() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(80, 80, Rgb([240, 240, 235])));
        let analysis = analyze_garment(&img, "dress");

        assert_eq!(analysis.dominant_colors.len(), 1);
        assert_eq!(analysis.dominant_colors[0].name, "White");
        assert_eq!(analysis.texture_label(), "smooth_silk");
        assert_eq!(
            analysis.predicted_fabric_types,
            vec!["Silk", "Satin", "Charmeuse", "Georgette", "Chiffon"]
        );
    }
}
