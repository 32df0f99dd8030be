use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};

use vastra_core::{Error, Result};

/// Decode an uploaded image, sniffing the format from its bytes.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(Error::Image("empty image".into()));
    }
    image::load_from_memory(bytes).map_err(|e| Error::Image(e.to_string()))
}

/// Decode base64 image data, with or without a `data:...;base64,` prefix.
pub fn decode_base64_image(data: &str) -> Result<DynamicImage> {
    let payload = match data.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::Image(format!("invalid base64: {}", e)))?;
    decode_image(&bytes)
}

pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| Error::Image(e.to_string()))?;
    Ok(buf.into_inner())
}

/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Jpeg)
        .map_err(|e| Error::Image(e.to_string()))?;
    Ok(buf.into_inner())
}

pub fn to_png_data_url(img: &DynamicImage) -> Result<String> {
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(encode_png(img)?)))
}

pub fn to_jpeg_data_url(img: &DynamicImage) -> Result<String> {
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(encode_jpeg(img)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_png_data_url_decodes_back() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([10, 200, 30])));
        let url = to_png_data_url(&img).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let back = decode_base64_image(&url).unwrap();
        assert_eq!((back.width(), back.height()), (8, 4));
        assert_eq!(back.to_rgb8().get_pixel(3, 2), &Rgb([10, 200, 30]));
    }

    #[test]
    fn test_jpeg_flattens_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 128])));
        let bytes = encode_jpeg(&img).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert!(to_jpeg_data_url(&img).unwrap().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode_image(b""), Err(Error::Image(_))));
        assert!(matches!(decode_image(b"not an image"), Err(Error::Image(_))));
        assert!(decode_base64_image("data:image/png;base64,@@@").is_err());
    }
}
