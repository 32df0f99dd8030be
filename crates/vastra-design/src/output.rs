//! Download formats and the Pollinations quick-design URL.

use chrono::{DateTime, Local};
use image::DynamicImage;

use vastra_core::{Error, Result};
use vastra_vision::{decode_image, encode_jpeg, encode_png};

const POLLINATIONS_BASE: &str = "https://image.pollinations.ai/prompt/";

/// Image URL for a quick design sketch. The service renders on first GET.
pub fn pollinations_url(description: &str, style: &str) -> String {
    let prompt = format!(
        "fashion design {} in {} style, high quality, professional",
        description, style
    );
    format!("{}{}", POLLINATIONS_BASE, urlencoding::encode(&prompt))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Png,
    /// Keeps the extension the caller asked for (`jpg` or `jpeg`).
    Jpeg(&'static str),
}

impl DownloadFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" => Ok(Self::Jpeg("jpg")),
            "jpeg" => Ok(Self::Jpeg("jpeg")),
            other => Err(Error::Validation(format!("Unsupported format: {}", other))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg(ext) => *ext,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg(_) => "image/jpeg",
        }
    }

    fn encode(&self, img: &DynamicImage) -> Result<Vec<u8>> {
        match self {
            Self::Png => encode_png(img),
            Self::Jpeg(_) => encode_jpeg(img),
        }
    }
}

/// Re-encode generated image bytes into the requested format.
pub fn transcode(bytes: &[u8], format: DownloadFormat) -> Result<Vec<u8>> {
    format.encode(&decode_image(bytes)?)
}

/// `fashion-design-20250601-101500.png`
pub fn download_filename(now: DateTime<Local>, format: DownloadFormat) -> String {
    format!("fashion-design-{}.{}", now.format("%Y%m%d-%H%M%S"), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use image::{ImageFormat, Rgba, RgbaImage};

    #[test]
    fn test_pollinations_url_encodes_prompt() {
        assert_eq!(
            pollinations_url("red saree", "modern"),
            "https://image.pollinations.ai/prompt/fashion%20design%20red%20saree%20in%20modern%20style%2C%20high%20quality%2C%20professional"
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(DownloadFormat::parse("PNG").unwrap(), DownloadFormat::Png);
        assert_eq!(DownloadFormat::parse("jpg").unwrap().extension(), "jpg");
        assert_eq!(DownloadFormat::parse("JPEG").unwrap().mime(), "image/jpeg");
        assert!(matches!(DownloadFormat::parse("gif"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_transcode_rgba_png_to_jpeg() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 128])));
        let png = encode_png(&rgba).unwrap();

        let jpeg = transcode(&png, DownloadFormat::Jpeg("jpg")).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);

        let again = transcode(&png, DownloadFormat::Png).unwrap();
        assert_eq!(image::guess_format(&again).unwrap(), ImageFormat::Png);

        assert!(transcode(b"garbage", DownloadFormat::Png).is_err());
    }

    #[test]
    fn test_download_filename() {
        let now = Local.with_ymd_and_hms(2025, 6, 1, 10, 15, 0).unwrap();
        assert_eq!(
            download_filename(now, DownloadFormat::Jpeg("jpeg")),
            "fashion-design-20250601-101500.jpeg"
        );
    }
}
