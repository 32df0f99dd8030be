//! 3x3 inspiration collage.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

pub const COLLAGE_SIZE: u32 = 900;
pub const COLLAGE_TILE: u32 = 300;
pub const COLLAGE_BACKGROUND: [u8; 3] = [30, 41, 59];

const GRID: usize = 3;

/// Lay out up to nine images row by row on a slate canvas.
///
/// Slots follow input positions, so a `None` (an image that failed to load)
/// leaves its tile as background. Each image is center-cropped to a square
/// and resized to one tile.
pub fn build_collage(images: &[Option<DynamicImage>]) -> DynamicImage {
    let mut canvas = RgbImage::from_pixel(COLLAGE_SIZE, COLLAGE_SIZE, Rgb(COLLAGE_BACKGROUND));

    for (slot, img) in images.iter().take(GRID * GRID).enumerate() {
        let Some(img) = img else { continue };
        if img.width() == 0 || img.height() == 0 {
            continue;
        }
        let tile = square_tile(img);
        let x = (slot % GRID) as i64 * COLLAGE_TILE as i64;
        let y = (slot / GRID) as i64 * COLLAGE_TILE as i64;
        imageops::replace(&mut canvas, &tile, x, y);
    }

    DynamicImage::ImageRgb8(canvas)
}

fn square_tile(img: &DynamicImage) -> RgbImage {
    let side = img.width().min(img.height());
    let left = (img.width() - side) / 2;
    let top = (img.height() - side) / 2;
    let square = img.crop_imm(left, top, side, side).to_rgb8();
    imageops::resize(&square, COLLAGE_TILE, COLLAGE_TILE, FilterType::Lanczos3)
}
