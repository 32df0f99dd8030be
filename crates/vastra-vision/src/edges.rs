//! Grayscale conversion and Canny-style edge detection.

use image::{DynamicImage, GrayImage, Luma};

/// Luma with BT.601 weights (0.299, 0.587, 0.114).
pub fn grayscale(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    let mut gray = GrayImage::new(rgb.width(), rgb.height());
    for (x, y, p) in rgb.enumerate_pixels() {
        let l = 0.299 * p[0] as f32 + 0.587 * p[1] as f32 + 0.114 * p[2] as f32;
        gray.put_pixel(x, y, Luma([l.round().clamp(0.0, 255.0) as u8]));
    }
    gray
}

/// Population standard deviation of the gray levels.
pub fn gray_std(gray: &GrayImage) -> f64 {
    let n = (gray.width() as f64) * (gray.height() as f64);
    if n == 0.0 {
        return 0.0;
    }
    let mean = gray.pixels().map(|p| p[0] as f64).sum::<f64>() / n;
    let var = gray
        .pixels()
        .map(|p| {
            let d = p[0] as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    var.sqrt()
}

/// Edge map: 3x3 Sobel, L1 gradient magnitude, non-maximum suppression,
/// then hysteresis between `low` and `high`.
pub fn canny(gray: &GrayImage, low: f32, high: f32) -> Vec<bool> {
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    let mut edges = vec![false; w * h];
    if w < 3 || h < 3 {
        return edges;
    }

    let px = |x: usize, y: usize| gray.get_pixel(x as u32, y as u32)[0] as i32;

    // Gradients (interior pixels only)
    let mut mag = vec![0f32; w * h];
    let mut dir = vec![0u8; w * h];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let gx = (px(x + 1, y - 1) + 2 * px(x + 1, y) + px(x + 1, y + 1))
                - (px(x - 1, y - 1) + 2 * px(x - 1, y) + px(x - 1, y + 1));
            let gy = (px(x - 1, y + 1) + 2 * px(x, y + 1) + px(x + 1, y + 1))
                - (px(x - 1, y - 1) + 2 * px(x, y - 1) + px(x + 1, y - 1));
            let i = y * w + x;
            mag[i] = (gx.abs() + gy.abs()) as f32;
            dir[i] = quantize_direction(gx as f32, gy as f32);
        }
    }

    // Non-maximum suppression: keep a pixel only if it beats the neighbor
    // behind it along the gradient and at least ties the one ahead
    let mut thin = vec![0f32; w * h];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            let m = mag[i];
            if m <= low {
                continue;
            }
            let (a, b) = match dir[i] {
                0 => (mag[i - 1], mag[i + 1]),
                1 => (mag[i - w + 1], mag[i + w - 1]),
                2 => (mag[i - w], mag[i + w]),
                _ => (mag[i - w - 1], mag[i + w + 1]),
            };
            if m > a && m >= b {
                thin[i] = m;
            }
        }
    }

    // Hysteresis: grow from strong pixels through 8-connected weak ones
    let mut stack: Vec<usize> = Vec::new();
    for (i, &m) in thin.iter().enumerate() {
        if m > high {
            edges[i] = true;
            stack.push(i);
        }
    }
    while let Some(i) = stack.pop() {
        let (x, y) = ((i % w) as isize, (i / w) as isize);
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let j = ny as usize * w + nx as usize;
                if !edges[j] && thin[j] > low {
                    edges[j] = true;
                    stack.push(j);
                }
            }
        }
    }

    edges
}

/// 0 = horizontal gradient, 1 = 45°, 2 = vertical, 3 = 135°.
fn quantize_direction(gx: f32, gy: f32) -> u8 {
    let mut angle = gy.atan2(gx).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    if !(22.5..157.5).contains(&angle) {
        0
    } else if angle < 67.5 {
        1
    } else if angle < 112.5 {
        2
    } else {
        3
    }
}

/// Fraction of pixels marked as edges, in `[0, 1]`.
pub fn edge_density(gray: &GrayImage, low: f32, high: f32) -> f64 {
    let edges = canny(gray, low, high);
    if edges.is_empty() {
        return 0.0;
    }
    edges.iter().filter(|e| **e).count() as f64 / edges.len() as f64
}
