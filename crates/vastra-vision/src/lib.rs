//! VastraVaani Vision — closed-form image analysis for garment photos.
//!
//! Everything here is a single pass over one decoded image: k-means color
//! clustering, Canny-style edge density, texture and pattern classification,
//! and the inspiration collage. No models, no I/O beyond encode/decode.

pub mod collage;
pub mod colors;
pub mod edges;
pub mod image_io;
pub mod kmeans;
pub mod texture;

pub use collage::{build_collage, COLLAGE_BACKGROUND, COLLAGE_SIZE, COLLAGE_TILE};
pub use colors::{
    color_family, dominant_colors, dominant_colors_with_rng, nearest_color_name, ColorExtraction,
    ColorSwatch, Rgb,
};
pub use image_io::{decode_base64_image, decode_image, encode_jpeg, encode_png, to_jpeg_data_url, to_png_data_url};
pub use kmeans::{kmeans, Cluster, KMeansInit, KMeansOptions};
pub use texture::{analyze_texture, detect_pattern, PatternAnalysis, PatternKind, TextureAnalysis, TextureType};
