//! VastraVaani Design — turn an outfit brief into a design plan and an image.
//!
//! [`plan_design`] gathers inspiration photos through SerpAPI image search,
//! stitches them into a collage, writes a design summary and an SDXL prompt
//! with the LLM and suggests fabrics for the occasion. [`SdxlClient`] renders
//! the (possibly user-edited) prompt through Hugging Face inference.

pub mod fabrics;
pub mod generator;
pub mod inspiration;
pub mod output;
pub mod prompts;
pub mod sdxl;
pub mod types;

pub use fabrics::{fabric_care, fabric_properties, occasion_fabrics};
pub use generator::plan_design;
pub use inspiration::{inspiration_collage, search_inspiration};
pub use output::{download_filename, pollinations_url, transcode, DownloadFormat};
pub use prompts::{image_prompt, summarize_design};
pub use sdxl::{SdxlClient, SDXL_MODEL_URL};
pub use types::*;
