//! VastraVaani Trends — what people are posting about a fashion theme.
//!
//! The pipeline scrapes Instagram hashtags and Pinterest keywords through
//! Apify, counts hashtags, keywords and style families, pools the palettes
//! of the post images, asks the LLM for a forecast and renders five charts.

pub mod analysis;
pub mod charts;
pub mod colors;
pub mod forecast;
pub mod pipeline;
pub mod types;

pub use analysis::{hashtag_keyword_analysis, popular_styles};
pub use charts::{build_charts, Chart, ChartKind};
pub use colors::{aggregate_colors, tally_colors};
pub use forecast::{forecast, forecast_fallback, forecast_prompt};
pub use pipeline::analyze_trends;
pub use types::*;
