//! VastraVaani Fabric — fabric recommendations for a garment design.
//!
//! Pipeline: optional photo analysis ([`analysis`]), live listings from six
//! shopping sources ([`search`]) with a built-in table as fallback
//! ([`fallback`]), LLM rationale per listing and an overall summary
//! ([`matcher`]), and an exportable PDF report ([`pdf`]).

pub mod analysis;
pub mod fallback;
pub mod matcher;
pub mod pdf;
pub mod recommender;
pub mod search;
pub mod types;

pub use analysis::{analyze_garment, predict_fabric_types};
pub use fallback::fallback_fabrics;
pub use pdf::{render_report, report_filename};
pub use recommender::{image_report, recommend};
pub use search::{build_keywords, gather_fabrics, SEARCH_ENGINES_USED};
pub use types::*;
