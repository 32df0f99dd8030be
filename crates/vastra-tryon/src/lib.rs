//! VastraVaani Try-On — closed-form body, fabric and fit calculations behind
//! the AR try-on screens, plus the scene configs the frontend renders.
//!
//! Nothing here does I/O. Every function maps validated measurements or
//! fabric properties to numbers and JSON.

pub mod body;
pub mod fabric;
pub mod fit;
pub mod scene;
pub mod tryon;
pub mod types;

pub use body::{analyze_body, avatar, bmi, body_shape, health_category, Avatar, BodyAnalysis, BodyShape};
pub use fabric::{drape_curve, fabric_physics, simulate_fabric, FabricPhysics, FabricSimulation};
pub use fit::{adjustments, fit_metrics, fit_recommendation, fit_score, size_recommendation, FitMetrics, FitReport, Size};
pub use scene::{ar_config, encode_json, glb_export, three_js_config};
pub use tryon::{generate_tryon, TryOnResponse};
pub use types::*;
