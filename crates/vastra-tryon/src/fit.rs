//! Size recommendation and fit scoring against a standard size chart.

use serde::Serialize;

use crate::body::{bmi, body_shape, round_to, BodyShape};
use crate::types::{BodyMeasurements, GarmentCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    /// Chart chest, waist and hip in centimetres.
    pub fn chart(&self) -> (f64, f64, f64) {
        match self {
            Self::XS => (76.0, 61.0, 84.0),
            Self::S => (82.0, 66.0, 89.0),
            Self::M => (89.0, 71.0, 97.0),
            Self::L => (97.0, 79.0, 104.0),
            Self::XL => (104.0, 86.0, 112.0),
            Self::XXL => (112.0, 94.0, 119.0),
        }
    }
}

/// Pick a size from a chest-weighted average girth.
pub fn size_recommendation(m: &BodyMeasurements) -> Size {
    let girth = m.chest * 0.4 + m.waist * 0.3 + m.hip * 0.3;
    match girth {
        g if g < 79.0 => Size::XS,
        g if g < 85.0 => Size::S,
        g if g < 93.0 => Size::M,
        g if g < 101.0 => Size::L,
        g if g < 109.0 => Size::XL,
        _ => Size::XXL,
    }
}

/// 100 minus twice the mean distance from the chart, floored at 0, one decimal.
pub fn fit_score(m: &BodyMeasurements, size: Size) -> f64 {
    let (chest, waist, hip) = size.chart();
    let avg_diff = ((m.chest - chest).abs() + (m.waist - waist).abs() + (m.hip - hip).abs()) / 3.0;
    round_to((100.0 - avg_diff * 2.0).max(0.0), 1)
}

pub fn adjustments(m: &BodyMeasurements, garment: GarmentCategory) -> Vec<String> {
    let mut notes = Vec::new();
    match garment {
        GarmentCategory::Shirt => {
            if m.shoulder_width > m.chest * 0.5 {
                notes.push("Shoulders may be tight - consider larger size");
            }
            if m.arm_length > 65.0 {
                notes.push("Sleeves may be short - consider length extension");
            }
        }
        GarmentCategory::Pants => {
            if m.inseam < 75.0 {
                notes.push("May need cropping for hem length");
            }
            if m.waist > m.hip * 0.85 {
                notes.push("High waist design recommended");
            }
        }
        GarmentCategory::Dress => {
            if m.height < 160.0 {
                notes.push("Dress may be oversized - petite fit recommended");
            }
            if m.waist < m.hip * 0.65 {
                notes.push("Belted waist design would enhance fit");
            }
        }
        _ => {}
    }
    if notes.is_empty() {
        notes.push("Standard fit - no major adjustments needed");
    }
    notes.into_iter().map(String::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proportions {
    pub shoulder_to_waist: f64,
    pub waist_to_hip: f64,
    pub arm_to_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitMetrics {
    pub bmi: f64,
    pub body_shape: BodyShape,
    pub proportions: Proportions,
    pub size_recommendation: Size,
    pub ideal_garment_length: f64,
    pub ideal_sleeve_length: f64,
}

pub fn fit_metrics(m: &BodyMeasurements, size: Size) -> FitMetrics {
    FitMetrics {
        bmi: round_to(bmi(m.height, m.weight), 2),
        body_shape: body_shape(m),
        proportions: Proportions {
            shoulder_to_waist: round_to(m.shoulder_width / m.waist, 2),
            waist_to_hip: round_to(m.waist / m.hip, 2),
            arm_to_height: round_to(m.arm_length / m.height, 2),
        },
        size_recommendation: size,
        ideal_garment_length: round_to(m.height * 0.55, 1),
        ideal_sleeve_length: round_to(m.arm_length * 1.05, 1),
    }
}

/// Response of `fit-recommendation`.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub success: bool,
    pub size_recommendation: Size,
    pub fit_score: f64,
    pub adjustments: Vec<String>,
    pub metrics: FitMetrics,
}

pub fn fit_recommendation(m: &BodyMeasurements, garment: GarmentCategory) -> FitReport {
    let size = size_recommendation(m);
    FitReport {
        success: true,
        size_recommendation: size,
        fit_score: fit_score(m, size),
        adjustments: adjustments(m, garment),
        metrics: fit_metrics(m, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::measurements;

    #[test]
    fn test_size_thresholds() {
        // 0.4*90 + 0.3*70 + 0.3*95 = 85.5
        assert_eq!(size_recommendation(&measurements()), Size::M);

        let small = BodyMeasurements {
            chest: 76.0,
            waist: 60.0,
            hip: 84.0,
            ..measurements()
        };
        assert_eq!(size_recommendation(&small), Size::XS);

        let large = BodyMeasurements {
            chest: 120.0,
            waist: 100.0,
            hip: 120.0,
            ..measurements()
        };
        assert_eq!(size_recommendation(&large), Size::XXL);
    }

    #[test]
    fn test_fit_score() {
        // diffs against M: 1, 1, 2 -> avg 4/3 -> 100 - 2.67
        assert_eq!(fit_score(&measurements(), Size::M), 97.3);
        let far = BodyMeasurements {
            chest: 200.0,
            waist: 200.0,
            hip: 200.0,
            ..measurements()
        };
        assert_eq!(fit_score(&far, Size::XS), 0.0);
    }

    #[test]
    fn test_adjustments_per_garment() {
        let m = BodyMeasurements {
            shoulder_width: 48.0,
            arm_length: 66.0,
            ..measurements()
        };
        assert_eq!(
            adjustments(&m, GarmentCategory::Shirt),
            vec![
                "Shoulders may be tight - consider larger size",
                "Sleeves may be short - consider length extension"
            ]
        );
        assert_eq!(
            adjustments(&measurements(), GarmentCategory::Pants),
            vec!["Standard fit - no major adjustments needed"]
        );
        let petite = BodyMeasurements {
            height: 155.0,
            waist: 60.0,
            ..measurements()
        };
        assert_eq!(adjustments(&petite, GarmentCategory::Dress).len(), 2);
        assert_eq!(
            adjustments(&m, GarmentCategory::Saree),
            vec!["Standard fit - no major adjustments needed"]
        );
    }

    #[test]
    fn test_metrics() {
        let metrics = fit_metrics(&measurements(), Size::M);
        assert_eq!(metrics.proportions.shoulder_to_waist, 0.57);
        assert_eq!(metrics.proportions.waist_to_hip, 0.74);
        assert_eq!(metrics.proportions.arm_to_height, 0.35);
        assert_eq!(metrics.ideal_garment_length, 93.5);
        assert_eq!(metrics.ideal_sleeve_length, 63.0);
        assert_eq!(serde_json::to_value(&metrics).unwrap()["size_recommendation"], "M");
    }
}
