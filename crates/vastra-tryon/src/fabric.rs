//! Drape curve and cloth physics parameters.

use std::f64::consts::PI;

use serde::Serialize;

use crate::body::round_to;
use crate::types::{DrapeAttribute, FabricProperties, FabricType};

/// Eleven samples of a half sine whose amplitude is the fabric's drape
/// scaled by elasticity and damped by weight.
pub fn drape_curve(fabric: &FabricProperties) -> Vec<f64> {
    let elasticity_factor = 0.5 + fabric.elasticity * 0.5;
    let weight_factor = (1.0 - fabric.weight / 300.0).clamp(0.3, 1.0);
    let amplitude = fabric.fabric_type.base_drape() * elasticity_factor * weight_factor;

    (0..=10)
        .map(|x| round_to(amplitude * (x as f64 * PI / 10.0).sin(), 3))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FabricPhysics {
    pub gravity_influence: f64,
    pub wind_resistance: f64,
    pub bounce: f64,
    pub damping: f64,
    pub cloth_stiffness: f64,
    pub mass: f64,
    pub drape_curve: Vec<f64>,
    pub fold_simulation: bool,
    pub stretch_response: f64,
}

pub fn fabric_physics(fabric: &FabricProperties) -> FabricPhysics {
    FabricPhysics {
        gravity_influence: 0.3 + fabric.weight / 300.0,
        wind_resistance: 1.0 - fabric.elasticity,
        bounce: fabric.elasticity * 0.5,
        damping: 0.95,
        cloth_stiffness: 1.0 - fabric.elasticity * 0.8,
        mass: fabric.weight / 100.0,
        drape_curve: drape_curve(fabric),
        fold_simulation: fabric.drape == DrapeAttribute::Flowing,
        stretch_response: fabric.elasticity,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualizationParams {
    pub wave_amplitude: f64,
    pub wave_frequency: f64,
    pub bounce_strength: f64,
}

/// Response of `simulate-fabric`.
#[derive(Debug, Clone, Serialize)]
pub struct FabricSimulation {
    pub success: bool,
    pub fabric_type: FabricType,
    pub garment_length: f64,
    pub physics_parameters: FabricPhysics,
    pub drape_simulation: Vec<f64>,
    pub visualization_parameters: VisualizationParams,
}

pub fn simulate_fabric(fabric: &FabricProperties, garment_length: f64) -> FabricSimulation {
    let drape = drape_curve(fabric);
    FabricSimulation {
        success: true,
        fabric_type: fabric.fabric_type,
        garment_length,
        physics_parameters: fabric_physics(fabric),
        visualization_parameters: VisualizationParams {
            wave_amplitude: drape.last().copied().unwrap_or(0.0),
            wave_frequency: 0.5 + fabric.elasticity * 0.5,
            bounce_strength: fabric.elasticity,
        },
        drape_simulation: drape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::fabric;

    #[test]
    fn test_drape_curve_shape() {
        // silk 0.8 * (0.5 + 0.5) * (1 - 60/300) = 0.64
        let curve = drape_curve(&fabric(FabricType::Silk, 60.0, 1.0));
        assert_eq!(curve.len(), 11);
        assert_eq!(curve[0], 0.0);
        assert_eq!(curve[5], 0.64);
        assert_eq!(curve[10], 0.0);
        assert_eq!(curve[2], curve[8]);
    }

    #[test]
    fn test_weight_factor_is_clamped() {
        // heavy denim: weight factor floors at 0.3; 0.2 * 0.5 * 0.3 = 0.03
        let curve = drape_curve(&fabric(FabricType::Denim, 600.0, 0.0));
        assert_eq!(curve[5], 0.03);
    }

    #[test]
    fn test_physics() {
        let physics = fabric_physics(&fabric(FabricType::Cotton, 150.0, 0.5));
        assert!((physics.gravity_influence - 0.8).abs() < 1e-12);
        assert_eq!(physics.wind_resistance, 0.5);
        assert_eq!(physics.bounce, 0.25);
        assert!((physics.cloth_stiffness - 0.6).abs() < 1e-12);
        assert_eq!(physics.mass, 1.5);
        assert!(physics.fold_simulation);
        assert_eq!(physics.damping, 0.95);
    }

    #[test]
    fn test_simulation_response() {
        let sim = simulate_fabric(&fabric(FabricType::Chiffon, 30.0, 0.2), 80.0);
        assert_eq!(sim.visualization_parameters.wave_amplitude, 0.0);
        assert!((sim.visualization_parameters.wave_frequency - 0.6).abs() < 1e-12);
        let json = serde_json::to_value(&sim).unwrap();
        assert_eq!(json["fabric_type"], "chiffon");
        assert_eq!(json["drape_simulation"].as_array().unwrap().len(), 11);
    }
}
