use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vastra_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentCategory {
    Shirt,
    Dress,
    Pants,
    Jacket,
    Skirt,
    Sweater,
    Saree,
    Lehenga,
}

impl GarmentCategory {
    pub const ALL: [GarmentCategory; 8] = [
        Self::Shirt,
        Self::Dress,
        Self::Pants,
        Self::Jacket,
        Self::Skirt,
        Self::Sweater,
        Self::Saree,
        Self::Lehenga,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shirt => "shirt",
            Self::Dress => "dress",
            Self::Pants => "pants",
            Self::Jacket => "jacket",
            Self::Skirt => "skirt",
            Self::Sweater => "sweater",
            Self::Saree => "saree",
            Self::Lehenga => "lehenga",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| Error::Validation(format!("Unknown garment category: {}", name)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FabricType {
    Cotton,
    Silk,
    Wool,
    Polyester,
    Linen,
    Velvet,
    Chiffon,
    Denim,
}

impl FabricType {
    pub const ALL: [FabricType; 8] = [
        Self::Cotton,
        Self::Silk,
        Self::Wool,
        Self::Polyester,
        Self::Linen,
        Self::Velvet,
        Self::Chiffon,
        Self::Denim,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cotton => "cotton",
            Self::Silk => "silk",
            Self::Wool => "wool",
            Self::Polyester => "polyester",
            Self::Linen => "linen",
            Self::Velvet => "velvet",
            Self::Chiffon => "chiffon",
            Self::Denim => "denim",
        }
    }

    /// How freely the fabric falls, 0 (rigid) to 1.
    pub fn base_drape(&self) -> f64 {
        match self {
            Self::Chiffon => 0.9,
            Self::Silk => 0.8,
            Self::Cotton => 0.5,
            Self::Linen => 0.45,
            Self::Polyester => 0.55,
            Self::Wool => 0.4,
            Self::Velvet => 0.65,
            Self::Denim => 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrapeAttribute {
    Stiff,
    Moderate,
    Flowing,
    Stretchy,
}

/// Body measurements in centimetres and kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub height: f64,
    pub weight: f64,
    pub shoulder_width: f64,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
    pub arm_length: f64,
    pub inseam: f64,
}

impl BodyMeasurements {
    /// Every measurement must be a positive, finite number.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("height", self.height),
            ("weight", self.weight),
            ("shoulder_width", self.shoulder_width),
            ("chest", self.chest),
            ("waist", self.waist),
            ("hip", self.hip),
            ("arm_length", self.arm_length),
            ("inseam", self.inseam),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Validation(format!("{} must be a positive number", name)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricProperties {
    pub fabric_type: FabricType,
    pub texture: String,
    #[serde(default)]
    pub material_percentage: BTreeMap<String, f64>,
    pub drape: DrapeAttribute,
    /// Grams per square metre.
    pub weight: f64,
    pub elasticity: f64,
    pub shine: f64,
}

impl FabricProperties {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("elasticity", self.elasticity), ("shine", self.shine)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Validation(format!("{} must be between 0 and 1", name)));
            }
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(Error::Validation("weight must not be negative".into()));
        }
        Ok(())
    }
}

fn default_lighting() -> String {
    "natural".into()
}

fn default_environment() -> String {
    "plain".into()
}

fn default_pose() -> String {
    "frontal".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TryOnPreferences {
    pub garment_category: GarmentCategory,
    pub color: String,
    #[serde(default = "default_lighting")]
    pub lighting: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_pose")]
    pub pose: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserAvatar {
    pub avatar_type: String,
    pub measurements: BodyMeasurements,
    pub skin_tone: String,
    pub body_shape: String,
}

fn default_model_format() -> String {
    "png".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GarmentModel {
    pub model_type: String,
    #[serde(default = "default_model_format")]
    pub model_format: String,
}

/// Body of `POST /api/ar-tryon/generate-tryon`.
#[derive(Debug, Clone, Deserialize)]
pub struct TryOnRequest {
    pub user_avatar: UserAvatar,
    pub garment_model: GarmentModel,
    #[serde(default)]
    pub fabric_properties: Option<FabricProperties>,
    pub preferences: TryOnPreferences,
}

impl TryOnRequest {
    pub fn validate(&self) -> Result<()> {
        self.user_avatar.measurements.validate()?;
        if let Some(fabric) = &self.fabric_properties {
            fabric.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn measurements() -> BodyMeasurements {
        BodyMeasurements {
            height: 170.0,
            weight: 65.0,
            shoulder_width: 40.0,
            chest: 90.0,
            waist: 70.0,
            hip: 95.0,
            arm_length: 60.0,
            inseam: 78.0,
        }
    }

    pub fn fabric(fabric_type: FabricType, weight: f64, elasticity: f64) -> FabricProperties {
        FabricProperties {
            fabric_type,
            texture: "smooth".into(),
            material_percentage: BTreeMap::new(),
            drape: DrapeAttribute::Flowing,
            weight,
            elasticity,
            shine: 0.3,
        }
    }
}
