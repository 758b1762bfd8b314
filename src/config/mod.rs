#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use serde::{Deserialize, Serialize};

use crate::domain::model::{DEPTH_RANGE_KM, MAGNITUDE_RANGE};

/// Every tunable constant of the pipeline, grouped per model.
///
/// Defaults reproduce the reference calibration. Instances are built once and
/// handed to the models by value; nothing mutates them afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub attenuation: AttenuationConfig,
    pub felt_radius: FeltRadiusConfig,
    pub damage: DamageConfig,
    pub impact: ImpactConfig,
}

/// `I = a + b*M - c*log10(R) - d*R`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttenuationConfig {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub min_distance_km: f64,
    pub magnitude_range: [f64; 2],
    pub depth_range_km: [f64; 2],
}

impl Default for AttenuationConfig {
    fn default() -> Self {
        Self {
            a: -3.5,
            b: 1.8,
            c: 3.5,
            d: 0.002,
            min_distance_km: 1.0,
            magnitude_range: MAGNITUDE_RANGE,
            depth_range_km: DEPTH_RANGE_KM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeltRadiusConfig {
    pub max_distance_km: f64,
    pub max_iterations: u32,
    pub tolerance_km: f64,
}

impl Default for FeltRadiusConfig {
    fn default() -> Self {
        Self {
            max_distance_km: 5000.0,
            max_iterations: 50,
            tolerance_km: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    /// Logistic slope `k`.
    pub steepness: f64,
    /// Intensity at which damage reaches 50%.
    pub threshold_intensity: f64,
    pub modern_multiplier: f64,
    pub standard_multiplier: f64,
    pub unreinforced_masonry_multiplier: f64,
    pub informal_multiplier: f64,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            steepness: 1.5,
            threshold_intensity: 6.0,
            modern_multiplier: 0.4,
            standard_multiplier: 1.0,
            unreinforced_masonry_multiplier: 1.6,
            informal_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    pub affected_multiplier: f64,
    pub displacement_threshold_percent: f64,
    pub casualty_threshold_percent: f64,
    pub max_fatality_rate: f64,
    pub building_value_multiplier: f64,
    pub indirect_loss_ratio: f64,
    pub default_gdp_per_capita: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            affected_multiplier: 1.2,
            displacement_threshold_percent: 40.0,
            casualty_threshold_percent: 60.0,
            max_fatality_rate: 0.01,
            building_value_multiplier: 3.0,
            indirect_loss_ratio: 0.3,
            default_gdp_per_capita: 15_000.0,
        }
    }
}
