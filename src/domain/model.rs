use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::error::Result;
use crate::utils::validation::{require_in_range, Validate};

pub const LATITUDE_RANGE: [f64; 2] = [-90.0, 90.0];
pub const LONGITUDE_RANGE: [f64; 2] = [-180.0, 180.0];
pub const DEPTH_RANGE_KM: [f64; 2] = [0.0, 700.0];
pub const MAGNITUDE_RANGE: [f64; 2] = [0.0, 10.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Advisory check; the distance functions accept any value.
    pub fn is_valid(&self) -> bool {
        is_valid_coordinate(self.latitude, self.longitude)
    }
}

pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (LATITUDE_RANGE[0]..=LATITUDE_RANGE[1]).contains(&latitude)
        && (LONGITUDE_RANGE[0]..=LONGITUDE_RANGE[1]).contains(&longitude)
}

pub fn is_valid_depth(depth_km: f64) -> bool {
    depth_km.is_finite() && (DEPTH_RANGE_KM[0]..=DEPTH_RANGE_KM[1]).contains(&depth_km)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeSource {
    pub magnitude: f64,
    pub depth_km: f64,
    pub epicenter: GeoPoint,
}

impl EarthquakeSource {
    pub fn new(magnitude: f64, depth_km: f64, epicenter: GeoPoint) -> Self {
        Self {
            magnitude,
            depth_km,
            epicenter,
        }
    }
}

impl Validate for EarthquakeSource {
    fn validate(&self) -> Result<()> {
        require_in_range("magnitude", self.magnitude, MAGNITUDE_RANGE[0], MAGNITUDE_RANGE[1])?;
        require_in_range("depth_km", self.depth_km, DEPTH_RANGE_KM[0], DEPTH_RANGE_KM[1])?;
        require_in_range(
            "epicenter.latitude",
            self.epicenter.latitude,
            LATITUDE_RANGE[0],
            LATITUDE_RANGE[1],
        )?;
        require_in_range(
            "epicenter.longitude",
            self.epicenter.longitude,
            LONGITUDE_RANGE[0],
            LONGITUDE_RANGE[1],
        )
    }
}

/// A populated place supplied by an external site list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub location: GeoPoint,
    pub population: u64,
}

impl Site {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, population: u64) -> Self {
        Self {
            name: name.into(),
            location: GeoPoint::new(latitude, longitude),
            population,
        }
    }
}

/// Unitless ground-motion intensity, never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct IntensityResult {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MmiEntry {
    pub roman: &'static str,
    pub level: u8,
    pub min_intensity: f64,
    /// Exclusive upper bound; infinite for the top band.
    pub max_intensity: f64,
    pub name: &'static str,
    pub shaking: &'static str,
    pub damage: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

impl MmiEntry {
    pub fn contains(&self, intensity: f64) -> bool {
        intensity >= self.min_intensity && intensity < self.max_intensity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DamageEstimate {
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageCategory {
    pub label: &'static str,
    pub min_percent: f64,
    pub max_percent: f64,
    pub description: &'static str,
    pub color: &'static str,
    pub severity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionType {
    Modern,
    Standard,
    UnreinforcedMasonry,
    Informal,
}

impl ConstructionType {
    pub const ALL: [ConstructionType; 4] = [
        ConstructionType::Modern,
        ConstructionType::Standard,
        ConstructionType::UnreinforcedMasonry,
        ConstructionType::Informal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructionType::Modern => "modern",
            ConstructionType::Standard => "standard",
            ConstructionType::UnreinforcedMasonry => "unreinforced_masonry",
            ConstructionType::Informal => "informal",
        }
    }
}

/// Damage percent per construction class for one intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstructionDamage {
    pub modern: f64,
    pub standard: f64,
    pub unreinforced_masonry: f64,
    pub informal: f64,
}

impl ConstructionDamage {
    pub fn get(&self, kind: ConstructionType) -> f64 {
        match kind {
            ConstructionType::Modern => self.modern,
            ConstructionType::Standard => self.standard,
            ConstructionType::UnreinforcedMasonry => self.unreinforced_masonry,
            ConstructionType::Informal => self.informal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationImpact {
    pub total: u64,
    pub affected: u64,
    pub displaced: u64,
    pub percent_affected: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicLoss {
    pub direct_loss: f64,
    pub indirect_loss: f64,
    pub total_loss: f64,
    pub percent_of_gdp: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasualtyEstimate {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageCurvePoint {
    pub intensity: f64,
    pub damage_percent: f64,
}

/// Reference record from a historical catalogue; display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub name: String,
    pub magnitude: f64,
    pub date: Option<NaiveDate>,
    pub depth_km: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_predicates() {
        assert!(is_valid_coordinate(0.0, 0.0));
        assert!(is_valid_coordinate(-90.0, 180.0));
        assert!(!is_valid_coordinate(90.1, 0.0));
        assert!(!is_valid_coordinate(0.0, -180.5));
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_depth_predicate() {
        assert!(is_valid_depth(0.0));
        assert!(is_valid_depth(700.0));
        assert!(!is_valid_depth(700.5));
        assert!(!is_valid_depth(-1.0));
        assert!(!is_valid_depth(f64::NAN));
    }

    #[test]
    fn test_source_validation() {
        let epicenter = GeoPoint::new(-36.12, -72.90);
        assert!(EarthquakeSource::new(8.8, 35.0, epicenter).validate().is_ok());
        assert!(EarthquakeSource::new(10.5, 35.0, epicenter).validate().is_err());
        assert!(EarthquakeSource::new(6.0, 800.0, epicenter).validate().is_err());
        assert!(EarthquakeSource::new(6.0, 10.0, GeoPoint::new(95.0, 0.0))
            .validate()
            .is_err());
    }
}
