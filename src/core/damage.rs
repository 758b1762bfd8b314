//! Damage estimation and the impact figures derived from it.
//!
//! Everything here follows the clamp policy: bad inputs produce zero or a
//! clamped value, never an error.

use crate::config::{DamageConfig, ImpactConfig};
use crate::domain::model::{
    CasualtyEstimate, ConstructionDamage, ConstructionType, DamageCategory, DamageCurvePoint,
    DamageEstimate, EconomicLoss, PopulationImpact,
};
use crate::utils::validation::{clamp_percent, usable_percent};

pub static DAMAGE_CATEGORIES: [DamageCategory; 6] = [
    DamageCategory {
        label: "None",
        min_percent: 0.0,
        max_percent: 5.0,
        description: "No structural damage expected",
        color: "#4CAF50",
        severity: 0,
    },
    DamageCategory {
        label: "Very Light",
        min_percent: 5.0,
        max_percent: 15.0,
        description: "Hairline cracks and fallen objects",
        color: "#8BC34A",
        severity: 1,
    },
    DamageCategory {
        label: "Light",
        min_percent: 15.0,
        max_percent: 30.0,
        description: "Cracked plaster, damaged chimneys and broken windows",
        color: "#FFEB3B",
        severity: 2,
    },
    DamageCategory {
        label: "Moderate",
        min_percent: 30.0,
        max_percent: 50.0,
        description: "Structural cracking in ordinary buildings, some walls fail",
        color: "#FF9800",
        severity: 3,
    },
    DamageCategory {
        label: "Heavy",
        min_percent: 50.0,
        max_percent: 70.0,
        description: "Partial collapse of vulnerable buildings",
        color: "#F44336",
        severity: 4,
    },
    DamageCategory {
        label: "Very Heavy",
        min_percent: 70.0,
        max_percent: 100.0,
        description: "Widespread collapse and destruction",
        color: "#8B0000",
        severity: 5,
    },
];

/// Bands are `[min, max)` except the top one, which includes 100.
pub fn damage_category(percent: f64) -> &'static DamageCategory {
    let percent = clamp_percent(percent);
    DAMAGE_CATEGORIES
        .iter()
        .find(|category| percent < category.max_percent)
        .unwrap_or(&DAMAGE_CATEGORIES[DAMAGE_CATEGORIES.len() - 1])
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageModel {
    damage: DamageConfig,
    impact: ImpactConfig,
}

impl DamageModel {
    pub fn new(damage: DamageConfig, impact: ImpactConfig) -> Self {
        Self { damage, impact }
    }

    pub fn damage_config(&self) -> &DamageConfig {
        &self.damage
    }

    pub fn impact_config(&self) -> &ImpactConfig {
        &self.impact
    }

    /// Logistic damage curve, `100 / (1 + e^(-k(I - threshold)))`.
    pub fn damage_percent(&self, intensity: f64) -> f64 {
        if intensity.is_nan() || intensity < 0.0 {
            return 0.0;
        }
        let k = self.damage.steepness;
        let exponent = -k * (intensity - self.damage.threshold_intensity);
        clamp_percent(100.0 / (1.0 + exponent.exp()))
    }

    pub fn damage_estimate(&self, intensity: f64) -> DamageEstimate {
        DamageEstimate {
            percent: self.damage_percent(intensity),
        }
    }

    pub fn damage_category(&self, percent: f64) -> &'static DamageCategory {
        damage_category(percent)
    }

    pub fn multiplier(&self, kind: ConstructionType) -> f64 {
        match kind {
            ConstructionType::Modern => self.damage.modern_multiplier,
            ConstructionType::Standard => self.damage.standard_multiplier,
            ConstructionType::UnreinforcedMasonry => self.damage.unreinforced_masonry_multiplier,
            ConstructionType::Informal => self.damage.informal_multiplier,
        }
    }

    pub fn by_construction_type(&self, intensity: f64) -> ConstructionDamage {
        let base = self.damage_percent(intensity);
        let scaled = |kind: ConstructionType| clamp_percent(base * self.multiplier(kind));
        ConstructionDamage {
            modern: scaled(ConstructionType::Modern),
            standard: scaled(ConstructionType::Standard),
            unreinforced_masonry: scaled(ConstructionType::UnreinforcedMasonry),
            informal: scaled(ConstructionType::Informal),
        }
    }

    /// People affected and displaced. Displacement only accrues above the
    /// displacement threshold, so `displaced <= affected <= total`.
    pub fn population_impact(&self, total_population: u64, damage_percent: f64) -> PopulationImpact {
        let Some(damage) = usable_percent(damage_percent) else {
            return PopulationImpact::default();
        };
        let total = total_population as f64;

        let affected_percent = (damage * self.impact.affected_multiplier).min(100.0);
        let affected = (total * affected_percent / 100.0).round();

        let threshold = self.impact.displacement_threshold_percent;
        let displacement_factor = ((damage - threshold) / (100.0 - threshold)).clamp(0.0, 1.0);
        let displaced = (affected * displacement_factor).round();

        PopulationImpact {
            total: total_population,
            affected: affected as u64,
            displaced: displaced as u64,
            percent_affected: round_to_tenth(affected_percent),
        }
    }

    pub fn economic_loss(&self, damage_percent: f64, total_population: u64) -> EconomicLoss {
        self.economic_loss_with_gdp(
            damage_percent,
            total_population,
            self.impact.default_gdp_per_capita,
        )
    }

    /// Building stock is valued at `population * gdp_per_capita * 3`; losses
    /// grow with `(damage / 100)^1.3`.
    pub fn economic_loss_with_gdp(
        &self,
        damage_percent: f64,
        total_population: u64,
        gdp_per_capita: f64,
    ) -> EconomicLoss {
        let Some(damage) = usable_percent(damage_percent) else {
            return EconomicLoss::default();
        };
        if gdp_per_capita.is_nan() || gdp_per_capita <= 0.0 || total_population == 0 {
            return EconomicLoss::default();
        }

        let gdp = total_population as f64 * gdp_per_capita;
        let building_value = gdp * self.impact.building_value_multiplier;
        let loss_factor = (damage / 100.0).powf(1.3);

        let direct_loss = building_value * loss_factor;
        let indirect_loss = direct_loss * self.impact.indirect_loss_ratio;
        let total_loss = direct_loss + indirect_loss;

        EconomicLoss {
            direct_loss,
            indirect_loss,
            total_loss,
            percent_of_gdp: round_to_tenth(total_loss / gdp * 100.0),
        }
    }

    /// Fatalities ramp quadratically from zero at the casualty threshold to
    /// `max_fatality_rate` at 100% damage.
    pub fn casualty_risk(&self, total_population: u64, damage_percent: f64) -> CasualtyEstimate {
        let Some(damage) = usable_percent(damage_percent) else {
            return CasualtyEstimate::default();
        };
        let threshold = self.impact.casualty_threshold_percent;
        if damage < threshold {
            return CasualtyEstimate::default();
        }

        let ramp = (damage - threshold) / (100.0 - threshold);
        let fatality_rate = ramp.powi(2) * self.impact.max_fatality_rate;
        let medium = (total_population as f64 * fatality_rate).round();

        CasualtyEstimate {
            low: (medium * 0.5).round() as u64,
            medium: medium as u64,
            high: (medium * 2.0) as u64,
        }
    }

    /// `steps + 1` evenly spaced samples from `min_intensity` to
    /// `max_intensity`, both ends included.
    pub fn damage_curve(&self, min_intensity: f64, max_intensity: f64, steps: usize) -> Vec<DamageCurvePoint> {
        if steps == 0 {
            return vec![DamageCurvePoint {
                intensity: min_intensity,
                damage_percent: self.damage_percent(min_intensity),
            }];
        }
        let step = (max_intensity - min_intensity) / steps as f64;
        (0..=steps)
            .map(|i| {
                let intensity = if i == steps {
                    max_intensity
                } else {
                    min_intensity + step * i as f64
                };
                DamageCurvePoint {
                    intensity,
                    damage_percent: self.damage_percent(intensity),
                }
            })
            .collect()
    }
}
