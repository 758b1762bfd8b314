use std::path::Path;

use regex::Regex;

use crate::config::CalibrationConfig;
use crate::utils::error::{ImpactError, Result};
use crate::utils::validation::{
    validate_finite, validate_non_negative, validate_ordered_range, validate_positive,
    validate_range, Validate,
};

impl CalibrationConfig {
    /// Load calibration overrides from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading calibration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(ImpactError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse calibration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        let config: CalibrationConfig =
            toml::from_str(&processed_content).map_err(|e| ImpactError::ConfigParseError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ImpactError::ConfigParseError {
            message: format!("TOML serialization error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        let att = &self.attenuation;
        validate_finite("attenuation.a", att.a)?;
        validate_non_negative("attenuation.b", att.b)?;
        validate_non_negative("attenuation.c", att.c)?;
        validate_non_negative("attenuation.d", att.d)?;
        validate_positive("attenuation.min_distance_km", att.min_distance_km)?;
        validate_ordered_range("attenuation.magnitude_range", att.magnitude_range)?;
        validate_ordered_range("attenuation.depth_range_km", att.depth_range_km)?;

        let felt = &self.felt_radius;
        validate_positive("felt_radius.max_distance_km", felt.max_distance_km)?;
        validate_positive("felt_radius.tolerance_km", felt.tolerance_km)?;
        validate_range("felt_radius.max_iterations", felt.max_iterations, 1, 1000)?;

        let dmg = &self.damage;
        validate_positive("damage.steepness", dmg.steepness)?;
        validate_finite("damage.threshold_intensity", dmg.threshold_intensity)?;
        validate_non_negative("damage.modern_multiplier", dmg.modern_multiplier)?;
        validate_non_negative("damage.standard_multiplier", dmg.standard_multiplier)?;
        validate_non_negative(
            "damage.unreinforced_masonry_multiplier",
            dmg.unreinforced_masonry_multiplier,
        )?;
        validate_non_negative("damage.informal_multiplier", dmg.informal_multiplier)?;

        let imp = &self.impact;
        validate_non_negative("impact.affected_multiplier", imp.affected_multiplier)?;
        validate_range(
            "impact.displacement_threshold_percent",
            imp.displacement_threshold_percent,
            0.0,
            99.0,
        )?;
        validate_range(
            "impact.casualty_threshold_percent",
            imp.casualty_threshold_percent,
            0.0,
            99.0,
        )?;
        validate_range("impact.max_fatality_rate", imp.max_fatality_rate, 0.0, 1.0)?;
        validate_non_negative("impact.building_value_multiplier", imp.building_value_multiplier)?;
        validate_non_negative("impact.indirect_loss_ratio", imp.indirect_loss_ratio)?;
        validate_non_negative("impact.default_gdp_per_capita", imp.default_gdp_per_capita)?;

        Ok(())
    }
}

impl Validate for CalibrationConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// Replace `${VAR}` references with environment values. Unknown variables are
/// left untouched so the TOML parser reports them.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImpactError::ConfigParseError {
        message: format!("invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}
