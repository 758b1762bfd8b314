//! Empirical ground-motion attenuation.
//!
//! `I = a + b*M - c*log10(R) - d*R`, with `R` the hypocentral distance
//! `hypot(horizontal, depth)` floored at `min_distance_km` and the result
//! floored at zero. This is a simplified
//! stand-in, not a calibrated GMPE.

use crate::config::{AttenuationConfig, FeltRadiusConfig};
use crate::domain::model::IntensityResult;
use crate::utils::error::Result;
use crate::utils::validation::{require_in_range, require_non_negative};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttenuationModel {
    config: AttenuationConfig,
    felt_radius: FeltRadiusConfig,
}

impl AttenuationModel {
    pub fn new(config: AttenuationConfig, felt_radius: FeltRadiusConfig) -> Self {
        Self {
            config,
            felt_radius,
        }
    }

    pub fn config(&self) -> &AttenuationConfig {
        &self.config
    }

    pub fn felt_radius_config(&self) -> &FeltRadiusConfig {
        &self.felt_radius
    }

    /// Intensity at a site `distance_km` from the epicentre along the surface.
    /// The source depth is folded into the hypocentral distance.
    ///
    /// Rejects magnitude or depth outside the configured ranges and negative
    /// distance.
    pub fn calculate_intensity(&self, magnitude: f64, depth_km: f64, distance_km: f64) -> Result<f64> {
        self.check_source(magnitude, depth_km)?;
        require_non_negative("distance_km", distance_km)?;
        Ok(self.evaluate(magnitude, depth_km, distance_km))
    }

    pub fn intensity(&self, magnitude: f64, depth_km: f64, distance_km: f64) -> Result<IntensityResult> {
        self.calculate_intensity(magnitude, depth_km, distance_km)
            .map(|value| IntensityResult { value })
    }

    /// Intensity directly above the hypocenter, the maximum an event produces.
    pub fn epicentral_intensity(&self, magnitude: f64, depth_km: f64) -> Result<f64> {
        self.calculate_intensity(magnitude, depth_km, 0.0)
    }

    /// Horizontal distance at which intensity decays to `target_intensity`.
    ///
    /// Bisection over `[0, max_distance_km]`; returns 0 when even the
    /// epicentre stays below the target and the search limit when the target
    /// is still exceeded there.
    pub fn felt_radius(&self, magnitude: f64, depth_km: f64, target_intensity: f64) -> Result<f64> {
        self.check_source(magnitude, depth_km)?;
        let at = |horizontal_km: f64| self.evaluate(magnitude, depth_km, horizontal_km);

        let limits = &self.felt_radius;
        if at(0.0) < target_intensity {
            return Ok(0.0);
        }
        if at(limits.max_distance_km) >= target_intensity {
            return Ok(limits.max_distance_km);
        }

        let mut low = 0.0;
        let mut high = limits.max_distance_km;
        let mut iterations = 0;
        while iterations < limits.max_iterations && high - low > limits.tolerance_km {
            let mid = (low + high) / 2.0;
            if at(mid) >= target_intensity {
                low = mid;
            } else {
                high = mid;
            }
            iterations += 1;
        }

        let radius = (low + high) / 2.0;
        tracing::debug!(
            magnitude,
            depth_km,
            target_intensity,
            iterations,
            radius_km = radius,
            "felt radius converged"
        );
        Ok(radius)
    }

    fn check_source(&self, magnitude: f64, depth_km: f64) -> Result<()> {
        let [min_m, max_m] = self.config.magnitude_range;
        let [min_d, max_d] = self.config.depth_range_km;
        require_in_range("magnitude", magnitude, min_m, max_m)?;
        require_in_range("depth_km", depth_km, min_d, max_d)
    }

    fn evaluate(&self, magnitude: f64, depth_km: f64, horizontal_km: f64) -> f64 {
        let c = &self.config;
        let r = horizontal_km.hypot(depth_km).max(c.min_distance_km);
        let intensity = c.a + c.b * magnitude - c.c * r.log10() - c.d * r;
        intensity.max(0.0)
    }
}
