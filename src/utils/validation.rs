//! Input checking, split into two policies.
//!
//! *Reject*: primary physical inputs to the attenuation formula must be in
//! range, otherwise an [`ImpactError::InvalidArgument`] is returned.
//!
//! *Clamp*: anything derived from intensity is sanitised into a displayable
//! value and never fails.

use crate::utils::error::{ImpactError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// ---- reject policy ----

pub fn require_in_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ImpactError::invalid_argument(field_name, value, min, max));
    }
    Ok(())
}

pub fn require_non_negative(field_name: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(ImpactError::InvalidArgument {
            field: field_name.to_string(),
            value: value.to_string(),
            range: "[0, inf)".to_string(),
        });
    }
    Ok(())
}

// ---- clamp policy ----

/// Negative or NaN intensity collapses to zero.
pub fn sanitize_intensity(intensity: f64) -> f64 {
    if intensity.is_nan() || intensity < 0.0 {
        0.0
    } else {
        intensity
    }
}

pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Returns `None` for inputs that should short-circuit a derived estimate.
pub fn usable_percent(percent: f64) -> Option<f64> {
    if percent.is_nan() || percent < 0.0 {
        None
    } else {
        Some(percent.min(100.0))
    }
}

// ---- configuration checks ----

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ImpactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(ImpactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < 0.0 {
        return Err(ImpactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_ordered_range(field_name: &str, range: [f64; 2]) -> Result<()> {
    validate_finite(field_name, range[0])?;
    validate_finite(field_name, range[1])?;
    if range[0] > range[1] {
        return Err(ImpactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("[{}, {}]", range[0], range[1]),
            reason: "Lower bound must not exceed upper bound".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ImpactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
