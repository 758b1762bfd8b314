pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::CalibrationConfig;
pub use crate::core::{
    attenuation::AttenuationModel,
    comparator::{ScenarioComparator, ScenarioInput, ScenarioResult},
    damage::DamageModel,
    mmi::MmiClassifier,
    pipeline::{ImpactPipeline, ImpactReport, SiteImpact},
};
pub use crate::domain::model::{EarthquakeSource, GeoPoint, HistoricalEvent, Site};
pub use crate::utils::error::{ImpactError, Result};
