use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::CalibrationConfig;
use crate::domain::model::{EarthquakeSource, GeoPoint, Site};
use crate::utils::error::{ImpactError, Result};
use crate::utils::validation::{validate_positive, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "seismic-impact")]
#[command(about = "Estimate shaking intensity and impact of an earthquake at populated sites")]
pub struct CliConfig {
    /// Moment magnitude (0-10)
    #[arg(short, long)]
    pub magnitude: f64,

    /// Hypocenter depth in km (0-700)
    #[arg(short, long, default_value = "10")]
    pub depth: f64,

    /// Epicenter latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Epicenter longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// CSV file with name,latitude,longitude,population rows
    #[arg(long)]
    pub sites: Option<PathBuf>,

    #[arg(long, default_value = "site")]
    pub site_name: String,

    #[arg(long, allow_hyphen_values = true)]
    pub site_lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub site_lon: Option<f64>,

    #[arg(long, default_value = "0")]
    pub site_population: u64,

    /// TOML file overriding calibration constants
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the GDP per capita used for economic loss
    #[arg(long)]
    pub gdp_per_capita: Option<f64>,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn source(&self) -> EarthquakeSource {
        EarthquakeSource::new(self.magnitude, self.depth, GeoPoint::new(self.lat, self.lon))
    }

    /// The site given inline on the command line, if any.
    pub fn inline_site(&self) -> Result<Option<Site>> {
        match (self.site_lat, self.site_lon) {
            (Some(lat), Some(lon)) => Ok(Some(Site::new(
                self.site_name.clone(),
                lat,
                lon,
                self.site_population,
            ))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ImpactError::MissingConfigError {
                field: "site_lon".to_string(),
            }),
            (None, Some(_)) => Err(ImpactError::MissingConfigError {
                field: "site_lat".to_string(),
            }),
        }
    }

    pub fn calibration(&self) -> Result<CalibrationConfig> {
        match &self.config {
            Some(path) => CalibrationConfig::from_file(path),
            None => Ok(CalibrationConfig::default()),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.source().validate()?;
        if self.sites.is_none() && self.inline_site()?.is_none() {
            return Err(ImpactError::MissingConfigError {
                field: "sites or site_lat/site_lon".to_string(),
            });
        }
        if let Some(gdp) = self.gdp_per_capita {
            validate_positive("gdp_per_capita", gdp)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_site() {
        let config = CliConfig::parse_from([
            "seismic-impact",
            "--magnitude",
            "8.8",
            "--depth",
            "35",
            "--lat",
            "-36.12",
            "--lon",
            "-72.90",
            "--site-lat",
            "-33.45",
            "--site-lon",
            "-70.67",
            "--site-population",
            "6000000",
        ]);
        assert!(config.validate().is_ok());
        assert_eq!(config.format, OutputFormat::Text);
        let site = config.inline_site().unwrap().unwrap();
        assert_eq!(site.population, 6_000_000);
        assert_eq!(config.source().epicenter.latitude, -36.12);
    }

    #[test]
    fn test_requires_some_site() {
        let config = CliConfig::parse_from(["seismic-impact", "-m", "6", "--lat", "0", "--lon", "0"]);
        assert!(matches!(
            config.validate(),
            Err(ImpactError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_half_specified_site_rejected() {
        let config = CliConfig::parse_from([
            "seismic-impact",
            "-m",
            "6",
            "--lat",
            "0",
            "--lon",
            "0",
            "--site-lat",
            "1",
        ]);
        assert!(config.inline_site().is_err());
    }

    #[test]
    fn test_out_of_range_magnitude_rejected() {
        let config = CliConfig::parse_from([
            "seismic-impact",
            "-m",
            "12",
            "--lat",
            "0",
            "--lon",
            "0",
            "--sites",
            "sites.csv",
        ]);
        assert!(matches!(
            config.validate(),
            Err(ImpactError::InvalidArgument { .. })
        ));
    }
}
