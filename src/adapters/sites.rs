use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::model::Site;
use crate::domain::ports::SiteProvider;
use crate::utils::error::{ImpactError, Result};

#[derive(Debug, Deserialize)]
struct SiteRecord {
    name: String,
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    longitude: f64,
    population: f64,
}

/// Site list stored as CSV with a `name,latitude,longitude,population` header.
/// Extra columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvSiteProvider {
    path: PathBuf,
}

impl CsvSiteProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SiteProvider for CsvSiteProvider {
    fn sites(&self) -> Result<Vec<Site>> {
        tracing::debug!("Reading sites from {}", self.path.display());
        let file = File::open(&self.path)?;
        let sites = read_sites(file)?;
        tracing::info!("Loaded {} sites from {}", sites.len(), self.path.display());
        Ok(sites)
    }
}

pub fn read_sites<R: Read>(reader: R) -> Result<Vec<Site>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut sites = Vec::new();
    for (index, row) in csv_reader.deserialize::<SiteRecord>().enumerate() {
        let record = row?;
        if !record.population.is_finite() || record.population < 0.0 {
            return Err(ImpactError::DataFormatError {
                message: format!(
                    "row {}: population for '{}' must be a non-negative number, got {}",
                    index + 1,
                    record.name,
                    record.population
                ),
            });
        }
        sites.push(Site::new(
            record.name,
            record.latitude,
            record.longitude,
            record.population.round() as u64,
        ));
    }
    Ok(sites)
}
