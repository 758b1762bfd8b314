use crate::domain::model::{HistoricalEvent, Site};
use crate::utils::error::Result;

/// Supplies the populated places to assess.
pub trait SiteProvider {
    fn sites(&self) -> Result<Vec<Site>>;
}

/// Supplies reference earthquakes for comparison and display.
pub trait EventCatalog {
    fn events(&self) -> Result<Vec<HistoricalEvent>>;
}

impl SiteProvider for Vec<Site> {
    fn sites(&self) -> Result<Vec<Site>> {
        Ok(self.clone())
    }
}

impl EventCatalog for Vec<HistoricalEvent> {
    fn events(&self) -> Result<Vec<HistoricalEvent>> {
        Ok(self.clone())
    }
}
