pub mod attenuation;
pub mod comparator;
pub mod damage;
pub mod geo;
pub mod history;
pub mod mmi;
pub mod pipeline;

pub use crate::domain::model::{EarthquakeSource, GeoPoint, Site};
pub use crate::domain::ports::{EventCatalog, SiteProvider};
pub use crate::utils::error::Result;
