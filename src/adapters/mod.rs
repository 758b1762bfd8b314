// Adapters layer: concrete implementations for the external collaborators
// (site lists, historical catalogues, report output).

pub mod events;
pub mod report;
pub mod sites;

pub use events::JsonEventCatalog;
pub use sites::CsvSiteProvider;
