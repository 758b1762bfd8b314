use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::model::HistoricalEvent;
use crate::domain::ports::EventCatalog;
use crate::utils::error::{ImpactError, Result};

#[derive(Debug, Deserialize)]
struct EventRecord {
    name: String,
    magnitude: f64,
    #[serde(default)]
    date: Option<String>,
    #[serde(default, alias = "depth_km")]
    depth: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventDocument {
    List(Vec<EventRecord>),
    Wrapped { events: Vec<EventRecord> },
}

/// Historical earthquakes stored as a JSON array (or `{"events": [...]}`).
#[derive(Debug, Clone)]
pub struct JsonEventCatalog {
    path: PathBuf,
}

impl JsonEventCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EventCatalog for JsonEventCatalog {
    fn events(&self) -> Result<Vec<HistoricalEvent>> {
        let content = fs::read_to_string(&self.path)?;
        let events = parse_events(&content)?;
        tracing::info!(
            "Loaded {} historical events from {}",
            events.len(),
            self.path.display()
        );
        Ok(events)
    }
}

pub fn parse_events(content: &str) -> Result<Vec<HistoricalEvent>> {
    let records = match serde_json::from_str::<EventDocument>(content)? {
        EventDocument::List(records) => records,
        EventDocument::Wrapped { events } => events,
    };

    records
        .into_iter()
        .map(|record| {
            if !record.magnitude.is_finite() {
                return Err(ImpactError::DataFormatError {
                    message: format!("event '{}' has a non-finite magnitude", record.name),
                });
            }
            let date = record.date.as_deref().and_then(|raw| {
                let parsed = parse_event_date(raw);
                if parsed.is_none() {
                    tracing::warn!("Ignoring unparseable date '{}' for '{}'", raw, record.name);
                }
                parsed
            });
            Ok(HistoricalEvent {
                name: record.name,
                magnitude: record.magnitude,
                date,
                depth_km: record.depth,
            })
        })
        .collect()
}

/// Accepts `YYYY-MM-DD` or a bare year, which maps to January 1st.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        raw.parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_list() {
        let json = r#"[
            {"name": "Valdivia", "magnitude": 9.5, "date": "1960-05-22", "depth": 33},
            {"name": "Maule", "magnitude": 8.8, "date": "2010-02-27"},
            {"name": "Lisbon", "magnitude": 8.7, "date": "1755"}
        ]"#;
        let events = parse_events(json).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].depth_km, Some(33.0));
        assert_eq!(events[1].depth_km, None);
        assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2010, 2, 27));
        assert_eq!(events[2].date, NaiveDate::from_ymd_opt(1755, 1, 1));
    }

    #[test]
    fn test_parse_wrapped_document() {
        let json = r#"{"events": [{"name": "Tohoku", "magnitude": 9.1, "depth_km": 29.0}]}"#;
        let events = parse_events(json).unwrap();
        assert_eq!(events[0].name, "Tohoku");
        assert_eq!(events[0].depth_km, Some(29.0));
        assert_eq!(events[0].date, None);
    }

    #[test]
    fn test_bad_date_is_dropped_not_fatal() {
        let json = r#"[{"name": "Odd", "magnitude": 6.0, "date": "sometime"}]"#;
        let events = parse_events(json).unwrap();
        assert_eq!(events[0].date, None);
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_events("[{\"name\": 3}]").unwrap_err();
        assert!(matches!(err, ImpactError::SerializationError(_)));
    }
}
