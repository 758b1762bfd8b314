//! Helpers for putting a scenario next to past earthquakes. Display only; the
//! intensity and damage math never reads these records.

use crate::core::comparator::ScenarioInput;
use crate::domain::model::HistoricalEvent;

pub const DEFAULT_HISTORICAL_DEPTH_KM: f64 = 10.0;

/// How many times more energy an `m1` event releases than an `m2` event.
pub fn energy_ratio(m1: f64, m2: f64) -> f64 {
    10f64.powf(1.5 * (m1 - m2))
}

/// The `n` events whose magnitude is nearest to `magnitude`.
pub fn closest_events(magnitude: f64, events: &[HistoricalEvent], n: usize) -> Vec<&HistoricalEvent> {
    let mut sorted: Vec<&HistoricalEvent> = events.iter().collect();
    sorted.sort_by(|a, b| {
        (a.magnitude - magnitude)
            .abs()
            .total_cmp(&(b.magnitude - magnitude).abs())
    });
    sorted.truncate(n);
    sorted
}

/// Each event as a comparator scenario at a common distance. Events without a
/// recorded depth use `default_depth_km`.
pub fn historical_scenarios(
    events: &[HistoricalEvent],
    distance_km: f64,
    default_depth_km: f64,
) -> Vec<ScenarioInput> {
    events
        .iter()
        .map(|event| {
            ScenarioInput::new(
                event.magnitude,
                event.depth_km.unwrap_or(default_depth_km),
                distance_km,
            )
            .labeled(event.name.clone())
        })
        .collect()
}
