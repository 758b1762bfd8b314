use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use crate::core::comparator::ScenarioResult;
use crate::core::pipeline::ImpactReport;
use crate::utils::error::Result;

#[derive(Debug, Serialize)]
struct SiteRow<'a> {
    site: &'a str,
    population: u64,
    distance_km: String,
    direction: &'a str,
    intensity: String,
    mmi: &'a str,
    damage_percent: String,
    damage_category: &'a str,
    affected: u64,
    displaced: u64,
    casualties_low: u64,
    casualties_medium: u64,
    casualties_high: u64,
    economic_loss: String,
    percent_of_gdp: String,
}

pub fn write_json<W: Write, T: Serialize>(value: &T, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

/// One row per assessed site.
pub fn write_csv<W: Write>(report: &ImpactReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for impact in &report.sites {
        csv_writer.serialize(SiteRow {
            site: &impact.site,
            population: impact.population,
            distance_km: format!("{:.1}", impact.hypocentral_distance_km),
            direction: impact.direction,
            intensity: format!("{:.2}", impact.intensity),
            mmi: impact.mmi,
            damage_percent: format!("{:.1}", impact.damage_percent),
            damage_category: impact.damage_category,
            affected: impact.population_impact.affected,
            displaced: impact.population_impact.displaced,
            casualties_low: impact.casualties.low,
            casualties_medium: impact.casualties.medium,
            casualties_high: impact.casualties.high,
            economic_loss: format!("{:.0}", impact.economic_loss.total_loss),
            percent_of_gdp: format!("{:.1}", impact.economic_loss.percent_of_gdp),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn format_report(report: &ImpactReport) -> String {
    let mut out = String::new();
    let source = &report.source;
    let _ = writeln!(
        out,
        "M{:.1} at depth {:.0} km, epicenter ({:.3}, {:.3})",
        source.magnitude, source.depth_km, source.epicenter.latitude, source.epicenter.longitude
    );
    let _ = writeln!(
        out,
        "Epicentral intensity {:.2} (MMI {}), felt to {:.0} km, damaging to {:.0} km",
        report.epicentral_intensity,
        report.epicentral_mmi,
        report.felt_radius_km,
        report.damaging_radius_km
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<24} {:>9} {:>5} {:>7} {:>5} {:>7} {:<11} {:>10} {:>10}",
        "site", "dist_km", "dir", "int", "mmi", "damage", "category", "affected", "displaced"
    );
    for impact in &report.sites {
        let _ = writeln!(
            out,
            "{:<24} {:>9.1} {:>5} {:>7.2} {:>5} {:>6.1}% {:<11} {:>10} {:>10}",
            impact.site,
            impact.hypocentral_distance_km,
            impact.direction,
            impact.intensity,
            impact.mmi,
            impact.damage_percent,
            impact.damage_category,
            impact.population_impact.affected,
            impact.population_impact.displaced
        );
    }
    let totals = &report.totals;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Population {} | affected {} | displaced {} | casualties {}-{} (est. {}) | loss {:.0}",
        totals.population,
        totals.affected,
        totals.displaced,
        totals.casualties.low,
        totals.casualties.high,
        totals.casualties.medium,
        totals.economic_loss
    );
    if !report.skipped.is_empty() {
        let _ = writeln!(out, "Skipped (invalid coordinates): {}", report.skipped.join(", "));
    }
    out
}

pub fn format_scenarios(results: &[ScenarioResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3} {:<28} {:>5} {:>7} {:>9} {:>7} {:>5} {:>7} {:<11}",
        "id", "label", "mag", "depth", "dist_km", "int", "mmi", "damage", "category"
    );
    for result in results {
        let _ = writeln!(
            out,
            "{:>3} {:<28} {:>5.1} {:>7.1} {:>9.1} {:>7.2} {:>5} {:>6.1}% {:<11}",
            result.scenario_id,
            result.label.as_deref().unwrap_or("-"),
            result.magnitude,
            result.depth_km,
            result.distance_km,
            result.intensity,
            result.mmi,
            result.damage_percent,
            result.category
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::ImpactPipeline;
    use crate::domain::model::{EarthquakeSource, GeoPoint, Site};

    fn report() -> ImpactReport {
        let source = EarthquakeSource::new(7.0, 10.0, GeoPoint::new(38.0, 142.0));
        let sites = vec![
            Site::new("Sendai", 38.27, 140.87, 1_090_000),
            Site::new("Bad Row", 200.0, 0.0, 1),
        ];
        ImpactPipeline::default().assess_sites(&source, &sites).unwrap()
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let mut buffer = Vec::new();
        write_csv(&report(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("site,population,distance_km"));
        assert!(lines.next().unwrap().starts_with("Sendai,1090000,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_json_round_trips_through_value() {
        let mut buffer = Vec::new();
        write_json(&report(), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["sites"][0]["site"], "Sendai");
        assert_eq!(value["skipped"][0], "Bad Row");
    }

    #[test]
    fn test_text_report_mentions_skipped_sites() {
        let text = format_report(&report());
        assert!(text.contains("Sendai"));
        assert!(text.contains("Skipped (invalid coordinates): Bad Row"));
    }
}
