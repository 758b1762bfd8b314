use serde::Serialize;

use crate::config::CalibrationConfig;
use crate::core::attenuation::AttenuationModel;
use crate::core::damage::DamageModel;
use crate::core::geo;
use crate::core::mmi::{MmiClassifier, DAMAGING_LEVEL, FELT_LEVEL, MMI_SCALE};
use crate::domain::model::{
    CasualtyEstimate, ConstructionDamage, EarthquakeSource, EconomicLoss, PopulationImpact, Site,
};
use crate::domain::ports::SiteProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteImpact {
    pub site: String,
    pub population: u64,
    pub surface_distance_km: f64,
    pub hypocentral_distance_km: f64,
    pub bearing_deg: f64,
    pub direction: &'static str,
    pub intensity: f64,
    pub mmi_level: u8,
    pub mmi: &'static str,
    pub mmi_name: &'static str,
    pub pga_percent_g: f64,
    pub damage_percent: f64,
    pub damage_category: &'static str,
    pub severity: u8,
    pub construction: ConstructionDamage,
    pub population_impact: PopulationImpact,
    pub economic_loss: EconomicLoss,
    pub casualties: CasualtyEstimate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImpactTotals {
    pub population: u64,
    pub affected: u64,
    pub displaced: u64,
    pub casualties: CasualtyEstimate,
    pub economic_loss: f64,
    pub most_affected_site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    pub source: EarthquakeSource,
    pub epicentral_intensity: f64,
    pub epicentral_mmi: &'static str,
    pub felt_radius_km: f64,
    pub damaging_radius_km: f64,
    pub sites: Vec<SiteImpact>,
    /// Names of sites dropped for invalid coordinates.
    pub skipped: Vec<String>,
    pub totals: ImpactTotals,
}

/// Source + sites in, per-site impact report out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactPipeline {
    attenuation: AttenuationModel,
    classifier: MmiClassifier,
    damage: DamageModel,
    gdp_per_capita: Option<f64>,
}

impl ImpactPipeline {
    pub fn new(config: &CalibrationConfig) -> Self {
        Self {
            attenuation: AttenuationModel::new(config.attenuation, config.felt_radius),
            classifier: MmiClassifier::new(),
            damage: DamageModel::new(config.damage, config.impact),
            gdp_per_capita: None,
        }
    }

    pub fn with_gdp_per_capita(mut self, gdp_per_capita: f64) -> Self {
        self.gdp_per_capita = Some(gdp_per_capita);
        self
    }

    pub fn attenuation(&self) -> &AttenuationModel {
        &self.attenuation
    }

    pub fn damage(&self) -> &DamageModel {
        &self.damage
    }

    fn gdp_per_capita(&self) -> f64 {
        self.gdp_per_capita
            .unwrap_or(self.damage.impact_config().default_gdp_per_capita)
    }

    pub fn assess_site(&self, source: &EarthquakeSource, site: &Site) -> Result<SiteImpact> {
        let surface = geo::surface_distance(source.epicenter, site.location);
        let hypocentral = geo::hypocentral_distance(source.epicenter, source.depth_km, site.location);
        let bearing = geo::bearing(source.epicenter, site.location);

        let intensity = self
            .attenuation
            .calculate_intensity(source.magnitude, source.depth_km, surface)?;
        let mmi = self.classifier.classify(intensity);
        let damage_percent = self.damage.damage_percent(intensity);
        let category = self.damage.damage_category(damage_percent);

        tracing::debug!(
            site = %site.name,
            distance_km = hypocentral,
            intensity,
            mmi = mmi.roman,
            damage_percent,
            "site assessed"
        );

        Ok(SiteImpact {
            site: site.name.clone(),
            population: site.population,
            surface_distance_km: surface,
            hypocentral_distance_km: hypocentral,
            bearing_deg: bearing,
            direction: geo::compass_point(bearing),
            intensity,
            mmi_level: mmi.level,
            mmi: mmi.roman,
            mmi_name: mmi.name,
            pga_percent_g: self.classifier.estimated_pga_percent_g(intensity),
            damage_percent,
            damage_category: category.label,
            severity: category.severity,
            construction: self.damage.by_construction_type(intensity),
            population_impact: self.damage.population_impact(site.population, damage_percent),
            economic_loss: self.damage.economic_loss_with_gdp(
                damage_percent,
                site.population,
                self.gdp_per_capita(),
            ),
            casualties: self.damage.casualty_risk(site.population, damage_percent),
        })
    }

    pub fn run<P: SiteProvider>(&self, source: &EarthquakeSource, provider: &P) -> Result<ImpactReport> {
        let sites = provider.sites()?;
        self.assess_sites(source, &sites)
    }

    /// Rejects an out-of-range source; sites with invalid coordinates are
    /// skipped and listed in the report.
    pub fn assess_sites(&self, source: &EarthquakeSource, sites: &[Site]) -> Result<ImpactReport> {
        source.validate()?;
        tracing::info!(
            magnitude = source.magnitude,
            depth_km = source.depth_km,
            sites = sites.len(),
            "Assessing earthquake impact"
        );

        let epicentral_intensity = self
            .attenuation
            .epicentral_intensity(source.magnitude, source.depth_km)?;
        let felt_radius_km = self.attenuation.felt_radius(
            source.magnitude,
            source.depth_km,
            MMI_SCALE[usize::from(FELT_LEVEL) - 1].min_intensity,
        )?;
        let damaging_radius_km = self.attenuation.felt_radius(
            source.magnitude,
            source.depth_km,
            MMI_SCALE[usize::from(DAMAGING_LEVEL) - 1].min_intensity,
        )?;

        let mut impacts = Vec::with_capacity(sites.len());
        let mut skipped = Vec::new();
        for site in sites {
            if !site.location.is_valid() {
                tracing::warn!(
                    "Skipping site '{}' with invalid coordinates ({}, {})",
                    site.name,
                    site.location.latitude,
                    site.location.longitude
                );
                skipped.push(site.name.clone());
                continue;
            }
            impacts.push(self.assess_site(source, site)?);
        }

        let totals = summarize(&impacts);
        tracing::info!(
            assessed = impacts.len(),
            skipped = skipped.len(),
            affected = totals.affected,
            displaced = totals.displaced,
            "Impact assessment complete"
        );

        Ok(ImpactReport {
            source: *source,
            epicentral_intensity,
            epicentral_mmi: self.classifier.classify(epicentral_intensity).roman,
            felt_radius_km,
            damaging_radius_km,
            sites: impacts,
            skipped,
            totals,
        })
    }
}

fn summarize(impacts: &[SiteImpact]) -> ImpactTotals {
    let mut totals = impacts.iter().fold(ImpactTotals::default(), |mut acc, impact| {
        acc.population += impact.population;
        acc.affected += impact.population_impact.affected;
        acc.displaced += impact.population_impact.displaced;
        acc.casualties.low += impact.casualties.low;
        acc.casualties.medium += impact.casualties.medium;
        acc.casualties.high += impact.casualties.high;
        acc.economic_loss += impact.economic_loss.total_loss;
        acc
    });
    totals.most_affected_site = impacts
        .iter()
        .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
        .map(|impact| impact.site.clone());
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::GeoPoint;
    use crate::utils::error::ImpactError;

    fn source() -> EarthquakeSource {
        EarthquakeSource::new(7.8, 15.0, GeoPoint::new(-36.12, -72.90))
    }

    fn sites() -> Vec<Site> {
        vec![
            Site::new("Concepcion", -36.83, -73.05, 220_000),
            Site::new("Talca", -35.43, -71.66, 200_000),
            Site::new("Santiago", -33.45, -70.67, 6_000_000),
        ]
    }

    #[test]
    fn test_assess_site_near_epicenter() {
        let pipeline = ImpactPipeline::default();
        let src = source();
        let impact = pipeline.assess_site(&src, &sites()[0]).unwrap();

        assert!(impact.surface_distance_km > 70.0 && impact.surface_distance_km < 90.0);
        assert!(impact.hypocentral_distance_km > impact.surface_distance_km);
        assert_eq!(impact.direction, "S");
        assert!(impact.intensity > 0.0);
        assert!(impact.population_impact.affected <= impact.population);
        assert!(impact.casualties.low <= impact.casualties.high);
    }

    #[test]
    fn test_report_orders_sites_and_totals() {
        let pipeline = ImpactPipeline::default();
        let report = pipeline.assess_sites(&source(), &sites()).unwrap();

        assert_eq!(report.sites.len(), 3);
        assert_eq!(report.sites[0].site, "Concepcion");
        assert!(report.sites[0].intensity >= report.sites[2].intensity);
        assert_eq!(report.totals.population, 6_420_000);
        assert_eq!(
            report.totals.affected,
            report
                .sites
                .iter()
                .map(|s| s.population_impact.affected)
                .sum::<u64>()
        );
        assert_eq!(report.totals.most_affected_site.as_deref(), Some("Concepcion"));
        assert!(report.epicentral_intensity >= report.sites[0].intensity);
        assert!(report.felt_radius_km >= report.damaging_radius_km);
    }

    #[test]
    fn test_invalid_site_is_skipped() {
        let pipeline = ImpactPipeline::default();
        let mut list = sites();
        list.push(Site::new("Nowhere", 123.0, 0.0, 10));
        let report = pipeline.assess_sites(&source(), &list).unwrap();
        assert_eq!(report.sites.len(), 3);
        assert_eq!(report.skipped, vec!["Nowhere".to_string()]);
    }

    #[test]
    fn test_invalid_source_is_rejected() {
        let pipeline = ImpactPipeline::default();
        let bad = EarthquakeSource::new(7.0, 900.0, GeoPoint::new(0.0, 0.0));
        let err = pipeline.assess_sites(&bad, &sites()).unwrap_err();
        assert!(matches!(err, ImpactError::InvalidArgument { .. }));
    }

    #[test]
    fn test_gdp_override_scales_losses() {
        let base = ImpactPipeline::default();
        let rich = ImpactPipeline::default().with_gdp_per_capita(30_000.0);
        let site = &sites()[0];
        let a = base.assess_site(&source(), site).unwrap();
        let b = rich.assess_site(&source(), site).unwrap();
        if a.economic_loss.total_loss > 0.0 {
            let ratio = b.economic_loss.total_loss / a.economic_loss.total_loss;
            assert!((ratio - 2.0).abs() < 1e-9);
        }
        assert_eq!(a.economic_loss.percent_of_gdp, b.economic_loss.percent_of_gdp);
    }

    #[test]
    fn test_run_with_provider() {
        let pipeline = ImpactPipeline::new(&CalibrationConfig::default());
        let report = pipeline.run(&source(), &sites()).unwrap();
        assert_eq!(report.sites.len(), 3);
    }
}
