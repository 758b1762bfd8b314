use serde::{Deserialize, Serialize};

use crate::core::attenuation::AttenuationModel;
use crate::core::damage::DamageModel;
use crate::core::mmi;
use crate::utils::error::Result;
use crate::utils::validation::sanitize_intensity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(default)]
    pub label: Option<String>,
    pub magnitude: f64,
    pub depth_km: f64,
    /// Horizontal distance from the epicentre.
    pub distance_km: f64,
}

impl ScenarioInput {
    pub fn new(magnitude: f64, depth_km: f64, distance_km: f64) -> Self {
        Self {
            label: None,
            magnitude,
            depth_km,
            distance_km,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    /// 1-based position in the input.
    pub scenario_id: usize,
    pub label: Option<String>,
    pub magnitude: f64,
    pub depth_km: f64,
    pub distance_km: f64,
    pub intensity: f64,
    pub mmi: &'static str,
    pub damage_percent: f64,
    pub category: &'static str,
    pub severity: u8,
}

/// Runs the intensity -> damage -> category chain over a batch of scenarios.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioComparator {
    damage: DamageModel,
}

impl ScenarioComparator {
    pub fn new(damage: DamageModel) -> Self {
        Self { damage }
    }

    /// Results keep the input order. The first rejected scenario aborts the
    /// batch with its error.
    pub fn compare<F>(&self, scenarios: &[ScenarioInput], intensity_fn: F) -> Result<Vec<ScenarioResult>>
    where
        F: Fn(f64, f64, f64) -> Result<f64>,
    {
        scenarios
            .iter()
            .enumerate()
            .map(|(index, scenario)| -> Result<ScenarioResult> {
                let raw = intensity_fn(scenario.magnitude, scenario.depth_km, scenario.distance_km)?;
                let intensity = sanitize_intensity(raw);
                let damage_percent = self.damage.damage_percent(intensity);
                let category = self.damage.damage_category(damage_percent);

                tracing::debug!(
                    scenario_id = index + 1,
                    intensity,
                    damage_percent,
                    category = category.label,
                    "scenario evaluated"
                );

                Ok(ScenarioResult {
                    scenario_id: index + 1,
                    label: scenario.label.clone(),
                    magnitude: scenario.magnitude,
                    depth_km: scenario.depth_km,
                    distance_km: scenario.distance_km,
                    intensity,
                    mmi: mmi::classify(intensity).roman,
                    damage_percent,
                    category: category.label,
                    severity: category.severity,
                })
            })
            .collect()
    }

    pub fn compare_with_model(
        &self,
        scenarios: &[ScenarioInput],
        model: &AttenuationModel,
    ) -> Result<Vec<ScenarioResult>> {
        self.compare(scenarios, |m, d, r| model.calculate_intensity(m, d, r))
    }
}

/// Most damaging first; ties keep their input order.
pub fn rank_by_severity(results: &[ScenarioResult]) -> Vec<&ScenarioResult> {
    let mut ranked: Vec<&ScenarioResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.damage_percent.total_cmp(&a.damage_percent));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ImpactError;

    fn scenarios() -> Vec<ScenarioInput> {
        vec![
            ScenarioInput::new(5.5, 20.0, 500.0),
            ScenarioInput::new(8.8, 35.0, 40.0).labeled("near megathrust"),
            ScenarioInput::new(6.5, 10.0, 15.0),
        ]
    }

    #[test]
    fn test_results_keep_input_order_and_ids() {
        let comparator = ScenarioComparator::default();
        let model = AttenuationModel::default();
        let results = comparator.compare_with_model(&scenarios(), &model).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(
            results.iter().map(|r| r.scenario_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(results[0].intensity, 0.0);
        assert_eq!(results[0].severity, 0);
        assert_eq!(results[1].label.as_deref(), Some("near megathrust"));
        assert!(results[1].damage_percent > results[0].damage_percent);
    }

    #[test]
    fn test_depth_changes_scenario_outcome() {
        let comparator = ScenarioComparator::default();
        let model = AttenuationModel::default();
        let pair = vec![
            ScenarioInput::new(8.8, 5.0, 100.0).labeled("shallow"),
            ScenarioInput::new(8.8, 600.0, 100.0).labeled("deep"),
        ];
        let results = comparator.compare_with_model(&pair, &model).unwrap();

        assert!(results[0].intensity > results[1].intensity);
        assert!(results[0].damage_percent > results[1].damage_percent);
        assert_ne!(results[0].mmi, results[1].mmi);
    }

    #[test]
    fn test_custom_intensity_function() {
        let comparator = ScenarioComparator::default();
        let results = comparator
            .compare(&scenarios(), |m, _d, _r| Ok(if m > 8.0 { 7.8 } else { 2.0 }))
            .unwrap();
        assert_eq!(results[1].intensity, 7.8);
        assert_eq!(results[1].mmi, "VIII");
        assert_eq!(results[1].category, "Very Heavy");
        assert_eq!(results[1].severity, 5);
    }

    #[test]
    fn test_negative_intensity_is_clamped() {
        let comparator = ScenarioComparator::default();
        let results = comparator
            .compare(&scenarios()[..1], |_, _, _| Ok(-4.0))
            .unwrap();
        assert_eq!(results[0].intensity, 0.0);
        assert_eq!(results[0].damage_percent, comparator.damage.damage_percent(0.0));
    }

    #[test]
    fn test_rejected_scenario_propagates() {
        let comparator = ScenarioComparator::default();
        let model = AttenuationModel::default();
        let bad = vec![ScenarioInput::new(6.0, 10.0, 5.0), ScenarioInput::new(12.0, 10.0, 5.0)];
        let err = comparator.compare_with_model(&bad, &model).unwrap_err();
        assert!(matches!(err, ImpactError::InvalidArgument { .. }));
    }

    #[test]
    fn test_rank_by_severity_leaves_original_untouched() {
        let comparator = ScenarioComparator::default();
        let model = AttenuationModel::default();
        let results = comparator.compare_with_model(&scenarios(), &model).unwrap();
        let ranked = rank_by_severity(&results);

        assert_eq!(ranked[0].scenario_id, 2);
        assert_eq!(ranked[2].scenario_id, 1);
        assert_eq!(results[0].scenario_id, 1);
    }
}
