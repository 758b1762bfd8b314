//! Modified Mercalli Intensity classification.
//!
//! Twelve bands with half-open intervals `[min, max)` that partition `[0, inf)`.

use crate::domain::model::MmiEntry;

pub const FELT_LEVEL: u8 = 3;
pub const DAMAGING_LEVEL: u8 = 6;
pub const SEVERE_LEVEL: u8 = 8;

pub static MMI_SCALE: [MmiEntry; 12] = [
    MmiEntry {
        roman: "I",
        level: 1,
        min_intensity: 0.0,
        max_intensity: 1.5,
        name: "Not felt",
        shaking: "Not felt",
        damage: "None",
        color: "#FFFFFF",
        description: "Not felt except by very few under especially favorable conditions.",
    },
    MmiEntry {
        roman: "II",
        level: 2,
        min_intensity: 1.5,
        max_intensity: 2.5,
        name: "Weak",
        shaking: "Weak",
        damage: "None",
        color: "#BFCCFF",
        description: "Felt only by a few persons at rest, especially on upper floors of buildings.",
    },
    MmiEntry {
        roman: "III",
        level: 3,
        min_intensity: 2.5,
        max_intensity: 3.5,
        name: "Weak",
        shaking: "Weak",
        damage: "None",
        color: "#A0E6FF",
        description: "Felt quite noticeably indoors. Standing vehicles may rock slightly; \
                      vibrations similar to a passing truck.",
    },
    MmiEntry {
        roman: "IV",
        level: 4,
        min_intensity: 3.5,
        max_intensity: 4.5,
        name: "Light",
        shaking: "Light",
        damage: "None",
        color: "#80FFFF",
        description: "Felt indoors by many, outdoors by few. Dishes, windows and doors \
                      disturbed; walls make cracking sounds.",
    },
    MmiEntry {
        roman: "V",
        level: 5,
        min_intensity: 4.5,
        max_intensity: 5.5,
        name: "Moderate",
        shaking: "Moderate",
        damage: "Very light",
        color: "#7AFF93",
        description: "Felt by nearly everyone; many awakened. Some dishes and windows broken; \
                      unstable objects overturned.",
    },
    MmiEntry {
        roman: "VI",
        level: 6,
        min_intensity: 5.5,
        max_intensity: 6.5,
        name: "Strong",
        shaking: "Strong",
        damage: "Light",
        color: "#FFFF00",
        description: "Felt by all, many frightened. Some heavy furniture moved; a few \
                      instances of fallen plaster. Damage slight.",
    },
    MmiEntry {
        roman: "VII",
        level: 7,
        min_intensity: 6.5,
        max_intensity: 7.5,
        name: "Very strong",
        shaking: "Very strong",
        damage: "Moderate",
        color: "#FFC800",
        description: "Damage negligible in well-built structures, slight to moderate in \
                      ordinary buildings, considerable in poorly built ones.",
    },
    MmiEntry {
        roman: "VIII",
        level: 8,
        min_intensity: 7.5,
        max_intensity: 8.5,
        name: "Severe",
        shaking: "Severe",
        damage: "Moderate/Heavy",
        color: "#FF9100",
        description: "Considerable damage in ordinary buildings with partial collapse. \
                      Chimneys, columns and walls fall.",
    },
    MmiEntry {
        roman: "IX",
        level: 9,
        min_intensity: 8.5,
        max_intensity: 9.5,
        name: "Violent",
        shaking: "Violent",
        damage: "Heavy",
        color: "#FF0000",
        description: "Considerable damage even in specially designed structures; \
                      buildings shifted off foundations.",
    },
    MmiEntry {
        roman: "X",
        level: 10,
        min_intensity: 9.5,
        max_intensity: 10.5,
        name: "Extreme",
        shaking: "Extreme",
        damage: "Very heavy",
        color: "#C80000",
        description: "Most masonry and frame structures destroyed with their foundations. \
                      Rails bent.",
    },
    MmiEntry {
        roman: "XI",
        level: 11,
        min_intensity: 10.5,
        max_intensity: 11.5,
        name: "Extreme",
        shaking: "Extreme",
        damage: "Very heavy",
        color: "#A00000",
        description: "Few if any masonry structures remain standing. Bridges destroyed; \
                      broad fissures in the ground.",
    },
    MmiEntry {
        roman: "XII",
        level: 12,
        min_intensity: 11.5,
        max_intensity: f64::INFINITY,
        name: "Total destruction",
        shaking: "Extreme",
        damage: "Total",
        color: "#800000",
        description: "Damage total. Lines of sight distorted; objects thrown into the air.",
    },
];

/// Stateless lookup over [`MMI_SCALE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MmiClassifier;

impl MmiClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn scale(&self) -> &'static [MmiEntry] {
        &MMI_SCALE
    }

    pub fn classify(&self, intensity: f64) -> &'static MmiEntry {
        classify(intensity)
    }

    pub fn level(&self, intensity: f64) -> u8 {
        self.classify(intensity).level
    }

    pub fn color(&self, intensity: f64) -> &'static str {
        self.classify(intensity).color
    }

    pub fn is_felt(&self, intensity: f64) -> bool {
        self.level(intensity) >= FELT_LEVEL
    }

    pub fn is_damaging(&self, intensity: f64) -> bool {
        self.level(intensity) >= DAMAGING_LEVEL
    }

    pub fn is_severe(&self, intensity: f64) -> bool {
        self.level(intensity) >= SEVERE_LEVEL
    }

    /// Rough peak ground acceleration in %g for the band's level.
    pub fn estimated_pga_percent_g(&self, intensity: f64) -> f64 {
        let level = f64::from(self.level(intensity));
        (10f64.powf((level - 3.7) / 2.2) * 100.0).max(0.0)
    }
}

/// Negative and NaN intensities fall into MMI I; anything at or above the top
/// band's minimum is MMI XII.
pub fn classify(intensity: f64) -> &'static MmiEntry {
    if intensity.is_nan() || intensity < 0.0 {
        return &MMI_SCALE[0];
    }
    MMI_SCALE
        .iter()
        .find(|entry| entry.contains(intensity))
        .unwrap_or(&MMI_SCALE[MMI_SCALE.len() - 1])
}

pub fn by_level(level: u8) -> Option<&'static MmiEntry> {
    MMI_SCALE.iter().find(|entry| entry.level == level)
}

pub fn by_roman(roman: &str) -> Option<&'static MmiEntry> {
    MMI_SCALE
        .iter()
        .find(|entry| entry.roman.eq_ignore_ascii_case(roman.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_contiguous_and_ordered() {
        assert_eq!(MMI_SCALE[0].min_intensity, 0.0);
        for (index, pair) in MMI_SCALE.windows(2).enumerate() {
            assert_eq!(pair[0].max_intensity, pair[1].min_intensity);
            assert_eq!(pair[0].level as usize, index + 1);
            assert!(pair[0].min_intensity < pair[0].max_intensity);
        }
        assert_eq!(MMI_SCALE[11].level, 12);
        assert!(MMI_SCALE[11].max_intensity.is_infinite());
    }

    #[test]
    fn test_exactly_one_band_per_intensity() {
        for step in 0..=1500 {
            let x = step as f64 * 0.01;
            let matches = MMI_SCALE.iter().filter(|e| e.contains(x)).count();
            assert_eq!(matches, 1, "intensity {} matched {} bands", x, matches);
        }
    }

    #[test]
    fn test_band_minimum_belongs_to_band() {
        for entry in MMI_SCALE.iter() {
            assert_eq!(classify(entry.min_intensity).level, entry.level);
        }
        assert_eq!(classify(6.4999).level, 6);
        assert_eq!(classify(6.5).level, 7);
    }

    #[test]
    fn test_out_of_domain_values() {
        assert_eq!(classify(-2.0).roman, "I");
        assert_eq!(classify(f64::NAN).roman, "I");
        assert_eq!(classify(250.0).roman, "XII");
        assert_eq!(classify(f64::INFINITY).roman, "XII");
    }

    #[test]
    fn test_reference_intensities() {
        assert_eq!(classify(7.2).roman, "VII");
        assert_eq!(classify(2.82).roman, "III");
        let first = classify(5.1).level;
        let second = classify(5.1).level;
        assert_eq!(first, second);
    }

    #[test]
    fn test_derived_queries() {
        let c = MmiClassifier::new();
        assert!(!c.is_felt(2.4));
        assert!(c.is_felt(2.5));
        assert!(!c.is_damaging(5.4));
        assert!(c.is_damaging(5.5));
        assert!(!c.is_severe(7.4));
        assert!(c.is_severe(7.5));
        assert_eq!(c.color(9.0), "#FF0000");
        assert_eq!(c.scale().len(), 12);
    }

    #[test]
    fn test_pga_estimate() {
        let c = MmiClassifier::new();
        assert!((c.estimated_pga_percent_g(0.0) - 5.9255).abs() < 1e-3);
        // level 7: 10^1.5 scaled by 100
        assert!((c.estimated_pga_percent_g(7.0) - 3162.2777).abs() < 1e-3);
        assert!(c.estimated_pga_percent_g(4.0) < c.estimated_pga_percent_g(5.0));
    }

    #[test]
    fn test_lookup_helpers() {
        assert_eq!(by_level(9).unwrap().roman, "IX");
        assert!(by_level(0).is_none());
        assert_eq!(by_roman("viii").unwrap().level, 8);
        assert!(by_roman("XIII").is_none());
    }
}
