//! # Discrepancy Interpretation
//!
//! Maps a space discrepancy (available minus required, in mm) to a clinical
//! category with advice. Each arch carries an ordered list of bands that is
//! evaluated first-match, top to bottom.
//!
//! ## Band Ordering
//!
//! Bands are written from the largest surplus down to the largest deficit:
//!
//! ```text
//! Above(2.0)    d >  2            Significant excess
//! Above(0.0)    0 < d <= 2        Mild excess
//! Exactly(0.0)  d == 0            Perfect match
//! Above(-3.0)   -3 < d < 0        Mild deficiency
//! Otherwise     d <= -3           Significant deficiency
//! ```
//!
//! The catch-all band is a required field of [`BandTable`], which makes the
//! mapping total over the real line.
//!
//! ## Example
//!
//! ```rust
//! use moyers_core::interpretation::{classify, SpaceCategory};
//! use moyers_core::LOWER_PROFILE;
//!
//! let band = classify(&LOWER_PROFILE, -1.5);
//! assert_eq!(band.category, SpaceCategory::MildDeficiency);
//! ```

use serde::{Deserialize, Serialize};

use crate::profile::ArchProfile;

/// Clinical category of a space discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceCategory {
    SignificantExcess,
    MildExcess,
    PerfectMatch,
    MildDeficiency,
    ModerateDeficiency,
    SignificantDeficiency,
}

impl SpaceCategory {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SpaceCategory::SignificantExcess => "Significant excess",
            SpaceCategory::MildExcess => "Mild excess",
            SpaceCategory::PerfectMatch => "Perfect match",
            SpaceCategory::MildDeficiency => "Mild deficiency",
            SpaceCategory::ModerateDeficiency => "Moderate deficiency",
            SpaceCategory::SignificantDeficiency => "Significant deficiency",
        }
    }

    /// More space is available than the teeth need
    pub fn is_excess(&self) -> bool {
        matches!(self, SpaceCategory::SignificantExcess | SpaceCategory::MildExcess)
    }

    /// Less space is available than the teeth need
    pub fn is_deficiency(&self) -> bool {
        matches!(
            self,
            SpaceCategory::MildDeficiency
                | SpaceCategory::ModerateDeficiency
                | SpaceCategory::SignificantDeficiency
        )
    }
}

impl std::fmt::Display for SpaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Condition a discrepancy must satisfy to fall into a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BandBound {
    /// Discrepancy strictly greater than the value
    Above(f64),
    /// Discrepancy exactly equal to the value
    Exactly(f64),
    /// Matches anything; used by the catch-all band
    Otherwise,
}

impl BandBound {
    /// Check whether a discrepancy satisfies this bound
    pub fn contains(&self, discrepancy_mm: f64) -> bool {
        match *self {
            BandBound::Above(lower) => discrepancy_mm > lower,
            BandBound::Exactly(value) => discrepancy_mm == value,
            BandBound::Otherwise => true,
        }
    }
}

/// One row of a band table: bound, category, and the text shown for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscrepancyBand {
    pub bound: BandBound,
    pub category: SpaceCategory,
    /// Short label, e.g. "Significant space excess (>2mm)"
    pub summary: &'static str,
    /// One-line remark for bands that need no action
    pub remark: Option<&'static str>,
    /// Clinical considerations, most relevant first
    pub advice: &'static [&'static str],
}

impl DiscrepancyBand {
    /// Build the owned interpretation carried by an analysis result
    pub fn interpretation(&self) -> Interpretation {
        Interpretation {
            category: self.category,
            summary: self.summary.to_string(),
            remark: self.remark.map(str::to_string),
            advice: self.advice.iter().map(|line| line.to_string()).collect(),
        }
    }
}

/// Resolved interpretation of a discrepancy.
///
/// ## JSON Example
///
/// ```json
/// {
///   "category": "MildDeficiency",
///   "summary": "Mild space deficiency (0-3mm)",
///   "remark": null,
///   "advice": ["Interproximal reduction if minimal", "Monitoring eruption pattern"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub category: SpaceCategory,
    pub summary: String,
    pub remark: Option<String>,
    pub advice: Vec<String>,
}

/// Ordered bands for one arch plus the band that takes everything else.
///
/// The catch-all is a separate field, so every table classifies every
/// discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandTable {
    /// Bounded bands, evaluated first-match
    pub ordered: &'static [DiscrepancyBand],
    /// Band used when no bounded band matches
    pub otherwise: DiscrepancyBand,
}

impl BandTable {
    /// Find the first band whose bound contains the discrepancy
    pub fn classify(&self, discrepancy_mm: f64) -> &DiscrepancyBand {
        self.ordered
            .iter()
            .find(|band| band.bound.contains(discrepancy_mm))
            .unwrap_or(&self.otherwise)
    }

    /// All bands in evaluation order, catch-all last
    pub fn iter(&self) -> impl Iterator<Item = &DiscrepancyBand> {
        self.ordered.iter().chain(std::iter::once(&self.otherwise))
    }
}

/// Classify a discrepancy against an arch's bands.
pub fn classify(profile: &ArchProfile, discrepancy_mm: f64) -> &'static DiscrepancyBand {
    let bands: &'static BandTable = profile.bands;
    bands.classify(discrepancy_mm)
}

pub(crate) const MONITOR_SPACING: &str = "Monitoring for spacing issues";
pub(crate) const PROSTHETIC_REPLACEMENT: &str = "Possible prosthetic replacement if excessive";
pub(crate) const EXTRACTION_PLAN: &str = "Extraction treatment plan";

/// Lower (mandibular) arch bands
pub static LOWER_BANDS: BandTable = BandTable {
    ordered: &[
        DiscrepancyBand {
            bound: BandBound::Above(2.0),
            category: SpaceCategory::SignificantExcess,
            summary: "Significant space excess (>2mm)",
            remark: None,
            advice: &[MONITOR_SPACING, PROSTHETIC_REPLACEMENT],
        },
        DiscrepancyBand {
            bound: BandBound::Above(0.0),
            category: SpaceCategory::MildExcess,
            summary: "Mild space excess (0-2mm)",
            remark: Some("Usually acceptable."),
            advice: &[],
        },
        DiscrepancyBand {
            bound: BandBound::Exactly(0.0),
            category: SpaceCategory::PerfectMatch,
            summary: "Perfect space match",
            remark: Some("Ideal situation."),
            advice: &[],
        },
        DiscrepancyBand {
            bound: BandBound::Above(-3.0),
            category: SpaceCategory::MildDeficiency,
            summary: "Mild space deficiency (0-3mm)",
            remark: None,
            advice: &["Interproximal reduction if minimal", "Monitoring eruption pattern"],
        },
    ],
    otherwise: DiscrepancyBand {
        bound: BandBound::Otherwise,
        category: SpaceCategory::SignificantDeficiency,
        summary: "Significant space deficiency (>3mm)",
        remark: None,
        advice: &[
            EXTRACTION_PLAN,
            "Distalization if appropriate",
            "Expansion if indicated (limited in mandible)",
        ],
    },
};

/// Upper (maxillary) arch bands
pub static UPPER_BANDS: BandTable = BandTable {
    ordered: &[
        DiscrepancyBand {
            bound: BandBound::Above(3.0),
            category: SpaceCategory::SignificantExcess,
            summary: "Significant space excess (>3mm)",
            remark: None,
            advice: &[
                MONITOR_SPACING,
                PROSTHETIC_REPLACEMENT,
                "Mesial movement of posterior teeth if needed",
            ],
        },
        DiscrepancyBand {
            bound: BandBound::Above(0.0),
            category: SpaceCategory::MildExcess,
            summary: "Mild space excess (0-3mm)",
            remark: Some("Usually acceptable."),
            advice: &[],
        },
        DiscrepancyBand {
            bound: BandBound::Exactly(0.0),
            category: SpaceCategory::PerfectMatch,
            summary: "Perfect space match",
            remark: Some("Ideal situation."),
            advice: &[],
        },
        DiscrepancyBand {
            bound: BandBound::Above(-5.0),
            category: SpaceCategory::ModerateDeficiency,
            summary: "Moderate space deficiency (0-5mm)",
            remark: None,
            advice: &[
                "Interproximal reduction",
                "Expansion (more feasible in maxilla than mandible)",
                "Distalization of molars if possible",
            ],
        },
    ],
    otherwise: DiscrepancyBand {
        bound: BandBound::Otherwise,
        category: SpaceCategory::SignificantDeficiency,
        summary: "Significant space deficiency (>5mm)",
        remark: None,
        advice: &[
            EXTRACTION_PLAN,
            "Comprehensive orthodontic treatment",
            "Possible orthopedic expansion if age-appropriate",
        ],
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_band_edges() {
        assert_eq!(LOWER_BANDS.classify(2.5).category, SpaceCategory::SignificantExcess);
        // 2.0 itself is not "> 2"
        assert_eq!(LOWER_BANDS.classify(2.0).category, SpaceCategory::MildExcess);
        assert_eq!(LOWER_BANDS.classify(0.1).category, SpaceCategory::MildExcess);
        assert_eq!(LOWER_BANDS.classify(0.0).category, SpaceCategory::PerfectMatch);
        assert_eq!(LOWER_BANDS.classify(-0.1).category, SpaceCategory::MildDeficiency);
        assert_eq!(LOWER_BANDS.classify(-3.0).category, SpaceCategory::SignificantDeficiency);
        assert_eq!(LOWER_BANDS.classify(-10.0).category, SpaceCategory::SignificantDeficiency);
    }

    #[test]
    fn test_upper_band_edges() {
        assert_eq!(UPPER_BANDS.classify(3.1).category, SpaceCategory::SignificantExcess);
        assert_eq!(UPPER_BANDS.classify(3.0).category, SpaceCategory::MildExcess);
        assert_eq!(UPPER_BANDS.classify(0.0).category, SpaceCategory::PerfectMatch);
        assert_eq!(UPPER_BANDS.classify(-4.9).category, SpaceCategory::ModerateDeficiency);
        assert_eq!(UPPER_BANDS.classify(-5.0).category, SpaceCategory::SignificantDeficiency);
    }

    #[test]
    fn test_negative_zero_is_perfect_match() {
        assert_eq!(LOWER_BANDS.classify(-0.0).category, SpaceCategory::PerfectMatch);
        assert_eq!(UPPER_BANDS.classify(-0.0).category, SpaceCategory::PerfectMatch);
    }

    #[test]
    fn test_catch_all_only_at_the_end() {
        for bands in [&LOWER_BANDS, &UPPER_BANDS] {
            assert_eq!(bands.otherwise.bound, BandBound::Otherwise);
            assert!(bands.ordered.iter().all(|b| b.bound != BandBound::Otherwise));
            assert_eq!(bands.iter().count(), 5);
        }
    }

    #[test]
    fn test_empty_table_still_classifies() {
        let table = BandTable {
            ordered: &[],
            otherwise: LOWER_BANDS.otherwise,
        };
        for d in [10.0, 0.0, -10.0, f64::NAN] {
            assert_eq!(table.classify(d).category, SpaceCategory::SignificantDeficiency);
        }
    }

    #[test]
    fn test_classify_by_profile() {
        use crate::profile::{LOWER_PROFILE, UPPER_PROFILE};
        assert_eq!(classify(&LOWER_PROFILE, -4.0).category, SpaceCategory::SignificantDeficiency);
        assert_eq!(classify(&UPPER_PROFILE, -4.0).category, SpaceCategory::ModerateDeficiency);
    }

    #[test]
    fn test_interpretation_carries_text() {
        let interp = UPPER_BANDS.classify(-7.0).interpretation();
        assert_eq!(interp.summary, "Significant space deficiency (>5mm)");
        assert_eq!(interp.advice.len(), 3);
        assert_eq!(interp.advice[0], "Extraction treatment plan");
        assert!(interp.remark.is_none());

        let interp = LOWER_BANDS.classify(1.0).interpretation();
        assert_eq!(interp.remark.as_deref(), Some("Usually acceptable."));
        assert!(interp.advice.is_empty());
    }

    #[test]
    fn test_category_helpers() {
        assert!(SpaceCategory::MildExcess.is_excess());
        assert!(!SpaceCategory::PerfectMatch.is_excess());
        assert!(!SpaceCategory::PerfectMatch.is_deficiency());
        assert!(SpaceCategory::ModerateDeficiency.is_deficiency());
    }
}
