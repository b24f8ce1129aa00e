//! # Arch Profiles
//!
//! Everything that differs between the lower and upper arch lives here as
//! static data: the linear prediction coefficients for canine and premolar
//! widths, the overjet correction factor, and the discrepancy bands.
//!
//! ## Prediction Equations (75% probability level)
//!
//! | Arch  | Canine          | Premolars       | Overjet factor |
//! |-------|-----------------|-----------------|----------------|
//! | Lower | 0.1·Σ + 4.5     | 0.2·Σ + 6.5     | none           |
//! | Upper | 0.2·Σ + 3.0     | 0.2·Σ + 7.0     | 2.0            |
//!
//! where Σ is the sum of the mandibular incisor widths in mm.
//!
//! ## Example
//!
//! ```rust
//! use moyers_core::ArchType;
//!
//! let profile = ArchType::Upper.profile();
//! assert!((profile.predict_canine(22.0) - 7.4).abs() < 1e-9);
//! assert_eq!(profile.overjet_factor, Some(2.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::interpretation::{BandTable, LOWER_BANDS, UPPER_BANDS};
use crate::reference_table::{ReferenceTableRow, LOWER_TABLE, UPPER_TABLE};

/// Accepted range for the mandibular incisor sum (mm)
pub const INCISOR_SUM_MIN_MM: f64 = 20.0;
pub const INCISOR_SUM_MAX_MM: f64 = 30.0;

/// Dental arch being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchType {
    /// Mandibular arch
    Lower,
    /// Maxillary arch (needs overjet correction)
    Upper,
}

impl ArchType {
    /// All arch types for UI selection
    pub const ALL: [ArchType; 2] = [ArchType::Lower, ArchType::Upper];

    /// Get the static profile for this arch
    pub fn profile(&self) -> &'static ArchProfile {
        match self {
            ArchType::Lower => &LOWER_PROFILE,
            ArchType::Upper => &UPPER_PROFILE,
        }
    }

    /// Get the reference prediction table for this arch
    pub fn reference_table(&self) -> &'static [ReferenceTableRow] {
        self.profile().reference_table
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ArchType::Lower => "Lower Arch",
            ArchType::Upper => "Upper Arch",
        }
    }

    /// Whether this arch takes overjet measurements
    pub fn uses_overjet(&self) -> bool {
        self.profile().overjet_factor.is_some()
    }
}

impl std::fmt::Display for ArchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Width prediction `slope * incisor_sum + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearPrediction {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearPrediction {
    pub fn predict(&self, incisor_sum_mm: f64) -> f64 {
        self.slope * incisor_sum_mm + self.intercept
    }
}

/// Per-arch configuration consumed by [`crate::analysis::analyze`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArchProfile {
    pub arch: ArchType,

    /// Predicted canine width
    pub canine: LinearPrediction,

    /// Predicted combined width of the first and second premolars
    pub premolars: LinearPrediction,

    /// Space needed per mm of overjet reduction; `None` when the arch takes no
    /// overjet correction
    pub overjet_factor: Option<f64>,

    /// Discrepancy bands, evaluated first-match
    pub bands: &'static BandTable,

    /// Published table the equations approximate (display only)
    #[serde(skip)]
    pub reference_table: &'static [ReferenceTableRow],
}

impl ArchProfile {
    pub fn predict_canine(&self, incisor_sum_mm: f64) -> f64 {
        self.canine.predict(incisor_sum_mm)
    }

    pub fn predict_premolars(&self, incisor_sum_mm: f64) -> f64 {
        self.premolars.predict(incisor_sum_mm)
    }
}

pub static LOWER_PROFILE: ArchProfile = ArchProfile {
    arch: ArchType::Lower,
    canine: LinearPrediction { slope: 0.1, intercept: 4.5 },
    premolars: LinearPrediction { slope: 0.2, intercept: 6.5 },
    overjet_factor: None,
    bands: &LOWER_BANDS,
    reference_table: &LOWER_TABLE,
};

pub static UPPER_PROFILE: ArchProfile = ArchProfile {
    arch: ArchType::Upper,
    canine: LinearPrediction { slope: 0.2, intercept: 3.0 },
    premolars: LinearPrediction { slope: 0.2, intercept: 7.0 },
    overjet_factor: Some(2.0),
    bands: &UPPER_BANDS,
    reference_table: &UPPER_TABLE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_predictions() {
        let p = ArchType::Lower.profile();
        assert!((p.predict_canine(22.0) - 6.7).abs() < 1e-9);
        assert!((p.predict_premolars(22.0) - 10.9).abs() < 1e-9);
    }

    #[test]
    fn test_upper_predictions() {
        let p = ArchType::Upper.profile();
        assert!((p.predict_canine(22.0) - 7.4).abs() < 1e-9);
        assert!((p.predict_premolars(22.0) - 11.4).abs() < 1e-9);
    }

    #[test]
    fn test_profiles_match_arch() {
        for arch in ArchType::ALL {
            assert_eq!(arch.profile().arch, arch);
        }
        assert!(!ArchType::Lower.uses_overjet());
        assert!(ArchType::Upper.uses_overjet());
    }

    #[test]
    fn test_required_space_grows_with_incisor_sum() {
        for arch in ArchType::ALL {
            let p = arch.profile();
            assert!(p.canine.slope + p.premolars.slope > 0.0);
        }
    }

    #[test]
    fn test_arch_serialization() {
        let json = serde_json::to_string(&ArchType::Upper).unwrap();
        assert_eq!(json, "\"Upper\"");
    }
}
