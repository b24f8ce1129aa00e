//! # Mixed Dentition Space Analysis
//!
//! Predicts the space the unerupted canine and premolars will need, compares
//! it with the space available, and classifies the discrepancy.
//!
//! Lower and upper arch run through the same [`analyze`] function; the arch
//! differences (coefficients, overjet correction, bands) come from the
//! [`ArchProfile`] passed in.
//!
//! ## Procedure
//!
//! 1. Validate measurements (first violation wins)
//! 2. Predict canine and premolar widths from the incisor sum
//! 3. Add overjet correction space (upper arch only)
//! 4. Discrepancy = space available - space required
//! 5. Classify the discrepancy against the arch's bands
//!
//! ## Example
//!
//! ```rust
//! use moyers_core::analysis::{analyze, MeasurementInput};
//! use moyers_core::{SpaceCategory, UPPER_PROFILE};
//!
//! let input = MeasurementInput::upper(22.0, 32.0, 3.0, 2.0);
//! let result = analyze(&UPPER_PROFILE, &input).unwrap();
//!
//! assert_eq!(result.overjet_correction_mm, Some(2.0));
//! assert!((result.discrepancy_mm - 11.2).abs() < 1e-9);
//! assert_eq!(result.interpretation.category, SpaceCategory::SignificantExcess);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::interpretation::{classify, Interpretation};
use crate::profile::{ArchProfile, ArchType, INCISOR_SUM_MAX_MM, INCISOR_SUM_MIN_MM, LOWER_PROFILE, UPPER_PROFILE};

/// Measurements taken from the patient's casts, in mm.
///
/// ## JSON Example
///
/// ```json
/// {
///   "incisor_sum_mm": 22.0,
///   "space_available_mm": 32.0,
///   "current_overjet_mm": 3.0,
///   "target_overjet_mm": 2.0
/// }
/// ```
///
/// The overjet fields default to zero and are ignored for the lower arch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    /// Sum of the mesiodistal widths of the four mandibular incisors
    pub incisor_sum_mm: f64,

    /// Measured space from the distal of the lateral incisor to the mesial of the first molar
    pub space_available_mm: f64,

    /// Overjet as measured
    #[serde(default)]
    pub current_overjet_mm: f64,

    /// Overjet aimed for after treatment
    #[serde(default)]
    pub target_overjet_mm: f64,
}

impl MeasurementInput {
    /// Measurements for a lower arch analysis
    pub fn lower(incisor_sum_mm: f64, space_available_mm: f64) -> Self {
        MeasurementInput {
            incisor_sum_mm,
            space_available_mm,
            current_overjet_mm: 0.0,
            target_overjet_mm: 0.0,
        }
    }

    /// Measurements for an upper arch analysis
    pub fn upper(incisor_sum_mm: f64, space_available_mm: f64, current_overjet_mm: f64, target_overjet_mm: f64) -> Self {
        MeasurementInput {
            incisor_sum_mm,
            space_available_mm,
            current_overjet_mm,
            target_overjet_mm,
        }
    }

    /// Validate against the given profile.
    ///
    /// Checks run in a fixed order and stop at the first failure. Comparisons
    /// are written so that NaN fails them.
    pub fn validate(&self, profile: &ArchProfile) -> CalcResult<()> {
        if !(INCISOR_SUM_MIN_MM..=INCISOR_SUM_MAX_MM).contains(&self.incisor_sum_mm) {
            return Err(CalcError::out_of_range(
                "incisor_sum_mm",
                self.incisor_sum_mm.to_string(),
                INCISOR_SUM_MIN_MM,
                INCISOR_SUM_MAX_MM,
            ));
        }
        if !(self.space_available_mm > 0.0) {
            return Err(CalcError::invalid_value(
                "space_available_mm",
                self.space_available_mm.to_string(),
                "Space available must be positive",
            ));
        }
        if !self.space_available_mm.is_finite() {
            return Err(CalcError::invalid_value(
                "space_available_mm",
                self.space_available_mm.to_string(),
                "Space available must be a finite length",
            ));
        }
        if profile.overjet_factor.is_some() {
            for (field, value) in [
                ("current_overjet_mm", self.current_overjet_mm),
                ("target_overjet_mm", self.target_overjet_mm),
            ] {
                if !(value >= 0.0) {
                    return Err(CalcError::invalid_value(field, value.to_string(), "Overjet values must be positive"));
                }
                if !value.is_finite() {
                    return Err(CalcError::invalid_value(field, value.to_string(), "Overjet must be a finite length"));
                }
            }
        }
        Ok(())
    }
}

/// Results of a space analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "arch": "Lower",
///   "input": { "incisor_sum_mm": 22.0, "space_available_mm": 25.0, "current_overjet_mm": 0.0, "target_overjet_mm": 0.0 },
///   "predicted_canine_mm": 6.7,
///   "predicted_premolars_mm": 10.9,
///   "total_space_required_mm": 17.6,
///   "overjet_correction_mm": null,
///   "adjusted_space_required_mm": 17.6,
///   "discrepancy_mm": 7.4,
///   "interpretation": { "category": "SignificantExcess", "summary": "Significant space excess (>2mm)", "remark": null, "advice": ["..."] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub arch: ArchType,

    /// Measurements the result was computed from
    pub input: MeasurementInput,

    /// Predicted canine width (mm)
    pub predicted_canine_mm: f64,

    /// Predicted combined premolar width (mm)
    pub predicted_premolars_mm: f64,

    /// Canine + premolars (mm)
    pub total_space_required_mm: f64,

    /// Extra space needed to reduce overjet to target (upper arch only)
    pub overjet_correction_mm: Option<f64>,

    /// Total required plus overjet correction (mm)
    pub adjusted_space_required_mm: f64,

    /// Space available minus adjusted space required (mm); negative means crowding
    pub discrepancy_mm: f64,

    pub interpretation: Interpretation,
}

/// Computed lengths are rounded to 1/SNAP_STEPS_PER_MM mm.
///
/// Far below measurement precision, and coarse enough to absorb the binary
/// rounding left by the coefficients, so a space equal to the requirement
/// gives a discrepancy of exactly zero.
pub const SNAP_STEPS_PER_MM: f64 = 1e6;

/// Round a computed length to the snapping grid, folding `-0.0` into `0.0`.
///
/// Dividing the rounded step count by an exact power of ten yields the same
/// `f64` as parsing the equivalent decimal text, so "17.9" typed by a user
/// equals a snapped requirement of 17.9.
pub fn snap_mm(value_mm: f64) -> f64 {
    let snapped = (value_mm * SNAP_STEPS_PER_MM).round() / SNAP_STEPS_PER_MM;
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}

/// Run a space analysis for one arch.
///
/// # Arguments
///
/// * `profile` - Arch profile ([`LOWER_PROFILE`] or [`UPPER_PROFILE`])
/// * `input` - Measurements
///
/// # Returns
///
/// * `Ok(AnalysisResult)` - Predictions, discrepancy and interpretation
/// * `Err(CalcError)` - First validation failure
pub fn analyze(profile: &ArchProfile, input: &MeasurementInput) -> CalcResult<AnalysisResult> {
    input.validate(profile)?;

    let predicted_canine_mm = snap_mm(profile.predict_canine(input.incisor_sum_mm));
    let predicted_premolars_mm = snap_mm(profile.predict_premolars(input.incisor_sum_mm));
    let total_space_required_mm = snap_mm(predicted_canine_mm + predicted_premolars_mm);

    // Each mm of overjet reduction takes space from the arch
    let overjet_correction_mm = profile
        .overjet_factor
        .map(|factor| snap_mm((input.current_overjet_mm - input.target_overjet_mm) * factor));
    let adjusted_space_required_mm = snap_mm(total_space_required_mm + overjet_correction_mm.unwrap_or(0.0));

    let discrepancy_mm = snap_mm(input.space_available_mm - adjusted_space_required_mm);
    let band = classify(profile, discrepancy_mm);

    tracing::debug!(
        arch = %profile.arch,
        incisor_sum_mm = input.incisor_sum_mm,
        space_available_mm = input.space_available_mm,
        discrepancy_mm,
        category = %band.category,
        "space analysis complete"
    );

    Ok(AnalysisResult {
        arch: profile.arch,
        input: *input,
        predicted_canine_mm,
        predicted_premolars_mm,
        total_space_required_mm,
        overjet_correction_mm,
        adjusted_space_required_mm,
        discrepancy_mm,
        interpretation: band.interpretation(),
    })
}

/// Lower arch analysis from raw measurements
pub fn analyze_lower(incisor_sum_mm: f64, space_available_mm: f64) -> CalcResult<AnalysisResult> {
    analyze(&LOWER_PROFILE, &MeasurementInput::lower(incisor_sum_mm, space_available_mm))
}

/// Upper arch analysis from raw measurements
pub fn analyze_upper(
    incisor_sum_mm: f64,
    space_available_mm: f64,
    current_overjet_mm: f64,
    target_overjet_mm: f64,
) -> CalcResult<AnalysisResult> {
    analyze(
        &UPPER_PROFILE,
        &MeasurementInput::upper(incisor_sum_mm, space_available_mm, current_overjet_mm, target_overjet_mm),
    )
}

impl ArchType {
    /// Run the analysis with this arch's profile
    pub fn analyze(&self, input: &MeasurementInput) -> CalcResult<AnalysisResult> {
        analyze(self.profile(), input)
    }
}

/// Parse a measurement typed by the user.
///
/// Accepts surrounding whitespace. Empty, non-numeric and non-finite text
/// ("inf", "NaN") is a [`CalcError::Parse`].
pub fn parse_measurement(field: &str, raw: &str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::parse(field, trimmed)),
    }
}
