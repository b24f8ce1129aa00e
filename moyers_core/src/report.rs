//! # Report Rendering
//!
//! Turns an [`AnalysisResult`] into the text a clinician reads, or into a
//! timestamped JSON envelope for other tools.
//!
//! ## Example
//!
//! ```rust
//! use moyers_core::{analyze_lower, render_text};
//!
//! let result = analyze_lower(22.0, 25.0).unwrap();
//! let text = render_text(&result);
//! assert!(text.contains("- Discrepancy: 7.4 mm"));
//! ```

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::profile::ArchType;
use crate::reference_table::{row_for, ReferenceTableRow};

/// Static educational content shown by "About Moyer's Analysis".
pub const ABOUT_TEXT: &str = "\
MOYER'S MIXED DENTITION ANALYSIS

Advantages:
- Minimal systematic error
- High reliability
- Not time-consuming
- No radiographs or special equipment required
- Can be done even in mouth with reasonable accuracy
- Applicable to both arches

Why mandibular incisors?
- Erupt early during mixed dentition
- Can be measured easily and accurately
- Less variable in shape and size

Procedure in lower arch:
1. Measure M-D width of lower permanent incisors
2. Calculate space needed for their alignment
3. Measure space available on the cast
4. Use prediction table (75% level) to estimate space required

Procedure in upper arch:
1. Use different probability chart for maxillary teeth
2. Make allowance for overjet correction when measuring space requirements
";

/// Caption for an arch's reference table
pub fn reference_table_title(arch: ArchType) -> &'static str {
    match arch {
        ArchType::Lower => "Moyer's Prediction Table (75% probability level)",
        ArchType::Upper => "Moyer's Prediction Table for Maxillary Teeth (75% probability level)",
    }
}

/// Render the human-readable analysis block.
///
/// All lengths are printed to one decimal place. Overjet lines appear only
/// when the result carries an overjet correction.
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_text(&mut out, result);
    out
}

fn write_text(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    writeln!(out, "Analysis Results:")?;
    writeln!(out, "- Sum of mandibular incisors: {:.1} mm", result.input.incisor_sum_mm)?;
    writeln!(out, "- Predicted canine width: {:.1} mm", result.predicted_canine_mm)?;
    writeln!(out, "- Predicted premolars width: {:.1} mm", result.predicted_premolars_mm)?;
    writeln!(out, "- Total predicted space required: {:.1} mm", result.total_space_required_mm)?;
    if let Some(correction) = result.overjet_correction_mm {
        writeln!(out, "- Overjet correction space: {:.1} mm", correction)?;
        writeln!(out, "- Adjusted space required: {:.1} mm", result.adjusted_space_required_mm)?;
    }
    writeln!(out, "- Space available: {:.1} mm", result.input.space_available_mm)?;
    writeln!(out, "- Discrepancy: {:.1} mm", result.discrepancy_mm)?;
    writeln!(out)?;

    let interp = &result.interpretation;
    if interp.advice.is_empty() {
        match &interp.remark {
            Some(remark) => writeln!(out, "Interpretation: {}. {}", interp.summary, remark)?,
            None => writeln!(out, "Interpretation: {}.", interp.summary)?,
        }
    } else {
        writeln!(out, "Interpretation: {}. Consider:", interp.summary)?;
        for line in &interp.advice {
            writeln!(out, "- {}", line)?;
        }
    }
    Ok(())
}

/// Timestamped result for JSON output.
///
/// ## JSON Example
///
/// ```json
/// {
///   "generated": "2025-01-15T10:30:00Z",
///   "result": { "arch": "Lower", "discrepancy_mm": 7.4, "...": "..." },
///   "reference_row": { "sum_of_incisors_mm": 22.0, "canine_mm": 6.7, "premolars_mm": 10.9 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated: DateTime<Utc>,
    pub result: AnalysisResult,
    /// Table row nearest the measured incisor sum, for comparison
    pub reference_row: Option<ReferenceTableRow>,
}

impl AnalysisReport {
    /// Wrap a result, stamped with the current time
    pub fn new(result: AnalysisResult) -> Self {
        Self::at(result, Utc::now())
    }

    /// Wrap a result with an explicit timestamp
    pub fn at(result: AnalysisResult, generated: DateTime<Utc>) -> Self {
        let reference_row = row_for(result.arch, result.input.incisor_sum_mm).copied();
        AnalysisReport {
            generated,
            result,
            reference_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_lower, analyze_upper};
    use chrono::TimeZone;

    #[test]
    fn test_render_lower() {
        let text = render_text(&analyze_lower(22.0, 25.0).unwrap());
        let expected = "\
Analysis Results:
- Sum of mandibular incisors: 22.0 mm
- Predicted canine width: 6.7 mm
- Predicted premolars width: 10.9 mm
- Total predicted space required: 17.6 mm
- Space available: 25.0 mm
- Discrepancy: 7.4 mm

Interpretation: Significant space excess (>2mm). Consider:
- Monitoring for spacing issues
- Possible prosthetic replacement if excessive
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_upper_includes_overjet() {
        let text = render_text(&analyze_upper(22.0, 32.0, 3.0, 2.0).unwrap());
        assert!(text.contains("- Overjet correction space: 2.0 mm\n"));
        assert!(text.contains("- Adjusted space required: 20.8 mm\n"));
        assert!(text.contains("- Discrepancy: 11.2 mm\n"));
        assert!(text.contains("- Mesial movement of posterior teeth if needed\n"));
    }

    #[test]
    fn test_render_remark_bands() {
        let text = render_text(&analyze_lower(20.0, 17.0).unwrap());
        assert!(text.ends_with("Interpretation: Perfect space match. Ideal situation.\n"));

        let text = render_text(&analyze_lower(20.0, 18.0).unwrap());
        assert!(text.ends_with("Interpretation: Mild space excess (0-2mm). Usually acceptable.\n"));
    }

    #[test]
    fn test_render_exact_space_shows_unsigned_zero() {
        let text = render_text(&analyze_lower(23.0, 17.9).unwrap());
        assert!(text.contains("- Total predicted space required: 17.9 mm\n"));
        assert!(text.contains("- Discrepancy: 0.0 mm\n"));
        assert!(text.ends_with("Interpretation: Perfect space match. Ideal situation.\n"));

        let text = render_text(&analyze_upper(23.0, 21.2, 3.0, 2.0).unwrap());
        assert!(text.contains("- Discrepancy: 0.0 mm\n"));
        assert!(text.contains("Perfect space match"));
    }

    #[test]
    fn test_report_json() {
        let generated = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        let report = AnalysisReport::at(analyze_lower(22.0, 25.0).unwrap(), generated);
        assert_eq!(report.reference_row.unwrap().sum_of_incisors_mm, 22.0);

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"generated\": \"2025-01-15T10:30:00"));
        assert!(json.contains("\"category\": \"SignificantExcess\""));

        let roundtrip: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.generated, generated);
        assert_eq!(roundtrip.result.arch, ArchType::Lower);
        assert_eq!(roundtrip.result.interpretation, report.result.interpretation);
    }

    #[test]
    fn test_about_text() {
        assert!(ABOUT_TEXT.starts_with("MOYER'S MIXED DENTITION ANALYSIS\n"));
        assert!(ABOUT_TEXT.contains("Make allowance for overjet correction"));
        assert!(reference_table_title(ArchType::Upper).contains("Maxillary"));
    }
}
