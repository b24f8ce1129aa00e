//! # moyers_core - Mixed Dentition Space Analysis Engine
//!
//! `moyers_core` is the computational heart of the Moyers analysis tool. It
//! predicts the combined mesiodistal width of the unerupted canine and
//! premolars from the sum of the mandibular incisors, compares it to the
//! space available in the arch, and classifies the resulting discrepancy.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Data, not branches**: Arch differences live in static profiles
//!
//! ## Quick Start
//!
//! ```rust
//! use moyers_core::{analyze_lower, SpaceCategory};
//!
//! let result = analyze_lower(22.0, 25.0).unwrap();
//! assert!((result.discrepancy_mm - 7.4).abs() < 1e-9);
//! assert_eq!(result.interpretation.category, SpaceCategory::SignificantExcess);
//! ```
//!
//! ## Modules
//!
//! - [`analysis`] - Input validation and the space analysis itself
//! - [`profile`] - Per-arch prediction coefficients and bands
//! - [`interpretation`] - Discrepancy bands and clinical advice
//! - [`reference_table`] - Static 75% probability prediction tables
//! - [`report`] - Text and JSON report rendering
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod errors;
pub mod interpretation;
pub mod profile;
pub mod reference_table;
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use analysis::{analyze, analyze_lower, analyze_upper, parse_measurement, AnalysisResult, MeasurementInput};
pub use errors::{CalcError, CalcResult};
pub use interpretation::{classify, BandBound, BandTable, DiscrepancyBand, Interpretation, SpaceCategory};
pub use profile::{ArchProfile, ArchType, LinearPrediction, LOWER_PROFILE, UPPER_PROFILE};
pub use reference_table::ReferenceTableRow;
pub use report::{render_text, AnalysisReport, ABOUT_TEXT};
