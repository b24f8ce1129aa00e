//! # Error Types
//!
//! Structured error types for moyers_core. Every error here is local and
//! user-correctable: the caller shows a message and lets the clinician
//! re-enter the measurement.
//!
//! ## Example
//!
//! ```rust
//! use moyers_core::errors::{CalcError, CalcResult};
//!
//! fn validate_space(space_mm: f64) -> CalcResult<()> {
//!     if space_mm <= 0.0 {
//!         return Err(CalcError::invalid_value(
//!             "space_available_mm",
//!             space_mm.to_string(),
//!             "Space available must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for moyers_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Input text is not a valid number
    #[error("Invalid number for '{field}': '{value}'")]
    Parse { field: String, value: String },

    /// Value lies outside the accepted clinical range
    #[error("Out of range for '{field}': {value} (expected {min}-{max} mm)")]
    OutOfRange {
        field: String,
        value: String,
        min: f64,
        max: f64,
    },

    /// Value is numeric and in range but not acceptable (non-positive space, negative overjet)
    #[error("Invalid value for '{field}': {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl CalcError {
    /// Create a Parse error
    pub fn parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::Parse {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(field: impl Into<String>, value: impl Into<String>, min: f64, max: f64) -> Self {
        CalcError::OutOfRange {
            field: field.into(),
            value: value.into(),
            min,
            max,
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the input field that caused the error
    pub fn field(&self) -> &str {
        match self {
            CalcError::Parse { field, .. }
            | CalcError::OutOfRange { field, .. }
            | CalcError::InvalidValue { field, .. } => field,
        }
    }

    /// Every error is fixed by re-entering the value.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Parse { .. } => "PARSE_ERROR",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::InvalidValue { .. } => "INVALID_VALUE",
        }
    }

    /// Message suitable for an error dialog or prompt.
    ///
    /// Parse failures all collapse to one generic message, whichever field
    /// they came from.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::Parse { .. } => "Please enter valid numerical values".to_string(),
            CalcError::OutOfRange { min, max, .. } => {
                format!("Sum of mandibular incisors should be between {min}-{max}mm")
            }
            CalcError::InvalidValue { reason, .. } => reason.clone(),
        }
    }
}
