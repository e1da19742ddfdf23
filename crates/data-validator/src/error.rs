//! Validation Error Types

use thiserror::Error;

/// Errors raised while turning user input into a stat line.
///
/// All variants are recoverable: the caller should ask the user to correct
/// the offending field and resubmit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value could not be parsed as a number
    #[error("{field} must be a number, got {value:?}")]
    Parse { field: &'static str, value: String },

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Inputs are individually valid but a derived feature overflows
    #[error("{0} overflows for these inputs; use realistic per-game values")]
    NonFiniteFeature(&'static str),
}

impl ValidationError {
    /// Wire key of the field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Parse { field, .. } => field,
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::MissingField(field) => field,
            ValidationError::NonFiniteFeature(feature) => feature,
        }
    }
}
