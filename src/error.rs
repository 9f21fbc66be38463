//! Error types for calculator inputs
//!
//! Every calculator validates its inputs before doing any arithmetic, so a
//! degenerate input surfaces here instead of as a NaN or Infinity in a result.

use thiserror::Error;

/// Result alias used by every calculator
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised by the calculators
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Input is non-finite, negative where disallowed, or outside its domain
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// A formula would divide by zero
    #[error("Undefined: zero denominator in '{field}'")]
    ZeroDenominator { field: String },

    /// IRR/XIRR needs an outlay plus at least one return
    #[error("Insufficient cash flows: need at least {required}, got {actual}")]
    InsufficientCashFlows { required: usize, actual: usize },

    /// Valuation multiple table has no entry for the pair
    #[error("No multiple for industry '{industry}' and metric '{metric}'")]
    UnknownMultiple { industry: String, metric: String },

    /// Multiple table could not be read
    #[error("Failed to load multiple table: {0}")]
    TableLoad(String),
}

impl CalcError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn zero_denominator(field: &str) -> Self {
        Self::ZeroDenominator {
            field: field.to_string(),
        }
    }
}

impl From<csv::Error> for CalcError {
    fn from(err: csv::Error) -> Self {
        CalcError::TableLoad(err.to_string())
    }
}

impl From<std::io::Error> for CalcError {
    fn from(err: std::io::Error) -> Self {
        CalcError::TableLoad(err.to_string())
    }
}

/// Reject NaN and infinities
pub fn ensure_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, "must be a finite number"))
    }
}

/// Reject negative (and non-finite) values
pub fn ensure_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(value)
}

/// Reject values that would be used as a divisor when they are zero
pub fn ensure_denominator(field: &str, value: f64) -> CalcResult<f64> {
    ensure_non_negative(field, value)?;
    if value == 0.0 {
        return Err(CalcError::zero_denominator(field));
    }
    Ok(value)
}

/// Reject zero counts of periods, years or months
pub fn ensure_periods(field: &str, value: u32) -> CalcResult<u32> {
    if value == 0 {
        return Err(CalcError::invalid_input(field, "must be at least 1"));
    }
    Ok(value)
}

/// `count` units of `per_unit` periods each, e.g. months in a span of years
pub fn checked_periods(field: &str, count: u32, per_unit: u32) -> CalcResult<u32> {
    count.checked_mul(per_unit).ok_or_else(|| {
        CalcError::invalid_input(
            field,
            format!("{} x {} periods is out of range", count, per_unit),
        )
    })
}
