// ============================================================================
// Numeric Errors
// Error kinds reported by checked arithmetic, conversion and scaled decimals
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The representable bound a value went past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bound {
    /// Below the minimum value of the destination
    Min,
    /// Above the maximum value of the destination
    Max,
}

/// Errors that can occur during checked numeric operations.
///
/// The core never recovers from any of these: it reports them and leaves
/// the response (propagate or saturate) to the caller's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the maximum value of the operand width
    Overflow,
    /// Result below the minimum value of the operand width
    Underflow,
    /// Attempted division or remainder by zero
    DivisionByZero,
    /// Conversion source cannot be represented in the destination type
    OutOfRange(Bound),
    /// NaN or infinity where a finite value is required
    NotFinite,
    /// Input string does not match the decimal grammar
    InvalidFormat,
    /// Negative exponent passed to integer power
    InvalidExponent,
    /// Scale is not a power of ten in `10^0..=10^18`
    InvalidScale,
    /// Conversion would lose significant digits
    PrecisionLoss,
}

impl NumericError {
    /// The bound a saturating caller clamps to for this error, if any.
    ///
    /// `DivisionByZero` and the format/argument errors have no bound.
    #[inline]
    pub const fn saturation_bound(self) -> Option<Bound> {
        match self {
            NumericError::Overflow => Some(Bound::Max),
            NumericError::Underflow => Some(Bound::Min),
            NumericError::OutOfRange(bound) => Some(bound),
            _ => None,
        }
    }

    /// Whether this is one of the range-violation kinds.
    #[inline]
    pub const fn is_range_error(self) -> bool {
        self.saturation_bound().is_some()
    }

    /// Arithmetic error for a result that went past `bound`.
    #[inline]
    pub(crate) const fn overflow_past(bound: Bound) -> Self {
        match bound {
            Bound::Max => NumericError::Overflow,
            Bound::Min => NumericError::Underflow,
        }
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::OutOfRange(Bound::Max) => {
                write!(f, "value out of range: above destination maximum")
            },
            NumericError::OutOfRange(Bound::Min) => {
                write!(f, "value out of range: below destination minimum")
            },
            NumericError::NotFinite => write!(f, "value is not finite (NaN or infinity)"),
            NumericError::InvalidFormat => {
                write!(f, "invalid format: input is not a decimal number")
            },
            NumericError::InvalidExponent => {
                write!(f, "invalid exponent: integer power requires exponent >= 0")
            },
            NumericError::InvalidScale => {
                write!(f, "invalid scale: expected a power of ten up to 10^18")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::OutOfRange(Bound::Min).to_string(),
            "value out of range: below destination minimum"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::Underflow);
        assert_ne!(NumericError::NotFinite, NumericError::OutOfRange(Bound::Max));
    }

    #[test]
    fn test_saturation_bound() {
        assert_eq!(NumericError::Overflow.saturation_bound(), Some(Bound::Max));
        assert_eq!(NumericError::Underflow.saturation_bound(), Some(Bound::Min));
        assert_eq!(
            NumericError::OutOfRange(Bound::Min).saturation_bound(),
            Some(Bound::Min)
        );
        assert_eq!(NumericError::DivisionByZero.saturation_bound(), None);
        assert!(!NumericError::InvalidFormat.is_range_error());
    }
}
