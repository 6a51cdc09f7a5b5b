// ============================================================================
// Overflow Policy
// Checked (propagate) and clamped (saturate) responses to detected failures
// ============================================================================

use super::convert::Numeric;
use super::errors::NumericResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a caller responds to a range or divide-by-zero failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Surface the error to the caller
    #[default]
    Checked,
    /// Saturate to MIN/MAX; divide-by-zero and other undefined results become zero
    Clamped,
}

impl OverflowPolicy {
    /// Apply this policy to a detection result.
    ///
    /// Under `Clamped` the result is always `Ok`.
    #[inline]
    pub fn apply<T: Numeric>(self, result: NumericResult<T>) -> NumericResult<T> {
        match self {
            OverflowPolicy::Checked => result,
            OverflowPolicy::Clamped => Ok(clamp(result)),
        }
    }
}

/// Clamped-policy adapter.
///
/// Range errors saturate to the crossed bound. Every other error
/// (division by zero, NaN, negative exponent) yields zero.
#[inline]
pub fn clamp<T: Numeric>(result: NumericResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::trace!(error = %err, "saturating numeric result");
            match err.saturation_bound() {
                Some(bound) => T::saturated(bound),
                None => T::zero(),
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::arithmetic::{add, divide, multiply, pow, subtract};
    use crate::numeric::errors::NumericError;

    #[test]
    fn test_clamp_saturates_by_direction() {
        assert_eq!(clamp(add(i8::MAX, 1)), i8::MAX);
        assert_eq!(clamp(subtract(i8::MIN, 1)), i8::MIN);
        assert_eq!(clamp(multiply(30000i16, 3)), i16::MAX);
        assert_eq!(clamp(multiply(30000i16, -3)), i16::MIN);
        assert_eq!(clamp(subtract(0u64, 1)), 0);
        assert_eq!(clamp(divide(i64::MIN, -1)), i64::MAX);
    }

    #[test]
    fn test_clamp_divide_by_zero_is_zero() {
        assert_eq!(clamp(divide(42i32, 0)), 0);
        assert_eq!(clamp(pow(2i32, -1)), 0);
    }

    #[test]
    fn test_policy_apply() {
        let overflow = add(u8::MAX, 1);
        assert_eq!(
            OverflowPolicy::Checked.apply(overflow),
            Err(NumericError::Overflow)
        );
        assert_eq!(OverflowPolicy::Clamped.apply(overflow), Ok(u8::MAX));
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Checked);
    }
}
