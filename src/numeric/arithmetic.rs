// ============================================================================
// Checked Arithmetic
// Overflow-detecting integer operations for every supported width
// ============================================================================
//
// Widths up to 32 bits compute in i64 and narrow through the shared
// `IntKind` range check. The 64-bit types have no wider native domain here,
// so they detect overflow with pre-checks instead.
//
// Detection is policy-free: every operation returns a `NumericResult`.
// Whether an error propagates or saturates is decided by the caller
// (see `policy`).

use super::convert::{PrimInt, WideInt};
use super::errors::{NumericError, NumericResult};

/// Overflow-checked integer arithmetic.
///
/// Range violations report `Overflow` when the true result is above
/// `MAX` and `Underflow` when it is below `MIN`.
pub trait CheckedArithmetic: PrimInt {
    fn try_add(self, rhs: Self) -> NumericResult<Self>;

    fn try_sub(self, rhs: Self) -> NumericResult<Self>;

    fn try_mul(self, rhs: Self) -> NumericResult<Self>;

    /// Truncating division.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs == 0`
    /// - `Overflow` for `MIN / -1`
    fn try_div(self, rhs: Self) -> NumericResult<Self>;

    /// Remainder with the sign of the dividend; `MIN % -1 == 0`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs == 0`.
    fn try_rem(self, rhs: Self) -> NumericResult<Self>;

    /// # Errors
    /// `Overflow` for signed `MIN`, `Underflow` for any non-zero unsigned value.
    fn try_neg(self) -> NumericResult<Self>;

    /// Integer power by repeated checked multiplication.
    ///
    /// `x^0 == 1` for every `x`, including zero.
    ///
    /// # Errors
    /// - `InvalidExponent` if `exponent < 0`
    /// - `Overflow`/`Underflow` by the sign of the true result
    fn try_pow(self, exponent: Self) -> NumericResult<Self> {
        if exponent.is_negative() {
            return Err(NumericError::InvalidExponent);
        }
        let exp = exponent.to_wide().magnitude();
        if exp == 0 {
            return Ok(Self::ONE);
        }
        if self == Self::ZERO || self == Self::ONE {
            return Ok(self);
        }

        let negative_result = self.is_negative() && exp % 2 == 1;
        if self.to_wide() == WideInt::from_i64(-1) {
            return Ok(if negative_result { self } else { Self::ONE });
        }

        // |base| >= 2: overflows within 64 steps for any width
        let past_bound = if negative_result {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        };
        let mut acc = self;
        for _ in 1..exp {
            acc = acc.try_mul(self).map_err(|_| past_bound)?;
        }
        Ok(acc)
    }

    /// # Errors
    /// Returns `Overflow` for signed `MIN`.
    #[inline]
    fn try_abs(self) -> NumericResult<Self> {
        if self.is_negative() {
            self.try_neg()
        } else {
            Ok(self)
        }
    }
}

/// Narrow an i64 intermediate to `T`, reporting the crossed bound.
#[inline]
fn narrow<T: PrimInt>(wide: i64) -> NumericResult<T> {
    T::from_wide(WideInt::from_i64(wide)).map_err(NumericError::overflow_past)
}

macro_rules! impl_checked_narrow {
    ($($t:ty),*) => {$(
        impl CheckedArithmetic for $t {
            #[inline]
            fn try_add(self, rhs: Self) -> NumericResult<Self> {
                narrow(self as i64 + rhs as i64)
            }

            #[inline]
            fn try_sub(self, rhs: Self) -> NumericResult<Self> {
                narrow(self as i64 - rhs as i64)
            }

            #[inline]
            fn try_mul(self, rhs: Self) -> NumericResult<Self> {
                // u32 products exceed i64; magnitudes of 32-bit operands fit u64
                let (a, b) = (self.to_wide(), rhs.to_wide());
                let product = WideInt::new(
                    a.is_negative() != b.is_negative(),
                    a.magnitude() * b.magnitude(),
                );
                <$t>::from_wide(product).map_err(NumericError::overflow_past)
            }

            #[inline]
            fn try_div(self, rhs: Self) -> NumericResult<Self> {
                if rhs == 0 {
                    return Err(NumericError::DivisionByZero);
                }
                narrow(self as i64 / rhs as i64)
            }

            #[inline]
            fn try_rem(self, rhs: Self) -> NumericResult<Self> {
                if rhs == 0 {
                    return Err(NumericError::DivisionByZero);
                }
                narrow(self as i64 % rhs as i64)
            }

            #[inline]
            fn try_neg(self) -> NumericResult<Self> {
                narrow(-(self as i64))
            }
        }
    )*};
}

impl_checked_narrow!(i8, i16, i32, u8, u16, u32);

impl CheckedArithmetic for i64 {
    #[inline]
    fn try_add(self, rhs: Self) -> NumericResult<Self> {
        match self.overflowing_add(rhs) {
            (sum, false) => Ok(sum),
            _ if rhs > 0 => Err(NumericError::Overflow),
            _ => Err(NumericError::Underflow),
        }
    }

    #[inline]
    fn try_sub(self, rhs: Self) -> NumericResult<Self> {
        match self.overflowing_sub(rhs) {
            (diff, false) => Ok(diff),
            _ if rhs < 0 => Err(NumericError::Overflow),
            _ => Err(NumericError::Underflow),
        }
    }

    #[inline]
    fn try_mul(self, rhs: Self) -> NumericResult<Self> {
        if self == 0 || rhs == 0 {
            return Ok(0);
        }
        // `product / -1` would itself overflow for MIN
        if self == -1 {
            return rhs.try_neg();
        }
        let product = self.wrapping_mul(rhs);
        if product / self != rhs {
            return Err(if (self < 0) != (rhs < 0) {
                NumericError::Underflow
            } else {
                NumericError::Overflow
            });
        }
        Ok(product)
    }

    #[inline]
    fn try_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs == 0 {
            return Err(NumericError::DivisionByZero);
        }
        if self == i64::MIN && rhs == -1 {
            return Err(NumericError::Overflow);
        }
        Ok(self / rhs)
    }

    #[inline]
    fn try_rem(self, rhs: Self) -> NumericResult<Self> {
        match rhs {
            0 => Err(NumericError::DivisionByZero),
            -1 => Ok(0),
            _ => Ok(self % rhs),
        }
    }

    #[inline]
    fn try_neg(self) -> NumericResult<Self> {
        if self == i64::MIN {
            Err(NumericError::Overflow)
        } else {
            Ok(-self)
        }
    }
}

impl CheckedArithmetic for u64 {
    #[inline]
    fn try_add(self, rhs: Self) -> NumericResult<Self> {
        match self.overflowing_add(rhs) {
            (sum, false) => Ok(sum),
            _ => Err(NumericError::Overflow),
        }
    }

    #[inline]
    fn try_sub(self, rhs: Self) -> NumericResult<Self> {
        if rhs > self {
            Err(NumericError::Underflow)
        } else {
            Ok(self - rhs)
        }
    }

    #[inline]
    fn try_mul(self, rhs: Self) -> NumericResult<Self> {
        if self == 0 {
            return Ok(0);
        }
        if rhs > u64::MAX / self {
            return Err(NumericError::Overflow);
        }
        Ok(self * rhs)
    }

    #[inline]
    fn try_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs == 0 {
            return Err(NumericError::DivisionByZero);
        }
        Ok(self / rhs)
    }

    #[inline]
    fn try_rem(self, rhs: Self) -> NumericResult<Self> {
        if rhs == 0 {
            return Err(NumericError::DivisionByZero);
        }
        Ok(self % rhs)
    }

    #[inline]
    fn try_neg(self) -> NumericResult<Self> {
        if self == 0 {
            Ok(0)
        } else {
            Err(NumericError::Underflow)
        }
    }
}

// ============================================================================
// Free Functions
// ============================================================================

#[inline]
pub fn add<T: CheckedArithmetic>(a: T, b: T) -> NumericResult<T> {
    a.try_add(b)
}

#[inline]
pub fn subtract<T: CheckedArithmetic>(a: T, b: T) -> NumericResult<T> {
    a.try_sub(b)
}

#[inline]
pub fn multiply<T: CheckedArithmetic>(a: T, b: T) -> NumericResult<T> {
    a.try_mul(b)
}

#[inline]
pub fn divide<T: CheckedArithmetic>(a: T, b: T) -> NumericResult<T> {
    a.try_div(b)
}

#[inline]
pub fn remainder<T: CheckedArithmetic>(a: T, b: T) -> NumericResult<T> {
    a.try_rem(b)
}

#[inline]
pub fn pow<T: CheckedArithmetic>(a: T, exponent: T) -> NumericResult<T> {
    a.try_pow(exponent)
}

#[inline]
pub fn negate<T: CheckedArithmetic>(a: T) -> NumericResult<T> {
    a.try_neg()
}

#[inline]
pub fn abs<T: CheckedArithmetic>(a: T) -> NumericResult<T> {
    a.try_abs()
}
