// ============================================================================
// Fixed-Point Decimal
// Scaled decimal type with compile-time precision
// ============================================================================

use super::arithmetic::CheckedArithmetic;
use super::errors::{NumericError, NumericResult};
use super::format::NumberFormat;
use super::scaled::{self, Scale};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-point decimal number with compile-time precision.
///
/// Internally stores `value × 10^DECIMALS` as an i64. Only that mantissa is
/// stored (and serialized); the scale is part of the type.
///
/// # Type Parameter
/// - `DECIMALS`: Number of decimal places (0-18). Default is 6.
///
/// # Value Range
/// With DECIMALS=6 (default):
/// - Minimum: -9,223,372,036,854.775808
/// - Maximum: +9,223,372,036,854.775807
/// - Precision: 0.000001
///
/// # Example
/// ```
/// use checked_numerics::numeric::FixedDecimal;
///
/// let price: FixedDecimal<6> = "100".parse().unwrap();
/// let qty: FixedDecimal<6> = "2.5".parse().unwrap();
/// let total = price.checked_mul(qty).unwrap();
/// assert_eq!(total.to_string(), "250");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[repr(transparent)]
pub struct FixedDecimal<const DECIMALS: u8 = 6>(i64);

impl<const D: u8> FixedDecimal<D> {
    /// The scale of this type (fails to compile for DECIMALS > 18)
    pub const SCALING: Scale = Scale::of(D);

    /// The scale factor (10^DECIMALS)
    pub const SCALE: i64 = Self::SCALING.factor();

    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0)
    pub const ONE: Self = Self(Self::SCALE);

    /// Maximum representable value
    pub const MAX: Self = Self(i64::MAX);

    /// Minimum representable value
    pub const MIN: Self = Self(i64::MIN);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation (the mantissa).
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Create from an integer value.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the value is too large to represent.
    #[inline]
    pub fn from_integer(value: i64) -> NumericResult<Self> {
        value.try_mul(Self::SCALE).map(Self)
    }

    /// Create from integer and fractional parts.
    ///
    /// # Arguments
    /// - `integer`: The integer part (can be negative)
    /// - `fraction`: The fractional magnitude (must be < SCALE)
    ///
    /// The sign of `integer` applies to the fraction too, so `(-5, 500_000)`
    /// is -5.5. Values in `(-1, 0)` need [`FromStr`](std::str::FromStr) or
    /// `from_raw`.
    #[inline]
    pub fn from_parts(integer: i64, fraction: u64) -> NumericResult<Self> {
        if fraction >= Self::SCALE as u64 {
            return Err(NumericError::InvalidFormat);
        }

        let int_scaled = integer.try_mul(Self::SCALE)?;
        let frac_signed = if integer < 0 {
            -(fraction as i64)
        } else {
            fraction as i64
        };

        int_scaled.try_add(frac_signed).map(Self)
    }

    /// Create from an f64, truncating digits beyond the scale.
    ///
    /// # Errors
    /// - `NotFinite` for NaN or infinity
    /// - `Overflow` or `Underflow` if out of range
    #[inline]
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        scaled::scaled_from_double(value, Self::SCALING).map(Self)
    }

    /// Create from an f64, rounding to the nearest representable value.
    ///
    /// # Errors
    /// Same as [`from_f64`](Self::from_f64).
    #[inline]
    pub fn from_f64_rounded(value: f64) -> NumericResult<Self> {
        scaled::scaled_from_double_nearest(value, Self::SCALING).map(Self)
    }

    /// Parse with an explicit number format.
    ///
    /// # Errors
    /// - `InvalidFormat` for malformed text
    /// - `Overflow` or `Underflow` if out of range
    #[inline]
    pub fn parse_with(s: &str, format: &NumberFormat) -> NumericResult<Self> {
        scaled::scaled_parse(s, Self::SCALING, format).map(Self)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled).
    #[inline]
    pub const fn raw_value(self) -> i64 {
        self.0
    }

    /// Get the integer part (truncated toward zero).
    #[inline]
    pub const fn integer_part(self) -> i64 {
        self.0 / Self::SCALE
    }

    /// Get the fractional part as a positive value.
    #[inline]
    pub const fn fractional_part(self) -> u64 {
        (self.0 % Self::SCALE).unsigned_abs()
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Lossy conversion to f64.
    #[inline]
    pub fn to_f64(self) -> f64 {
        scaled::scaled_to_double(self.0, Self::SCALING)
    }

    /// Render with an explicit number format.
    pub fn to_string_with(self, format: &NumberFormat) -> String {
        scaled::scaled_to_string(self.0, Self::SCALING, format)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.try_add(rhs.0).map(Self)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.try_sub(rhs.0).map(Self)
    }

    /// Checked multiplication, truncated toward zero.
    ///
    /// The full product is formed in a 128-bit intermediate before scaling
    /// back, so only the final result is range-checked.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        scaled::scaled_multiply(self.0, rhs.0, Self::SCALING).map(Self)
    }

    /// Checked division, truncated toward zero.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Overflow` or `Underflow` if the result is out of range
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        scaled::scaled_divide(self.0, rhs.0, Self::SCALING).map(Self)
    }

    /// Multiply by an integer (no scaling needed).
    #[inline]
    pub fn checked_mul_int(self, rhs: i64) -> NumericResult<Self> {
        self.0.try_mul(rhs).map(Self)
    }

    /// # Errors
    /// Returns `Overflow` for `MIN`.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        self.0.try_neg().map(Self)
    }

    /// Get absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` for `MIN`.
    #[inline]
    pub fn abs(self) -> NumericResult<Self> {
        self.0.try_abs().map(Self)
    }

    /// Round to `dp` decimal places, half away from zero.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if rounding leaves the range.
    #[inline]
    pub fn round_dp(self, dp: u8) -> NumericResult<Self> {
        scaled::scaled_round(self.0, Self::SCALING, dp).map(Self)
    }

    /// Returns the minimum of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Returns the maximum of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

// ============================================================================
// Operators
// ============================================================================
//
// Infallible operators panic on failure, like `Checked<T>`.
// Use the checked_* methods to handle errors.

macro_rules! impl_fixed_op {
    ($($op:ident :: $method:ident => $checked:ident),*) => {$(
        impl<const D: u8> $op for FixedDecimal<D> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self::Output {
                match self.$checked(rhs) {
                    Ok(value) => value,
                    Err(err) => panic!("FixedDecimal {}: {}", stringify!($method), err),
                }
            }
        }
    )*};
}

impl_fixed_op!(
    Add::add => checked_add,
    Sub::sub => checked_sub,
    Mul::mul => checked_mul,
    Div::div => checked_div
);

impl<const D: u8> Neg for FixedDecimal<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        match self.checked_neg() {
            Ok(value) => value,
            Err(err) => panic!("FixedDecimal neg: {}", err),
        }
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<const D: u8> fmt::Debug for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedDecimal<{}>({}, raw={})", D, self, self.0)
    }
}

/// Trailing zeros are trimmed; `{:.N}` writes exactly N fractional digits
/// (truncating). Width, fill, alignment and `+` behave as for integers.
impl<const D: u8> fmt::Display for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::with_capacity(24);
        scaled::write_scaled(
            &mut text,
            self.0,
            Self::SCALING,
            &NumberFormat::invariant(),
            f.precision(),
        )?;
        match text.strip_prefix('-') {
            Some(digits) => f.pad_integral(false, "", digits),
            None => f.pad_integral(true, "", &text),
        }
    }
}

impl<const D: u8> PartialOrd<i64> for FixedDecimal<D> {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(match Self::from_integer(*other) {
            Ok(scaled) => self.0.cmp(&scaled.0),
            // `other` lies beyond the representable range
            Err(_) if *other > 0 => Ordering::Less,
            Err(_) => Ordering::Greater,
        })
    }
}

impl<const D: u8> PartialEq<i64> for FixedDecimal<D> {
    fn eq(&self, other: &i64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl<const D: u8> FixedDecimal<D> {
    /// Convert from rust_decimal::Decimal.
    ///
    /// This is intended for API boundaries only (parsing user input).
    ///
    /// # Errors
    /// - `PrecisionLoss` if `d` has non-zero digits beyond DECIMALS
    /// - `Overflow` or `Underflow` if the value is too large
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        use rust_decimal::prelude::ToPrimitive;

        let overflow = if d.is_sign_negative() {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        };

        let scaled = d
            .checked_mul(rust_decimal::Decimal::from(Self::SCALE))
            .ok_or(overflow)?;
        if !scaled.fract().is_zero() {
            return Err(NumericError::PrecisionLoss);
        }

        scaled.to_i64().map(Self).ok_or(overflow)
    }

    /// Convert to rust_decimal::Decimal (exact).
    pub fn to_decimal(self) -> rust_decimal::Decimal {
        rust_decimal::Decimal::new(self.0, D as u32)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl<const D: u8> std::str::FromStr for FixedDecimal<D> {
    type Err = NumericError;

    /// Parse from a decimal string with the invariant format.
    ///
    /// Digits beyond DECIMALS are truncated.
    ///
    /// # Examples
    /// - "123" -> 123
    /// - "123.456" -> 123.456
    /// - "-0.001" -> -0.001
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &NumberFormat::invariant())
    }
}

impl<const D: u8> From<FixedDecimal<D>> for f64 {
    #[inline]
    fn from(value: FixedDecimal<D>) -> Self {
        value.to_f64()
    }
}

// ============================================================================
// Type Aliases for Common Use Cases
// ============================================================================

/// Six decimal places, the default scale of 1,000,000
pub type Micros = FixedDecimal<6>;

/// Two decimal places, e.g. currency amounts
pub type Cents = FixedDecimal<2>;

/// Nine decimal places
pub type Nanos = FixedDecimal<9>;

// ============================================================================
// Tests
// ============================================================================
