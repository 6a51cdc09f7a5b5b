// ============================================================================
// Checked Conversion
// Range-checked conversion between integer widths and floating types
// ============================================================================
//
// Every supported integer value fits in a sign-magnitude `WideInt`
// (i64 ∪ u64), so one range check parameterized by `IntKind` covers all
// narrowing paths. Conversions compute into that temporary and only
// narrow once the check has passed.
//
// Integer -> float is the one lossy path: large 64-bit values round to the
// nearest representable float, exactly like an `as` cast.

use super::errors::{Bound, NumericError, NumericResult};
use super::policy;
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod sealed {
    pub trait Sealed {}
}

// ============================================================================
// Width Descriptor
// ============================================================================

/// Bit width and signedness of an integer representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntKind {
    pub bits: u32,
    pub signed: bool,
}

impl IntKind {
    pub const I8: Self = Self::new(8, true);
    pub const I16: Self = Self::new(16, true);
    pub const I32: Self = Self::new(32, true);
    pub const I64: Self = Self::new(64, true);
    pub const U8: Self = Self::new(8, false);
    pub const U16: Self = Self::new(16, false);
    pub const U32: Self = Self::new(32, false);
    pub const U64: Self = Self::new(64, false);

    #[inline]
    pub const fn new(bits: u32, signed: bool) -> Self {
        Self { bits, signed }
    }

    /// Largest representable value, as u64.
    #[inline]
    pub const fn max_u64(self) -> u64 {
        if self.signed {
            (1u64 << (self.bits - 1)) - 1
        } else if self.bits == 64 {
            u64::MAX
        } else {
            (1u64 << self.bits) - 1
        }
    }

    /// Magnitude of the smallest representable value (0 for unsigned).
    #[inline]
    pub const fn min_magnitude(self) -> u64 {
        if self.signed {
            1u64 << (self.bits - 1)
        } else {
            0
        }
    }

    /// Smallest representable value, as i64.
    #[inline]
    pub const fn min_i64(self) -> i64 {
        if self.signed {
            (self.min_magnitude() as i64).wrapping_neg()
        } else {
            0
        }
    }

    /// Range check of an i64 intermediate against this width.
    #[inline]
    pub const fn check_i64(self, value: i64) -> Result<(), Bound> {
        if value < self.min_i64() {
            Err(Bound::Min)
        } else if value >= 0 && value as u64 > self.max_u64() {
            Err(Bound::Max)
        } else {
            Ok(())
        }
    }

    /// Range check of a sign-magnitude value against this width.
    #[inline]
    pub const fn check(self, value: WideInt) -> Result<(), Bound> {
        if value.negative {
            if value.magnitude > self.min_magnitude() {
                return Err(Bound::Min);
            }
        } else if value.magnitude > self.max_u64() {
            return Err(Bound::Max);
        }
        Ok(())
    }
}

impl fmt::Display for IntKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.signed { 'i' } else { 'u' }, self.bits)
    }
}

// ============================================================================
// Sign-Magnitude Intermediate
// ============================================================================

/// Sign-magnitude integer covering every value of i64 and u64.
///
/// Zero is always non-negative, so equal values compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WideInt {
    negative: bool,
    magnitude: u64,
}

impl WideInt {
    pub const ZERO: Self = Self {
        negative: false,
        magnitude: 0,
    };

    #[inline]
    pub const fn new(negative: bool, magnitude: u64) -> Self {
        Self {
            negative: negative && magnitude != 0,
            magnitude,
        }
    }

    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        Self::new(value < 0, value.unsigned_abs())
    }

    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self::new(false, value)
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.negative
    }

    #[inline]
    pub const fn magnitude(self) -> u64 {
        self.magnitude
    }

    /// Narrow to i64, reporting which bound was crossed.
    #[inline]
    pub const fn to_i64(self) -> Result<i64, Bound> {
        match IntKind::I64.check(self) {
            Ok(()) if self.negative => Ok((self.magnitude as i64).wrapping_neg()),
            Ok(()) => Ok(self.magnitude as i64),
            Err(bound) => Err(bound),
        }
    }
}

// ============================================================================
// Primitive Traits
// ============================================================================

/// A fixed-width primitive integer (i8..i64, u8..u64).
pub trait PrimInt:
    Copy + Eq + Ord + Hash + Default + fmt::Debug + fmt::Display + Send + Sync + 'static + sealed::Sealed
{
    const KIND: IntKind;
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;
    const ONE: Self;

    fn to_wide(self) -> WideInt;

    /// Narrow from the wide intermediate, failing with the crossed bound.
    fn from_wide(value: WideInt) -> Result<Self, Bound>;

    #[inline]
    fn is_negative(self) -> bool {
        self.to_wide().is_negative()
    }
}

/// A binary floating-point primitive (f32, f64).
pub trait PrimFloat:
    Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static + sealed::Sealed
{
    const MAX: Self;
    const MIN: Self;

    fn to_f64(self) -> f64;

    /// Native `as` cast from f64 (rounds to nearest, overflows to infinity).
    fn from_f64_lossy(value: f64) -> Self;

    /// Native `as` cast from an integer; may round for large magnitudes.
    fn from_wide_lossy(value: WideInt) -> Self;
}

macro_rules! impl_prim_int {
    (signed: $($t:ty => $kind:expr),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl PrimInt for $t {
            const KIND: IntKind = $kind;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn to_wide(self) -> WideInt {
                WideInt::from_i64(self as i64)
            }

            #[inline]
            fn from_wide(value: WideInt) -> Result<Self, Bound> {
                Self::KIND.check(value)?;
                let v = if value.negative {
                    (value.magnitude as i64).wrapping_neg()
                } else {
                    value.magnitude as i64
                };
                Ok(v as $t)
            }
        }
    )*};
    (unsigned: $($t:ty => $kind:expr),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl PrimInt for $t {
            const KIND: IntKind = $kind;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn to_wide(self) -> WideInt {
                WideInt::from_u64(self as u64)
            }

            #[inline]
            fn from_wide(value: WideInt) -> Result<Self, Bound> {
                Self::KIND.check(value)?;
                Ok(value.magnitude as $t)
            }
        }
    )*};
}

impl_prim_int!(signed: i8 => IntKind::I8, i16 => IntKind::I16, i32 => IntKind::I32, i64 => IntKind::I64);
impl_prim_int!(unsigned: u8 => IntKind::U8, u16 => IntKind::U16, u32 => IntKind::U32, u64 => IntKind::U64);

macro_rules! impl_prim_float {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl PrimFloat for $t {
            const MAX: Self = <$t>::MAX;
            const MIN: Self = <$t>::MIN;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64_lossy(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn from_wide_lossy(value: WideInt) -> Self {
                let magnitude = value.magnitude as $t;
                if value.negative {
                    -magnitude
                } else {
                    magnitude
                }
            }
        }
    )*};
}

impl_prim_float!(f32, f64);

// ============================================================================
// Unified Numeric Dispatch
// ============================================================================

/// A source value lifted into a representation wide enough for any target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(WideInt),
    Float(f64),
}

/// Any of the ten supported primitives, convertible to any other.
pub trait Numeric: Copy + fmt::Debug + Send + Sync + 'static + sealed::Sealed {
    fn to_number(self) -> Number;

    fn from_number(value: Number) -> NumericResult<Self>;

    /// The value a saturating caller clamps to at `bound`.
    fn saturated(bound: Bound) -> Self;

    /// Zero, the clamped result for undefined operations.
    fn zero() -> Self;

    /// Checked conversion to another numeric type.
    #[inline]
    fn checked_to<D: Numeric>(self) -> NumericResult<D> {
        convert(self)
    }

    /// Saturating conversion to another numeric type.
    #[inline]
    fn saturating_to<D: Numeric>(self) -> D {
        saturating_convert(self)
    }
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {$(
        impl Numeric for $t {
            #[inline]
            fn to_number(self) -> Number {
                Number::Int(self.to_wide())
            }

            #[inline]
            fn from_number(value: Number) -> NumericResult<Self> {
                let wide = match value {
                    Number::Int(wide) => wide,
                    Number::Float(f) => truncate_f64(f)?,
                };
                <$t>::from_wide(wide).map_err(NumericError::OutOfRange)
            }

            #[inline]
            fn saturated(bound: Bound) -> Self {
                match bound {
                    Bound::Min => <$t>::MIN,
                    Bound::Max => <$t>::MAX,
                }
            }

            #[inline]
            fn zero() -> Self {
                0
            }
        }
    )*};
}

impl_numeric_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Numeric for f64 {
    #[inline]
    fn to_number(self) -> Number {
        Number::Float(self)
    }

    #[inline]
    fn from_number(value: Number) -> NumericResult<Self> {
        Ok(match value {
            Number::Int(wide) => f64::from_wide_lossy(wide),
            Number::Float(f) => f,
        })
    }

    #[inline]
    fn saturated(bound: Bound) -> Self {
        match bound {
            Bound::Min => f64::MIN,
            Bound::Max => f64::MAX,
        }
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}

impl Numeric for f32 {
    #[inline]
    fn to_number(self) -> Number {
        Number::Float(self as f64)
    }

    #[inline]
    fn from_number(value: Number) -> NumericResult<Self> {
        match value {
            Number::Int(wide) => Ok(f32::from_wide_lossy(wide)),
            Number::Float(f) if f.is_finite() && f > f32::MAX as f64 => {
                Err(NumericError::OutOfRange(Bound::Max))
            },
            Number::Float(f) if f.is_finite() && f < f32::MIN as f64 => {
                Err(NumericError::OutOfRange(Bound::Min))
            },
            Number::Float(f) => Ok(f as f32),
        }
    }

    #[inline]
    fn saturated(bound: Bound) -> Self {
        match bound {
            Bound::Min => f32::MIN,
            Bound::Max => f32::MAX,
        }
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}

// ============================================================================
// Conversion Operations
// ============================================================================

/// 2^64 as f64; every integral f64 below it fits in a u64 magnitude.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Truncate toward zero into the wide intermediate.
///
/// Non-finite input is rejected before any range check.
#[inline]
fn truncate_f64(value: f64) -> NumericResult<WideInt> {
    if !value.is_finite() {
        return Err(NumericError::NotFinite);
    }
    let truncated = value.trunc();
    if truncated >= TWO_POW_64 {
        return Err(NumericError::OutOfRange(Bound::Max));
    }
    if truncated <= -TWO_POW_64 {
        return Err(NumericError::OutOfRange(Bound::Min));
    }
    Ok(WideInt::new(truncated < 0.0, truncated.abs() as u64))
}

/// Convert between any two supported numeric types.
///
/// Widening is exact. Narrowing succeeds only when the value is within the
/// destination's range, otherwise `OutOfRange` names the crossed bound.
/// Float sources are truncated toward zero (see [`truncate`]).
///
/// # Errors
/// - `OutOfRange` if the value does not fit the destination
/// - `NotFinite` for NaN or infinite float sources with an integer target
#[inline]
pub fn convert<S: Numeric, D: Numeric>(value: S) -> NumericResult<D> {
    D::from_number(value.to_number())
}

/// Truncate a float toward zero into an integer type.
///
/// # Errors
/// - `NotFinite` for NaN and ±infinity, checked first
/// - `OutOfRange` if the truncated value does not fit `D`
#[inline]
pub fn truncate<F: PrimFloat, D: PrimInt>(value: F) -> NumericResult<D> {
    let wide = truncate_f64(value.to_f64())?;
    D::from_wide(wide).map_err(NumericError::OutOfRange)
}

/// Integer to float conversion.
///
/// Always succeeds. Magnitudes beyond the float's exact integer range
/// (2^24 for f32, 2^53 for f64) round to the nearest representable value.
#[inline]
pub fn to_float<S: PrimInt, F: PrimFloat>(value: S) -> F {
    F::from_wide_lossy(value.to_wide())
}

/// Clamped-policy conversion: saturate to the nearest bound.
///
/// Only failed conversions are altered: for integer targets infinities
/// saturate by sign and NaN converts to zero, while float targets carry
/// infinities through unchanged.
#[inline]
pub fn saturating_convert<S: Numeric, D: Numeric>(value: S) -> D {
    let number = value.to_number();
    let result = match D::from_number(number) {
        Err(NumericError::NotFinite) => match number {
            Number::Float(f) if f == f64::INFINITY => Err(NumericError::OutOfRange(Bound::Max)),
            Number::Float(f) if f == f64::NEG_INFINITY => Err(NumericError::OutOfRange(Bound::Min)),
            _ => Err(NumericError::NotFinite),
        },
        detected => detected,
    };
    policy::clamp(result)
}

/// Clamped-policy truncation, see [`saturating_convert`].
#[inline]
pub fn saturating_truncate<F: PrimFloat, D: PrimInt + Numeric>(value: F) -> D {
    saturating_convert::<f64, D>(value.to_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_bounds() {
        assert_eq!(IntKind::I8.min_i64(), -128);
        assert_eq!(IntKind::I8.max_u64(), 127);
        assert_eq!(IntKind::U32.max_u64(), u32::MAX as u64);
        assert_eq!(IntKind::I64.min_i64(), i64::MIN);
        assert_eq!(IntKind::U64.max_u64(), u64::MAX);
        assert_eq!(IntKind::U64.min_i64(), 0);
        assert_eq!(IntKind::I16.to_string(), "i16");
    }

    #[test]
    fn test_check_i64() {
        assert_eq!(IntKind::I16.check_i64(32767), Ok(()));
        assert_eq!(IntKind::I16.check_i64(32768), Err(Bound::Max));
        assert_eq!(IntKind::I16.check_i64(-32769), Err(Bound::Min));
        assert_eq!(IntKind::U8.check_i64(-1), Err(Bound::Min));
        assert_eq!(IntKind::U64.check_i64(i64::MAX), Ok(()));
    }

    #[test]
    fn test_wide_zero_is_positive() {
        assert_eq!(WideInt::new(true, 0), WideInt::ZERO);
        assert_eq!(WideInt::from_i64(i64::MIN).magnitude(), 1u64 << 63);
        assert_eq!(WideInt::from_i64(i64::MIN).to_i64(), Ok(i64::MIN));
        assert_eq!(WideInt::from_u64(u64::MAX).to_i64(), Err(Bound::Max));
    }

    #[test]
    fn test_widening_is_exact() {
        assert_eq!(convert::<i16, i32>(-12345), Ok(-12345));
        assert_eq!(convert::<u32, i64>(u32::MAX), Ok(u32::MAX as i64));
        assert_eq!(convert::<i64, f64>(1 << 52), Ok((1u64 << 52) as f64));
    }

    #[test]
    fn test_narrowing() {
        assert_eq!(convert::<i32, i16>(32767), Ok(32767));
        assert_eq!(
            convert::<i32, i16>(32768),
            Err(NumericError::OutOfRange(Bound::Max))
        );
        assert_eq!(
            convert::<i32, u8>(-1),
            Err(NumericError::OutOfRange(Bound::Min))
        );
        assert_eq!(
            convert::<u64, i64>(u64::MAX),
            Err(NumericError::OutOfRange(Bound::Max))
        );
        assert_eq!(convert::<i64, u64>(i64::MAX), Ok(i64::MAX as u64));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate::<f64, i16>(123.9), Ok(123));
        assert_eq!(truncate::<f64, i16>(-123.9), Ok(-123));
        assert_eq!(truncate::<f64, u8>(-0.9), Ok(0));
        assert_eq!(
            truncate::<f64, i16>(40000.0),
            Err(NumericError::OutOfRange(Bound::Max))
        );
        assert_eq!(truncate::<f64, i16>(f64::NAN), Err(NumericError::NotFinite));
        assert_eq!(
            truncate::<f32, i64>(f32::NEG_INFINITY),
            Err(NumericError::NotFinite)
        );
        assert_eq!(truncate::<f64, i64>(-9_223_372_036_854_775_808.0), Ok(i64::MIN));
        assert_eq!(
            truncate::<f64, i64>(9_223_372_036_854_775_808.0),
            Err(NumericError::OutOfRange(Bound::Max))
        );
        assert_eq!(
            truncate::<f64, u64>(1e300),
            Err(NumericError::OutOfRange(Bound::Max))
        );
    }

    #[test]
    fn test_float_narrowing() {
        assert_eq!(convert::<f64, f32>(1.5), Ok(1.5f32));
        assert_eq!(
            convert::<f64, f32>(1e300),
            Err(NumericError::OutOfRange(Bound::Max))
        );
        assert!(convert::<f64, f32>(f64::NAN).unwrap().is_nan());
        assert_eq!(convert::<f64, f32>(f64::INFINITY), Ok(f32::INFINITY));
    }

    #[test]
    fn test_to_float_is_lossy() {
        let big = (1i64 << 53) + 1;
        let f: f64 = to_float(big);
        assert_eq!(f, (1i64 << 53) as f64);
        let g: f32 = to_float(-16_777_217i32);
        assert_eq!(g, -16_777_216.0);
    }

    #[test]
    fn test_saturating_convert() {
        assert_eq!(saturating_convert::<i32, i8>(1000), i8::MAX);
        assert_eq!(saturating_convert::<i32, i8>(-1000), i8::MIN);
        assert_eq!(saturating_convert::<i64, u16>(-5), 0);
        assert_eq!(saturating_convert::<f64, i32>(f64::INFINITY), i32::MAX);
        assert_eq!(saturating_convert::<f64, i32>(f64::NEG_INFINITY), i32::MIN);
        assert_eq!(saturating_convert::<f64, i32>(f64::NAN), 0);
        assert_eq!(saturating_convert::<f32, u8>(f32::NEG_INFINITY), 0);
        assert_eq!(saturating_truncate::<f32, u8>(300.7), u8::MAX);
        assert_eq!(saturating_convert::<f64, f32>(-1e300), f32::MIN);
    }

    #[test]
    fn test_saturating_keeps_successful_float_conversions() {
        assert_eq!(saturating_convert::<f64, f64>(f64::INFINITY), f64::INFINITY);
        assert_eq!(saturating_convert::<f64, f64>(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert_eq!(saturating_convert::<f64, f32>(f64::INFINITY), f32::INFINITY);
        assert!(saturating_convert::<f64, f32>(f64::NAN).is_nan());
    }

    #[test]
    fn test_extension_methods() {
        assert_eq!(200u8.checked_to::<i8>(), Err(NumericError::OutOfRange(Bound::Max)));
        assert_eq!(200u8.saturating_to::<i8>(), i8::MAX);
        assert_eq!((-7i16).checked_to::<i64>(), Ok(-7));
    }
}
