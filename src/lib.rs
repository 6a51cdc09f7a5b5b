// ============================================================================
// Checked Numerics Library
// Overflow-checked integers, safe conversions and scaled decimals
// ============================================================================

//! # Checked Numerics
//!
//! Numeric building blocks that behave like native integers and floats but
//! never silently wrap or lose range.
//!
//! ## Features
//!
//! - **Checked arithmetic** for i8..i64 and u8..u64 that reports
//!   `Overflow`, `Underflow`, `DivisionByZero` and `InvalidExponent`
//! - **Two policies** over one detection path: propagate the error
//!   (`Checked<T>`) or saturate (`Clamped<T>`)
//! - **Safe conversion** between all widths and floats, with float
//!   truncation that tells `NotFinite` apart from `OutOfRange`
//! - **Scaled decimals**: i64 mantissa with a power-of-ten scale, 128-bit
//!   intermediates for multiply/divide, parsing and formatting
//!
//! ## Example
//!
//! ```rust
//! use checked_numerics::prelude::*;
//!
//! // Detection is shared, the response is chosen by the caller
//! assert_eq!(30000i16.try_mul(3), Err(NumericError::Overflow));
//! assert_eq!(clamp(30000i16.try_mul(3)), i16::MAX);
//!
//! // Conversions never lose range silently
//! assert_eq!(convert::<i32, i16>(40000), Err(NumericError::OutOfRange(Bound::Max)));
//! assert_eq!(truncate::<f64, i16>(f64::NAN), Err(NumericError::NotFinite));
//!
//! // Scaled decimals
//! let scale = Scale::of(6);
//! assert_eq!(scaled_divide(1_000_000, 3_000_000, scale), Ok(333_333));
//! assert_eq!(scaled_parse("-0.5", scale, &NumberFormat::default()), Ok(-500_000));
//!
//! let total: Micros = "19.99".parse::<Micros>().unwrap() * Micros::from_integer(3).unwrap();
//! assert_eq!(total.to_string(), "59.97");
//! ```

pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::numeric::arithmetic::{
        abs, add, divide, multiply, negate, pow, remainder, subtract,
    };
    pub use crate::numeric::scaled::{
        scaled_divide, scaled_from_double, scaled_multiply, scaled_parse, scaled_round,
        scaled_to_double, scaled_to_string,
    };
    pub use crate::numeric::{
        clamp, convert, saturating_convert, to_float, truncate, Bound, Cents, Checked,
        CheckedArithmetic, Clamped, FixedDecimal, Micros, NumberFormat, Numeric, NumericError,
        NumericResult, OverflowPolicy, Scale,
    };
}
