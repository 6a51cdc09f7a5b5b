// ============================================================================
// Numeric Module
// Checked arithmetic, safe conversion and scaled fixed-point decimals
// ============================================================================
//
// This module provides:
// - CheckedArithmetic: overflow-detecting integer operations, all widths
// - convert: range-checked conversion and float truncation
// - scaled: (mantissa, scale) fixed-point multiply/divide/parse/format
// - FixedDecimal<D>: scaled decimal with compile-time precision
// - OverflowPolicy, Checked<T>, Clamped<T>: the two failure responses
// - NumericError: error kinds for all of the above
//
// Design principles:
// - Pure functions, no shared state
// - Detection returns Result; only the policy layer decides to saturate
// - 64-bit intermediates widen through software 128-bit helpers

mod errors;
mod fixed_decimal;

pub mod arithmetic;
pub mod convert;
pub mod format;
pub mod policy;
pub mod scaled;
pub mod wide;
pub mod wrappers;

pub use arithmetic::CheckedArithmetic;
pub use convert::{
    convert, saturating_convert, saturating_truncate, to_float, truncate, IntKind, Numeric,
    PrimFloat, PrimInt, WideInt,
};
pub use errors::{Bound, NumericError, NumericResult};
pub use fixed_decimal::{Cents, FixedDecimal, Micros, Nanos};
pub use format::NumberFormat;
pub use policy::{clamp, OverflowPolicy};
pub use scaled::Scale;
pub use wrappers::{Checked, Clamped};
