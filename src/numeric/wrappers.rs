// ============================================================================
// Policy Wrappers
// Integer newtypes that fix the overflow policy at the type level
// ============================================================================
//
// `Checked<T>` and `Clamped<T>` share the detection routines of
// `CheckedArithmetic`; they differ only in how a failure is answered.

use super::arithmetic::CheckedArithmetic;
use super::convert::{Numeric, PrimInt};
use super::errors::NumericResult;
use super::policy::clamp;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer whose operators fail loudly on overflow.
///
/// The `try_*` methods return the error; the std operators panic with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[repr(transparent)]
pub struct Checked<T>(pub T);

/// Integer whose operators saturate on overflow and yield zero on
/// division by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[repr(transparent)]
pub struct Clamped<T>(pub T);

impl<T: CheckedArithmetic + Numeric> Checked<T> {
    pub const MIN: Self = Self(T::MIN);
    pub const MAX: Self = Self(T::MAX);

    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> T {
        self.0
    }

    #[inline]
    pub fn try_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.try_add(rhs.0).map(Self)
    }

    #[inline]
    pub fn try_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.try_sub(rhs.0).map(Self)
    }

    #[inline]
    pub fn try_mul(self, rhs: Self) -> NumericResult<Self> {
        self.0.try_mul(rhs.0).map(Self)
    }

    #[inline]
    pub fn try_div(self, rhs: Self) -> NumericResult<Self> {
        self.0.try_div(rhs.0).map(Self)
    }

    #[inline]
    pub fn try_rem(self, rhs: Self) -> NumericResult<Self> {
        self.0.try_rem(rhs.0).map(Self)
    }

    #[inline]
    pub fn try_neg(self) -> NumericResult<Self> {
        self.0.try_neg().map(Self)
    }

    #[inline]
    pub fn try_pow(self, exponent: T) -> NumericResult<Self> {
        self.0.try_pow(exponent).map(Self)
    }

    /// Convert to another checked width.
    #[inline]
    pub fn try_cast<U: CheckedArithmetic + Numeric>(self) -> NumericResult<Checked<U>> {
        self.0.checked_to::<U>().map(Checked)
    }

    /// Reinterpret under the saturating policy.
    #[inline]
    pub fn clamped(self) -> Clamped<T> {
        Clamped(self.0)
    }
}

impl<T: CheckedArithmetic + Numeric> Clamped<T> {
    pub const MIN: Self = Self(T::MIN);
    pub const MAX: Self = Self(T::MAX);

    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> T {
        self.0
    }

    #[inline]
    pub fn pow(self, exponent: T) -> Self {
        Self(clamp(self.0.try_pow(exponent)))
    }

    /// Convert to another width, saturating at its bounds.
    #[inline]
    pub fn cast<U: CheckedArithmetic + Numeric>(self) -> Clamped<U> {
        Clamped(self.0.saturating_to::<U>())
    }

    /// Reinterpret under the checked policy.
    #[inline]
    pub fn checked(self) -> Checked<T> {
        Checked(self.0)
    }
}

macro_rules! impl_wrapper_ops {
    ($($op:ident :: $method:ident => $try_method:ident),*) => {$(
        // Checked operators panic on failure; use `try_*` to handle it.
        impl<T: CheckedArithmetic + Numeric> $op for Checked<T> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self::Output {
                match self.0.$try_method(rhs.0) {
                    Ok(value) => Self(value),
                    Err(err) => panic!("{}", err),
                }
            }
        }

        impl<T: CheckedArithmetic + Numeric> $op for Clamped<T> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self::Output {
                Self(clamp(self.0.$try_method(rhs.0)))
            }
        }
    )*};
}

impl_wrapper_ops!(
    Add::add => try_add,
    Sub::sub => try_sub,
    Mul::mul => try_mul,
    Div::div => try_div,
    Rem::rem => try_rem
);

impl<T: CheckedArithmetic + Numeric> Neg for Checked<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        match self.0.try_neg() {
            Ok(value) => Self(value),
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T: CheckedArithmetic + Numeric> Neg for Clamped<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(clamp(self.0.try_neg()))
    }
}

impl<T: PrimInt> fmt::Display for Checked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T: PrimInt> fmt::Display for Clamped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T: PrimInt> From<T> for Checked<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: PrimInt> From<T> for Clamped<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self(value)
    }
}
