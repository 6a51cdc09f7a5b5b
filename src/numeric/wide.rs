// ============================================================================
// Wide Intermediates
// Software 128-bit products and quotients built from 64-bit halves
// ============================================================================
//
// Scaled multiply and divide need `a * b / c` where `a * b` does not fit in
// 64 bits. The product is held as a (hi, lo) pair of u64 words and reduced
// by a 128/64 long division, so no native 128-bit type is involved.

const LOW_MASK: u64 = 0xFFFF_FFFF;

/// An unsigned 128-bit value split into high and low 64-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U128Parts {
    pub hi: u64,
    pub lo: u64,
}

impl U128Parts {
    #[inline]
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self { hi: 0, lo: value }
    }

    /// Full product of two u64 values.
    ///
    /// Each operand is split into 32-bit halves; the four partial products
    /// are combined with explicit carry propagation through the middle word.
    #[inline]
    pub const fn mul_u64(a: u64, b: u64) -> Self {
        let (a_lo, a_hi) = (a & LOW_MASK, a >> 32);
        let (b_lo, b_hi) = (b & LOW_MASK, b >> 32);

        let lo_lo = a_lo * b_lo;
        let lo_hi = a_lo * b_hi;
        let hi_lo = a_hi * b_lo;
        let hi_hi = a_hi * b_hi;

        // At most 3 * (2^32 - 1), no overflow
        let mid = (lo_lo >> 32) + (lo_hi & LOW_MASK) + (hi_lo & LOW_MASK);

        Self {
            hi: hi_hi + (lo_hi >> 32) + (hi_lo >> 32) + (mid >> 32),
            lo: (lo_lo & LOW_MASK) | (mid << 32),
        }
    }

    /// Whether the value fits in a single u64.
    #[inline]
    pub const fn fits_u64(self) -> bool {
        self.hi == 0
    }

    /// Divide by a u64, returning `(quotient, remainder)`.
    ///
    /// Returns `None` when `divisor` is zero or the quotient needs more than
    /// 64 bits (which happens exactly when `hi >= divisor`).
    pub const fn div_u64(self, divisor: u64) -> Option<(u64, u64)> {
        if divisor == 0 || self.hi >= divisor {
            return None;
        }
        if self.hi == 0 {
            return Some((self.lo / divisor, self.lo % divisor));
        }

        // Restoring long division, one bit of `lo` per step.
        // Invariant: rem < divisor at the top of each iteration.
        let mut rem = self.hi;
        let mut quotient = 0u64;
        let mut bit = 64;
        while bit > 0 {
            bit -= 1;
            let carry = rem >> 63;
            rem = (rem << 1) | ((self.lo >> bit) & 1);
            quotient <<= 1;
            if carry != 0 || rem >= divisor {
                rem = rem.wrapping_sub(divisor);
                quotient |= 1;
            }
        }
        Some((quotient, rem))
    }
}

/// `a * b / divisor` truncated toward zero, on magnitudes.
///
/// `None` if `divisor` is zero or the quotient exceeds `u64::MAX`.
#[inline]
pub const fn mul_div_u64(a: u64, b: u64, divisor: u64) -> Option<u64> {
    match U128Parts::mul_u64(a, b).div_u64(divisor) {
        Some((quotient, _)) => Some(quotient),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn to_native(parts: U128Parts) -> u128 {
        ((parts.hi as u128) << 64) | parts.lo as u128
    }

    #[test]
    fn test_mul_small() {
        assert_eq!(U128Parts::mul_u64(6, 7), U128Parts::from_u64(42));
        assert_eq!(U128Parts::mul_u64(0, u64::MAX), U128Parts::from_u64(0));
    }

    #[test]
    fn test_mul_max() {
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1
        let p = U128Parts::mul_u64(u64::MAX, u64::MAX);
        assert_eq!(p, U128Parts::new(u64::MAX - 1, 1));
    }

    #[test]
    fn test_div_quotient_too_wide() {
        assert_eq!(U128Parts::new(5, 0).div_u64(5), None);
        assert_eq!(U128Parts::new(0, 10).div_u64(0), None);
    }

    #[test]
    fn test_div_exact() {
        let p = U128Parts::mul_u64(i64::MAX as u64, 1_000_000);
        assert_eq!(p.div_u64(1_000_000), Some((i64::MAX as u64, 0)));
    }

    #[test]
    fn test_mul_div() {
        assert_eq!(mul_div_u64(1_000_000, 1_000_000, 3_000_000), Some(333_333));
        assert_eq!(mul_div_u64(u64::MAX, u64::MAX, 1), None);
        assert_eq!(mul_div_u64(u64::MAX, u64::MAX, u64::MAX), Some(u64::MAX));
    }

    quickcheck! {
        fn prop_mul_matches_native(a: u64, b: u64) -> bool {
            to_native(U128Parts::mul_u64(a, b)) == a as u128 * b as u128
        }

        fn prop_div_matches_native(a: u64, b: u64, d: u64) -> bool {
            let parts = U128Parts::mul_u64(a, b);
            let native = to_native(parts);
            match parts.div_u64(d) {
                Some((q, r)) => d != 0 && native / d as u128 == q as u128 && native % d as u128 == r as u128,
                None => d == 0 || native / d as u128 > u64::MAX as u128,
            }
        }
    }
}
