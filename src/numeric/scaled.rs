// ============================================================================
// Scaled Decimal Arithmetic
// Fixed-point operations on (mantissa, scale) pairs
// ============================================================================
//
// A scaled decimal is an i64 mantissa `m` with a power-of-ten factor `F`,
// representing `m / F`. The factor belongs to the type, never the value.
//
// Multiply and divide route the intermediate through a software 128-bit
// product (`wide`), so `a * b` and `a * F` cannot overflow before the
// division brings them back into range. All divisions truncate toward zero.

use super::arithmetic::CheckedArithmetic;
use super::convert::{truncate, WideInt};
use super::errors::{NumericError, NumericResult};
use super::format::NumberFormat;
use super::wide::mul_div_u64;
use std::fmt::{self, Write};

// ============================================================================
// Scale
// ============================================================================

/// Compute 10^n at compile time
const fn pow10(n: u8) -> i64 {
    let mut result: i64 = 1;
    let mut i = 0;
    while i < n {
        result *= 10;
        i += 1;
    }
    result
}

/// A power-of-ten scaling factor `10^decimals`, `0 <= decimals <= 18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale {
    factor: i64,
    decimals: u8,
}

impl Scale {
    /// Largest supported number of fractional digits (10^18 < i64::MAX)
    pub const MAX_DECIMALS: u8 = 18;

    /// Scale with `decimals` fractional digits.
    ///
    /// Evaluated in a const context, an unsupported digit count is a
    /// compile error.
    pub const fn of(decimals: u8) -> Self {
        assert!(
            decimals <= Self::MAX_DECIMALS,
            "scale supports at most 18 decimal places"
        );
        Self {
            factor: pow10(decimals),
            decimals,
        }
    }

    /// # Errors
    /// Returns `InvalidScale` if `decimals > 18`.
    pub const fn from_decimals(decimals: u8) -> NumericResult<Self> {
        if decimals > Self::MAX_DECIMALS {
            return Err(NumericError::InvalidScale);
        }
        Ok(Self::of(decimals))
    }

    /// Scale from its factor, e.g. `1_000_000`.
    ///
    /// # Errors
    /// Returns `InvalidScale` unless `factor` is a power of ten up to 10^18.
    pub fn new(factor: i64) -> NumericResult<Self> {
        (0..=Self::MAX_DECIMALS)
            .find(|&d| pow10(d) == factor)
            .map(Self::of)
            .ok_or(NumericError::InvalidScale)
    }

    #[inline]
    pub const fn factor(self) -> i64 {
        self.factor
    }

    /// Number of fractional digits, `log10(factor)`
    #[inline]
    pub const fn decimals(self) -> u8 {
        self.decimals
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Error for a magnitude too large in the direction of `negative`.
#[inline]
const fn past_bound(negative: bool) -> NumericError {
    if negative {
        NumericError::Underflow
    } else {
        NumericError::Overflow
    }
}

/// Apply the sign once to a combined magnitude and range-check it.
#[inline]
fn to_mantissa(negative: bool, magnitude: u64) -> NumericResult<i64> {
    WideInt::new(negative, magnitude)
        .to_i64()
        .map_err(NumericError::overflow_past)
}

/// `(a * b) / scale`, truncated toward zero.
///
/// # Errors
/// Returns `Overflow` or `Underflow` if the result does not fit an i64.
pub fn scaled_multiply(a: i64, b: i64, scale: Scale) -> NumericResult<i64> {
    let negative = (a < 0) != (b < 0);
    let magnitude = mul_div_u64(a.unsigned_abs(), b.unsigned_abs(), scale.factor as u64)
        .ok_or(past_bound(negative))?;
    to_mantissa(negative, magnitude)
}

/// `(a * scale) / b`, truncated toward zero.
///
/// # Errors
/// - `DivisionByZero` if `b == 0`, under every policy
/// - `Overflow` or `Underflow` if the quotient does not fit an i64
pub fn scaled_divide(a: i64, b: i64, scale: Scale) -> NumericResult<i64> {
    if b == 0 {
        return Err(NumericError::DivisionByZero);
    }
    let negative = (a < 0) != (b < 0);
    let magnitude = mul_div_u64(a.unsigned_abs(), scale.factor as u64, b.unsigned_abs())
        .ok_or(past_bound(negative))?;
    to_mantissa(negative, magnitude)
}

/// Round to `decimals` fractional digits, half away from zero.
///
/// # Errors
/// Returns `Overflow` or `Underflow` if rounding away from zero leaves
/// the mantissa range.
pub fn scaled_round(mantissa: i64, scale: Scale, decimals: u8) -> NumericResult<i64> {
    if decimals >= scale.decimals {
        return Ok(mantissa);
    }
    let step = pow10(scale.decimals - decimals);
    let rem = mantissa % step;
    let truncated = mantissa - rem;
    // |rem| < step <= 10^18, doubling stays in range
    if rem.abs() * 2 < step {
        Ok(truncated)
    } else if rem > 0 {
        truncated.try_add(step)
    } else {
        truncated.try_sub(step)
    }
}

// ============================================================================
// Floating-Point Conversion
// ============================================================================

/// `mantissa / scale` as f64.
///
/// Lossy: binary floating point cannot represent most decimal fractions,
/// and mantissas beyond 2^53 lose low digits.
#[inline]
pub fn scaled_to_double(mantissa: i64, scale: Scale) -> f64 {
    mantissa as f64 / scale.factor as f64
}

/// `scaled` is the product of a finite value and the factor; an infinite
/// product means the finite input lies past a bound.
fn scaled_f64_to_mantissa(scaled: f64) -> NumericResult<i64> {
    if scaled.is_infinite() {
        return Err(past_bound(scaled < 0.0));
    }
    truncate::<f64, i64>(scaled).map_err(|err| match err {
        NumericError::OutOfRange(bound) => NumericError::overflow_past(bound),
        other => other,
    })
}

/// Mantissa of `value` at `scale`, truncating digits beyond the scale.
///
/// Truncation applies to the binary value: `0.29` is slightly below
/// 29/100 and yields mantissa 28 at scale 100. Use
/// [`scaled_from_double_nearest`] to round instead.
///
/// # Errors
/// - `NotFinite` for NaN or infinity
/// - `Overflow` or `Underflow` if the mantissa does not fit an i64
pub fn scaled_from_double(value: f64, scale: Scale) -> NumericResult<i64> {
    if !value.is_finite() {
        return Err(NumericError::NotFinite);
    }
    scaled_f64_to_mantissa(value * scale.factor as f64)
}

/// Mantissa of `value` at `scale`, rounded half away from zero.
///
/// # Errors
/// Same as [`scaled_from_double`].
pub fn scaled_from_double_nearest(value: f64, scale: Scale) -> NumericResult<i64> {
    if !value.is_finite() {
        return Err(NumericError::NotFinite);
    }
    scaled_f64_to_mantissa((value * scale.factor as f64).round())
}

// ============================================================================
// Parsing
// ============================================================================

fn invalid_format(input: &str) -> NumericError {
    tracing::debug!(input, "rejected scaled decimal input");
    NumericError::InvalidFormat
}

/// Parse decimal text into a mantissa at `scale`.
///
/// Grammar: `[sign] digits [separator digits]`, with at least one digit
/// on either side of the separator. Fractional digits beyond the scale
/// are truncated. The sign is applied once to the combined value, so
/// `"-0.5"` parses to `-0.5 * scale`.
///
/// # Errors
/// - `InvalidFormat` for malformed text
/// - `Overflow` or `Underflow` if the value does not fit the mantissa
pub fn scaled_parse(input: &str, scale: Scale, format: &NumberFormat) -> NumericResult<i64> {
    let text = if format.allow_whitespace {
        input.trim()
    } else {
        input
    };

    let (negative, body) = if let Some(rest) = text.strip_prefix(format.negative_sign) {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix(format.positive_sign) {
        (false, rest)
    } else {
        (false, text)
    };

    let (int_text, frac_text) = match body.split_once(format.decimal_separator) {
        Some((int_text, frac_text)) => (int_text, Some(frac_text)),
        None => (body, None),
    };

    // Integer part; group separators only between digits. Range is
    // reported only once the whole input is known to be well-formed.
    let mut int_part: Option<u64> = Some(0);
    let mut int_digits = 0usize;
    let mut after_group = false;
    for c in int_text.chars() {
        if let Some(digit) = c.to_digit(10) {
            int_part = int_part
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(digit as u64));
            int_digits += 1;
            after_group = false;
        } else if Some(c) == format.group_separator && int_digits > 0 && !after_group {
            after_group = true;
        } else {
            return Err(invalid_format(input));
        }
    }
    if after_group {
        return Err(invalid_format(input));
    }

    // Fractional part, truncated to the scale's digit count
    let mut frac_part: u64 = 0;
    let mut kept_digits: u8 = 0;
    let mut frac_digits = 0usize;
    for c in frac_text.unwrap_or("").chars() {
        let digit = c.to_digit(10).ok_or_else(|| invalid_format(input))?;
        frac_digits += 1;
        if kept_digits < scale.decimals {
            frac_part = frac_part * 10 + digit as u64;
            kept_digits += 1;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return Err(invalid_format(input));
    }

    frac_part *= pow10(scale.decimals - kept_digits) as u64;

    let magnitude = int_part
        .and_then(|v| v.checked_mul(scale.factor as u64))
        .and_then(|v| v.checked_add(frac_part))
        .ok_or(past_bound(negative))?;
    to_mantissa(negative, magnitude)
}

// ============================================================================
// Formatting
// ============================================================================

/// Write `mantissa / scale` as decimal text.
///
/// With `precision`, exactly that many fractional digits are written
/// (truncating or zero-padding). Otherwise all `scale.decimals()` digits
/// are written, minus trailing zeros when the format trims them.
pub fn write_scaled<W: Write>(
    out: &mut W,
    mantissa: i64,
    scale: Scale,
    format: &NumberFormat,
    precision: Option<usize>,
) -> fmt::Result {
    let magnitude = mantissa.unsigned_abs();
    let factor = scale.factor as u64;
    let int_part = magnitude / factor;
    let mut frac_part = magnitude % factor;
    let mut width = scale.decimals as usize;
    let mut padding = 0usize;

    match precision {
        Some(digits) if digits <= width => {
            frac_part /= pow10((width - digits) as u8) as u64;
            width = digits;
        },
        Some(digits) => padding = digits - width,
        None if format.trim_trailing_zeros => {
            while width > 0 && frac_part % 10 == 0 {
                frac_part /= 10;
                width -= 1;
            }
        },
        None => {},
    }

    // A value truncated to zero by the precision prints unsigned
    if mantissa < 0 && (int_part != 0 || frac_part != 0) {
        out.write_char(format.negative_sign)?;
    }
    write!(out, "{}", int_part)?;

    if width + padding > 0 {
        out.write_char(format.decimal_separator)?;
        if width > 0 {
            write!(out, "{:0width$}", frac_part, width = width)?;
        }
        for _ in 0..padding {
            out.write_char('0')?;
        }
    }
    Ok(())
}

/// `Display` adapter over [`write_scaled`]; `{:.N}` sets the precision.
#[derive(Debug, Clone, Copy)]
pub struct ScaledDisplay<'a> {
    pub mantissa: i64,
    pub scale: Scale,
    pub format: &'a NumberFormat,
}

impl fmt::Display for ScaledDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        write_scaled(f, self.mantissa, self.scale, self.format, precision)
    }
}

/// Render `mantissa / scale` as decimal text, the inverse of [`scaled_parse`].
pub fn scaled_to_string(mantissa: i64, scale: Scale, format: &NumberFormat) -> String {
    ScaledDisplay {
        mantissa,
        scale,
        format,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MICRO: Scale = Scale::of(6);

    fn parse(s: &str) -> NumericResult<i64> {
        scaled_parse(s, MICRO, &NumberFormat::default())
    }

    fn render(m: i64) -> String {
        scaled_to_string(m, MICRO, &NumberFormat::default())
    }

    #[test]
    fn test_scale_construction() {
        assert_eq!(MICRO.factor(), 1_000_000);
        assert_eq!(MICRO.decimals(), 6);
        assert_eq!(Scale::new(1_000_000), Ok(MICRO));
        assert_eq!(Scale::new(1), Ok(Scale::of(0)));
        assert_eq!(Scale::new(1_000_000_000_000_000_000), Ok(Scale::of(18)));
        assert_eq!(Scale::new(250), Err(NumericError::InvalidScale));
        assert_eq!(Scale::new(0), Err(NumericError::InvalidScale));
        assert_eq!(Scale::new(-10), Err(NumericError::InvalidScale));
        assert_eq!(Scale::from_decimals(19), Err(NumericError::InvalidScale));
    }

    #[test]
    fn test_multiply() {
        // 2.5 * 4 = 10
        assert_eq!(scaled_multiply(2_500_000, 4_000_000, MICRO), Ok(10_000_000));
        // 1.5 * -1.5 = -2.25
        assert_eq!(scaled_multiply(1_500_000, -1_500_000, MICRO), Ok(-2_250_000));
        // truncation toward zero: 0.000001 * 0.5
        assert_eq!(scaled_multiply(1, 500_000, MICRO), Ok(0));
        assert_eq!(scaled_multiply(-1, 500_000, MICRO), Ok(0));
    }

    #[test]
    fn test_multiply_wide_intermediate() {
        // a * b overflows 64 bits, the scaled result does not
        assert_eq!(scaled_multiply(i64::MAX, MICRO.factor(), MICRO), Ok(i64::MAX));
        assert_eq!(scaled_multiply(i64::MIN, MICRO.factor(), MICRO), Ok(i64::MIN));
        assert_eq!(
            scaled_multiply(4_000_000_000_000_000, 3_000_000_000_000, MICRO),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            scaled_multiply(i64::MIN, 2_000_000, MICRO),
            Err(NumericError::Underflow)
        );
    }

    #[test]
    fn test_divide() {
        assert_eq!(scaled_divide(1_000_000, 3_000_000, MICRO), Ok(333_333));
        assert_eq!(scaled_divide(-1_000_000, 3_000_000, MICRO), Ok(-333_333));
        assert_eq!(scaled_divide(7_500_000, 2_500_000, MICRO), Ok(3_000_000));
        assert_eq!(scaled_divide(i64::MAX, MICRO.factor(), MICRO), Ok(i64::MAX));
        assert_eq!(scaled_divide(1, 0, MICRO), Err(NumericError::DivisionByZero));
        assert_eq!(scaled_divide(i64::MAX, 1, MICRO), Err(NumericError::Overflow));
        assert_eq!(scaled_divide(i64::MIN, 1, MICRO), Err(NumericError::Underflow));
    }

    #[test]
    fn test_round() {
        assert_eq!(scaled_round(1_234_567, MICRO, 2), Ok(1_230_000));
        assert_eq!(scaled_round(1_235_000, MICRO, 2), Ok(1_240_000));
        assert_eq!(scaled_round(-1_235_000, MICRO, 2), Ok(-1_240_000));
        assert_eq!(scaled_round(-1_234_999, MICRO, 2), Ok(-1_230_000));
        assert_eq!(scaled_round(500_000, MICRO, 0), Ok(1_000_000));
        assert_eq!(scaled_round(42, MICRO, 6), Ok(42));
        assert_eq!(scaled_round(i64::MAX, MICRO, 0), Err(NumericError::Overflow));
    }

    #[test]
    fn test_double_conversion() {
        assert_eq!(scaled_to_double(-2_500_000, MICRO), -2.5);
        assert_eq!(scaled_from_double(-1.75, MICRO), Ok(-1_750_000));
        assert_eq!(scaled_from_double(0.0000019, MICRO), Ok(1));
        assert_eq!(scaled_from_double(-0.0000019, MICRO), Ok(-1));
        assert_eq!(scaled_from_double_nearest(-0.0000019, MICRO), Ok(-2));
        assert_eq!(scaled_from_double_nearest(0.29, Scale::of(2)), Ok(29));
        assert_eq!(scaled_from_double(f64::NAN, MICRO), Err(NumericError::NotFinite));
        assert_eq!(scaled_from_double(1e20, MICRO), Err(NumericError::Overflow));
        assert_eq!(scaled_from_double(-1e20, MICRO), Err(NumericError::Underflow));
    }

    #[test]
    fn test_double_product_past_f64_range() {
        let atto = Scale::of(18);
        assert_eq!(scaled_from_double(1e301, atto), Err(NumericError::Overflow));
        assert_eq!(scaled_from_double(-1e301, atto), Err(NumericError::Underflow));
        assert_eq!(scaled_from_double(f64::MAX, MICRO), Err(NumericError::Overflow));
        assert_eq!(scaled_from_double_nearest(f64::MIN, MICRO), Err(NumericError::Underflow));
        assert_eq!(crate::numeric::clamp(scaled_from_double(1e301, atto)), i64::MAX);
        assert_eq!(scaled_from_double(f64::INFINITY, atto), Err(NumericError::NotFinite));
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("-0.5"), Ok(-500_000));
        assert_eq!(parse("123.456"), Ok(123_456_000));
        assert_eq!(parse("42"), Ok(42_000_000));
        assert_eq!(parse("+7."), Ok(7_000_000));
        assert_eq!(parse(".25"), Ok(250_000));
        assert_eq!(parse("  -3.1  "), Ok(-3_100_000));
        assert_eq!(parse("-0"), Ok(0));
    }

    #[test]
    fn test_parse_truncates_extra_digits() {
        assert_eq!(parse("0.1234567"), Ok(123_456));
        assert_eq!(parse("-0.9999999"), Ok(-999_999));
    }

    #[test]
    fn test_parse_extremes() {
        assert_eq!(parse("9223372036854.775807"), Ok(i64::MAX));
        assert_eq!(parse("-9223372036854.775808"), Ok(i64::MIN));
        assert_eq!(parse("9223372036854.775808"), Err(NumericError::Overflow));
        assert_eq!(parse("-9223372036854.775809"), Err(NumericError::Underflow));
        assert_eq!(
            parse("99999999999999999999999"),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "-",
            ".",
            "+.",
            "abc",
            "1.2.3",
            "--1",
            "1-",
            "1e5",
            "1 000",
            "99999999999999999999abc",
            "99999999999999999999.x",
            "-99999999999999999999.5.",
        ] {
            assert_eq!(parse(input), Err(NumericError::InvalidFormat), "{input:?}");
        }
        let strict = NumberFormat::default().with_whitespace(false);
        assert_eq!(
            scaled_parse(" 1", MICRO, &strict),
            Err(NumericError::InvalidFormat)
        );
    }

    #[test]
    fn test_parse_european() {
        let format = NumberFormat::european();
        assert_eq!(scaled_parse("-1.234,5", MICRO, &format), Ok(-1_234_500_000));
        assert_eq!(
            scaled_parse("1..234", MICRO, &format),
            Err(NumericError::InvalidFormat)
        );
        assert_eq!(
            scaled_parse(".1", MICRO, &format),
            Err(NumericError::InvalidFormat)
        );
        assert_eq!(scaled_to_string(-1_234_500_000, MICRO, &format), "-1234,5");
    }

    #[test]
    fn test_to_string() {
        assert_eq!(render(-500_000), "-0.5");
        assert_eq!(render(123_456_000), "123.456");
        assert_eq!(render(42_000_000), "42");
        assert_eq!(render(0), "0");
        assert_eq!(render(1), "0.000001");
        assert_eq!(render(i64::MIN), "-9223372036854.775808");
        let padded = NumberFormat::default().with_trailing_zeros_trimmed(false);
        assert_eq!(scaled_to_string(42_000_000, MICRO, &padded), "42.000000");
        assert_eq!(scaled_to_string(7, Scale::of(0), &padded), "7");
    }

    #[test]
    fn test_write_with_precision() {
        let format = NumberFormat::default();
        let mut out = String::new();
        write_scaled(&mut out, 1_239_999, MICRO, &format, Some(2)).unwrap();
        assert_eq!(out, "1.23");

        out.clear();
        write_scaled(&mut out, -1_500_000, MICRO, &format, Some(8)).unwrap();
        assert_eq!(out, "-1.50000000");

        out.clear();
        write_scaled(&mut out, 1_500_000, MICRO, &format, Some(0)).unwrap();
        assert_eq!(out, "1");
    }

    #[test]
    fn test_precision_truncated_to_zero_is_unsigned() {
        let format = NumberFormat::default();
        let shown = |m: i64, precision: usize| {
            let mut out = String::new();
            write_scaled(&mut out, m, MICRO, &format, Some(precision)).unwrap();
            out
        };
        assert_eq!(shown(-1, 2), "0.00");
        assert_eq!(shown(-400_000, 0), "0");
        assert_eq!(shown(-1, 6), "-0.000001");
        assert_eq!(shown(-1_000_000, 0), "-1");

        let display = ScaledDisplay {
            mantissa: -4_567,
            scale: MICRO,
            format: &format,
        };
        assert_eq!(format!("{:.2}", display), "0.00");
        assert_eq!(format!("{:.4}", display), "-0.0045");
        assert_eq!(display.to_string(), "-0.004567");
    }

    #[test]
    fn test_identities() {
        for m in [0, 1, -1, 123_456_789, i64::MAX, i64::MIN] {
            assert_eq!(scaled_multiply(m, MICRO.factor(), MICRO), Ok(m));
            assert_eq!(scaled_divide(m, MICRO.factor(), MICRO), Ok(m));
            assert_eq!(parse(&render(m)), Ok(m));
        }
    }
}
