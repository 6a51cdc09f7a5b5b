// ============================================================================
// Basic Usage Example
// ============================================================================

use checked_numerics::numeric::scaled::scaled_round;
use checked_numerics::prelude::*;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Checked Numerics Example ===\n");

    // Same detection, two responses
    println!("Checked arithmetic...");
    let detected = 30000i16.try_mul(3);
    println!("  30000i16 * 3          = {:?}", detected);
    println!("  clamped               = {}", clamp(detected));
    println!("  i64::MIN / -1         = {:?}", i64::MIN.try_div(-1));
    println!("  3u64 ^ 40             = {:?}", 3u64.try_pow(40));
    println!("  Clamped(250u8) + 10   = {}", Clamped(250u8) + Clamped(10));

    // Conversions
    println!("\nConversions...");
    println!("  i32 40000 -> i16      = {:?}", convert::<i32, i16>(40000));
    println!("  f64 -7.9 -> i8        = {:?}", truncate::<f64, i8>(-7.9));
    println!("  f64 NaN -> i32        = {:?}", truncate::<f64, i32>(f64::NAN));
    println!("  saturating 1e10 -> u16 = {}", saturating_convert::<f64, u16>(1e10));

    // Scaled decimals
    println!("\nScaled decimals (scale 10^6)...");
    let scale = Scale::of(6);
    let format = NumberFormat::default();
    let price = scaled_parse("12.345678", scale, &format)?;
    let qty = scaled_parse("-3", scale, &format)?;
    let notional = scaled_multiply(price, qty, scale)?;
    println!(
        "  {} * {} = {}",
        scaled_to_string(price, scale, &format),
        scaled_to_string(qty, scale, &format),
        scaled_to_string(notional, scale, &format)
    );
    let third = scaled_divide(1_000_000, 3_000_000, scale)?;
    println!("  1 / 3 = {}", scaled_to_string(third, scale, &format));
    println!(
        "  round(1/3, 2) = {}",
        scaled_to_string(scaled_round(third, scale, 2)?, scale, &format)
    );

    let european = NumberFormat::european();
    let parsed = scaled_parse("-1.234,5", scale, &european)?;
    println!("  european \"-1.234,5\" = {}", scaled_to_string(parsed, scale, &format));

    // Typed fixed-point
    println!("\nFixedDecimal...");
    let unit: Cents = "19.99".parse()?;
    let total = unit.checked_mul_int(3)?;
    println!("  3 x {} = {:.2}", unit, total);
    println!("  as Decimal: {}", total.to_decimal());

    Ok(())
}
