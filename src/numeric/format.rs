// ============================================================================
// Number Format
// Separator and sign configuration for scaled decimal text
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text conventions used by scaled-decimal parsing and formatting.
///
/// Only simple scaled-decimal rendering is covered: no locale digit sets,
/// no exponent notation, no currency symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberFormat {
    /// Separator between integer and fractional digits
    pub decimal_separator: char,

    /// Optional digit-group separator.
    /// Accepted between integer digits while parsing, never emitted.
    pub group_separator: Option<char>,

    /// Leading sign for negative values
    pub negative_sign: char,

    /// Optional leading sign accepted for non-negative values
    pub positive_sign: char,

    /// Trim surrounding whitespace before parsing
    pub allow_whitespace: bool,

    /// Drop trailing fractional zeros (and a bare separator) when formatting
    pub trim_trailing_zeros: bool,
}

impl NumberFormat {
    /// Invariant-culture style: `-1234.5`
    pub const fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: None,
            negative_sign: '-',
            positive_sign: '+',
            allow_whitespace: true,
            trim_trailing_zeros: true,
        }
    }

    /// Comma decimal separator with '.' grouping: `-1.234,5`
    pub const fn european() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: Some('.'),
            ..Self::invariant()
        }
    }

    pub const fn new() -> Self {
        Self::invariant()
    }

    /// Builder method: Set decimal separator
    pub const fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Builder method: Set group separator
    pub const fn with_group_separator(mut self, separator: Option<char>) -> Self {
        self.group_separator = separator;
        self
    }

    /// Builder method: Set negative sign
    pub const fn with_negative_sign(mut self, sign: char) -> Self {
        self.negative_sign = sign;
        self
    }

    /// Builder method: Set positive sign
    pub const fn with_positive_sign(mut self, sign: char) -> Self {
        self.positive_sign = sign;
        self
    }

    /// Builder method: Allow or reject surrounding whitespace
    pub const fn with_whitespace(mut self, allow: bool) -> Self {
        self.allow_whitespace = allow;
        self
    }

    /// Builder method: Keep or trim trailing fractional zeros
    pub const fn with_trailing_zeros_trimmed(mut self, trim: bool) -> Self {
        self.trim_trailing_zeros = trim;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let mut symbols = vec![
            ("decimal separator", self.decimal_separator),
            ("negative sign", self.negative_sign),
            ("positive sign", self.positive_sign),
        ];
        if let Some(group) = self.group_separator {
            symbols.push(("group separator", group));
        }

        for (name, symbol) in &symbols {
            if symbol.is_ascii_digit() || symbol.is_whitespace() {
                tracing::debug!(%name, %symbol, "rejected number format");
                return Err(format!("{} cannot be a digit or whitespace", name));
            }
        }

        for (i, (name, symbol)) in symbols.iter().enumerate() {
            if let Some((other, _)) = symbols[i + 1..].iter().find(|(_, s)| s == symbol) {
                tracing::debug!(%name, %other, %symbol, "rejected number format");
                return Err(format!("{} and {} must differ", name, other));
            }
        }

        Ok(())
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::invariant()
    }
}
