//! Number formatting utilities for dashboard display.
//!
//! Handles f64 values with automatic decimal-place detection, comma separators,
//! and compact K/M/B/T suffixes for market caps and volumes.

const SUFFIXES: [&str; 4] = ["K", "M", "B", "T"];

/// Inserts thousands separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Trims trailing zeros, adds thousands separators.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.as_str()),
    };

    match unsigned.split_once('.') {
        Some((int, frac)) => format!("{}{}.{}", sign, group_thousands(int), frac),
        None => format!("{}{}", sign, group_thousands(unsigned)),
    }
}

fn get_decimal_places(value: f64) -> usize {
    let abs_value = value.abs();

    if abs_value >= 100.0 {
        return 0;
    }

    if abs_value >= 1.0 || abs_value == 0.0 {
        return 2;
    }

    let exponent = abs_value.log10().floor().abs() as usize;
    (exponent + 2).min(8)
}

/// Format an f64 for display with auto-detected decimal places.
pub fn display(amount: &f64) -> String {
    display_with_decimals(amount, get_decimal_places(*amount))
}

/// Format an f64 for display with explicit decimal places.
pub fn display_with_decimals(amount: &f64, decimals: usize) -> String {
    let formatted = format!("{:.1$}", amount, decimals);
    display_formatted_string(formatted)
}

/// Format a price with its currency symbol, e.g. `$1,234.5`.
pub fn price(amount: &f64, symbol: &str) -> String {
    let body = display(&amount.abs());
    if *amount < 0.0 {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

/// Format a percentage change with an explicit sign and two decimals.
pub fn percent_change(value: &f64) -> String {
    if *value > 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Compact form for large magnitudes: `1_234_567.0` → `"1.23M"`.
///
/// The fractional part after the suffix is truncated, not rounded. Values
/// below one thousand (or at or beyond one quadrillion) fall back to
/// [`display`].
pub fn compact(amount: &f64) -> String {
    let abs = amount.abs();
    if !abs.is_finite() || abs < 1_000.0 {
        return display(amount);
    }

    let integer = format!("{:.0}", abs.trunc());
    let groups = (integer.len() + 2) / 3;
    let Some(suffix) = SUFFIXES.get(groups - 2) else {
        return display(amount);
    };

    let lead_len = integer.len() - (groups - 1) * 3;
    let lead = &integer[..lead_len];
    let frac = &integer[lead_len..lead_len + 2];
    let sign = if *amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}{}", sign, lead, frac, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formatted_string_thousands_separator() {
        assert_eq!(display_formatted_string("0".to_string()), "0");
        assert_eq!(display_formatted_string("123".to_string()), "123");
        assert_eq!(display_formatted_string("1000".to_string()), "1,000");
        assert_eq!(display_formatted_string("123456".to_string()), "123,456");
        assert_eq!(
            display_formatted_string("1234567890".to_string()),
            "1,234,567,890"
        );
    }

    #[test]
    fn test_display_formatted_string_trailing_zeros_trimmed() {
        assert_eq!(display_formatted_string("1.50".to_string()), "1.5");
        assert_eq!(display_formatted_string("1.00".to_string()), "1");
        assert_eq!(display_formatted_string("1000.00".to_string()), "1,000");
    }

    #[test]
    fn test_display_formatted_string_negative() {
        assert_eq!(display_formatted_string("-1000".to_string()), "-1,000");
        assert_eq!(display_formatted_string("-100".to_string()), "-100");
        assert_eq!(
            display_formatted_string("-1234.56".to_string()),
            "-1,234.56"
        );
    }

    #[test]
    fn test_display_auto_decimals() {
        assert_eq!(display(&1234.56), "1,235");
        assert_eq!(display(&15.456), "15.46");
        assert_eq!(display(&0.0123), "0.0123");
        assert_eq!(display(&0.0), "0");
    }

    #[test]
    fn test_price_and_percent() {
        assert_eq!(price(&64250.12, "$"), "$64,250");
        assert_eq!(price(&-2.5, "€"), "-€2.5");
        assert_eq!(percent_change(&2.346), "+2.35%");
        assert_eq!(percent_change(&-1.0), "-1.00%");
        assert_eq!(percent_change(&0.0), "0.00%");
    }

    #[test]
    fn test_compact_suffixes() {
        assert_eq!(compact(&1_234.0), "1.23K");
        assert_eq!(compact(&1_234_567.89), "1.23M");
        assert_eq!(compact(&45_678_901_234.0), "45.67B");
        assert_eq!(compact(&1_299_999_999_999.0), "1.29T");
        assert_eq!(compact(&-12_345.0), "-12.34K");
    }

    #[test]
    fn test_compact_small_values_fall_through() {
        assert_eq!(compact(&999.0), "999");
        assert_eq!(compact(&12.5), "12.5");
    }
}
