//! Percentage and size labels.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Percentages that round below this are shown as a floor label.
const PERCENTAGE_FLOOR: f64 = 0.1;

/// Label used for anything under [`PERCENTAGE_FLOOR`].
pub const BELOW_FLOOR_LABEL: &str = "< 0.1%";

/// Format a number to `digits` significant digits.
///
/// Mirrors `Number.prototype.toPrecision`: fixed notation while the decimal
/// exponent is in `-6..digits`, exponential (`1.00e-7`, `1.23e+5`) outside it.
/// Exact ties round away from zero, so `12.25` becomes `"12.3"`.
pub fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    let (int_part, frac_part) = split_exact(value);
    let all: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    // value is non-zero, so a non-zero digit exists
    let first = all.iter().position(|&d| d != b'0').unwrap_or(0);
    let mut exponent = int_part.len() as i32 - first as i32 - 1;

    let mut significant: Vec<u8> = all[first..].to_vec();
    significant.resize(significant.len().max(digits + 1), b'0');
    let round_up = significant[digits] >= b'5';
    significant.truncate(digits);
    if round_up && increment(&mut significant) {
        exponent += 1;
    }
    let significant = String::from_utf8_lossy(&significant).into_owned();

    let sign = if value < 0.0 { "-" } else { "" };
    if exponent < -6 || exponent >= digits as i32 {
        let (lead, rest) = significant.split_at(1);
        let mantissa = if rest.is_empty() {
            lead.to_string()
        } else {
            format!("{lead}.{rest}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{}", exponent.unsigned_abs())
    } else if exponent >= 0 {
        let (int, frac) = significant.split_at(exponent as usize + 1);
        if frac.is_empty() {
            format!("{sign}{int}")
        } else {
            format!("{sign}{int}.{frac}")
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{sign}0.{zeros}{significant}")
    }
}

/// Format a number with a fixed number of decimals.
///
/// Mirrors `Number.prototype.toFixed`: exact ties round away from zero, so
/// `1.125` becomes `"1.13"`.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let (int_part, frac_part) = split_exact(value);
    let mut frac: Vec<u8> = frac_part.into_bytes();
    frac.resize(frac.len().max(decimals + 1), b'0');
    let round_up = frac[decimals] >= b'5';
    frac.truncate(decimals);

    let mut all: Vec<u8> = int_part.into_bytes();
    let int_len = all.len();
    all.extend_from_slice(&frac);
    // 9.996 -> "100" after the carry, one digit short of "1000"
    let int_len = if round_up && increment(&mut all) {
        all.push(b'0');
        int_len + 1
    } else {
        int_len
    };

    let text = String::from_utf8_lossy(&all).into_owned();
    let (int, frac) = text.split_at(int_len);
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int}")
    } else {
        format!("{sign}{int}.{frac}")
    }
}

/// Exact decimal expansion of `|value|`, split at the decimal point.
fn split_exact(value: f64) -> (String, String) {
    let text = format!("{:.*}", fractional_digits(value), value.abs());
    match text.split_once('.') {
        Some((int, frac)) => (int.to_string(), frac.to_string()),
        None => (text, String::new()),
    }
}

/// Decimal places needed to print a finite value exactly. A value of the form
/// `m * 2^-k` with odd `m` has exactly `k` fractional decimal digits.
fn fractional_digits(value: f64) -> usize {
    if value.fract() == 0.0 {
        return 0;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    (-(exponent + mantissa.trailing_zeros() as i32)).max(0) as usize
}

/// Add one to an ASCII digit string. When the carry runs off the front the
/// digits become `1` followed by zeros and this returns true.
fn increment(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return false;
        }
    }
    if let Some(first) = digits.first_mut() {
        *first = b'1';
    }
    true
}

/// Share of the bundle, e.g. `"50.0%"`, or `"< 0.1%"` for slivers.
///
/// An undefined share (empty bundle) is treated as zero.
pub fn percentage_label(value: f64, total: f64) -> String {
    let mut percentage = 100.0 * value / total;
    if !percentage.is_finite() {
        percentage = 0.0;
    }

    let text = to_precision(percentage, 3);
    let rounded = text.parse::<f64>().unwrap_or(percentage);
    if rounded < PERCENTAGE_FLOOR {
        BELOW_FLOOR_LABEL.to_string()
    } else {
        format!("{text}%")
    }
}

/// Unit picked for a size label.
///
/// The unit names say KiB/MiB/GiB but the divisors are decimal, which is what
/// bundle reports have always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum SizeUnit {
    /// Under 1e3, shown without a suffix.
    #[strum(to_string = "B")]
    Bytes,
    /// From 1e3.
    #[strum(to_string = "KiB")]
    Kilo,
    /// From 1e6.
    #[strum(to_string = "MiB")]
    Mega,
    /// From 1e9.
    #[strum(to_string = "GiB")]
    Giga,
}

impl SizeUnit {
    /// Divisor for this unit, also the threshold at which it kicks in.
    pub fn divisor(self) -> f64 {
        match self {
            SizeUnit::Bytes => 1.0,
            SizeUnit::Kilo => 1e3,
            SizeUnit::Mega => 1e6,
            SizeUnit::Giga => 1e9,
        }
    }

    /// Largest unit whose threshold the value reaches.
    pub fn for_value(value: f64) -> Self {
        SizeUnit::iter()
            .rev()
            .find(|unit| value >= unit.divisor())
            .unwrap_or(SizeUnit::Bytes)
    }
}

/// Two-decimal size label, e.g. `"1.50 MiB"`. Values under a thousand carry no
/// unit: `"999.00"`.
pub fn size_label(value: f64) -> String {
    let unit = SizeUnit::for_value(value);
    let scaled = value / unit.divisor();
    match unit {
        SizeUnit::Bytes => to_fixed(scaled, 2),
        _ => format!("{} {unit}", to_fixed(scaled, 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_precision_fixed() {
        assert_eq!(to_precision(50.0, 3), "50.0");
        assert_eq!(to_precision(100.0, 3), "100");
        assert_eq!(to_precision(5.1234, 3), "5.12");
        assert_eq!(to_precision(0.1, 3), "0.100");
        assert_eq!(to_precision(0.012345, 3), "0.0123");
        assert_eq!(to_precision(0.0, 3), "0.00");
        assert_eq!(to_precision(-2.5, 2), "-2.5");
    }

    #[test]
    fn test_to_precision_exponential() {
        assert_eq!(to_precision(1234.0, 3), "1.23e+3");
        assert_eq!(to_precision(0.0000001, 3), "1.00e-7");
    }

    #[test]
    fn test_to_precision_rounds_up_into_next_decade() {
        assert_eq!(to_precision(99.96, 3), "100");
        assert_eq!(to_precision(9.999, 3), "10.0");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(to_precision(12.25, 3), "12.3");
        assert_eq!(to_precision(0.125, 2), "0.13");
        assert_eq!(to_precision(-12.25, 3), "-12.3");
        assert_eq!(to_fixed(1.125, 2), "1.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-1.125, 2), "-1.13");
    }

    #[test]
    fn test_inexact_near_ties_use_exact_value() {
        // 1.005 is stored just below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
        // 1.135 is stored just above it
        assert_eq!(to_fixed(1.135, 2), "1.14");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(999.0, 2), "999.00");
        assert_eq!(to_fixed(9.996, 2), "10.00");
        assert_eq!(to_fixed(0.996, 2), "1.00");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(1.5, 2), "1.50");
        assert_eq!(to_fixed(42.0, 0), "42");
    }

    #[test]
    fn test_percentage_label() {
        assert_eq!(percentage_label(1.0, 2.0), "50.0%");
        assert_eq!(percentage_label(1.0, 1.0), "100%");
        assert_eq!(percentage_label(1.0, 3.0), "33.3%");
        assert_eq!(percentage_label(1.0, 1000.0), "0.100%");
    }

    #[test]
    fn test_percentage_floor() {
        assert_eq!(percentage_label(1.0, 1001.0), BELOW_FLOOR_LABEL);
        assert_eq!(percentage_label(0.0, 10.0), BELOW_FLOOR_LABEL);
        // 0.09996% rounds to 0.100 and is not below the floor
        assert_eq!(percentage_label(9.996, 10000.0), "0.100%");
    }

    #[test]
    fn test_percentage_of_empty_bundle() {
        assert_eq!(percentage_label(0.0, 0.0), BELOW_FLOOR_LABEL);
    }

    #[test]
    fn test_size_unit_boundaries() {
        assert_eq!(size_label(999.0), "999.00");
        assert_eq!(size_label(1000.0), "1.00 KiB");
        assert_eq!(size_label(1_500_000.0), "1.50 MiB");
        assert_eq!(size_label(2_000_000_000.0), "2.00 GiB");
        assert_eq!(size_label(0.0), "0.00");
    }

    #[test]
    fn test_size_label_ties() {
        assert_eq!(size_label(1125.0), "1.13 KiB");
        assert_eq!(size_label(1_125_000.0), "1.13 MiB");
        assert_eq!(percentage_label(49.0, 400.0), "12.3%");
    }

    #[test]
    fn test_size_unit_selection() {
        assert_eq!(SizeUnit::for_value(0.0), SizeUnit::Bytes);
        assert_eq!(SizeUnit::for_value(999_999.0), SizeUnit::Kilo);
        assert_eq!(SizeUnit::for_value(1e6), SizeUnit::Mega);
        assert_eq!(SizeUnit::for_value(-5.0), SizeUnit::Bytes);
        assert_eq!(SizeUnit::Mega.to_string(), "MiB");
    }
}
