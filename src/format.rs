//! Number and section formatting shared by the printed report and the summary file.

/// Width of the `=` rules framing each report section
pub const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// `$1234.50`
pub fn usd(value: f64) -> String {
    format!("${:.2}", value)
}

/// `$1,234,567.89`
pub fn usd_thousands(value: f64) -> String {
    format!("${}", thousands(value))
}

/// A fraction as a percentage with up to two decimals: `0.07` -> `7`, `0.125` -> `12.5`
pub fn percent(fraction: f64) -> String {
    let fixed = format!("{:.2}", fraction * 100.0);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Formats `value` with two decimals and `,` between groups of three integer digits.
pub fn thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" reads as noise after rounding
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integer_digits() {
        assert_eq!(thousands(0.0), "0.00");
        assert_eq!(thousands(999.999), "1,000.00");
        assert_eq!(thousands(1234.5), "1,234.50");
        assert_eq!(thousands(2666.666_666), "2,666.67");
        assert_eq!(thousands(1_234_567.891), "1,234,567.89");
        assert_eq!(thousands(-45_000.0), "-45,000.00");
        assert_eq!(thousands(-0.001), "0.00");
    }

    #[test]
    fn percentages_drop_float_noise() {
        assert_eq!(percent(0.07), "7");
        assert_eq!(percent(0.10), "10");
        assert_eq!(percent(0.125), "12.5");
        assert_eq!(percent(0.333_333), "33.33");
        assert_eq!(percent(0.0), "0");
    }

    #[test]
    fn currency_prefixes() {
        assert_eq!(usd(216.666_666), "$216.67");
        assert_eq!(usd(1234.0), "$1234.00");
        assert_eq!(usd_thousands(1234.0), "$1,234.00");
    }
}
