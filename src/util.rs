// Utility helpers for parsing and basic statistics.
//
// This module centralizes the "dirty" CSV/number handling so the rest of
// the code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok()
}

/// Nearest-rank quantile of a list of integers, `q` in `[0, 1]`.
pub fn quantile(mut v: Vec<i32>, q: f64) -> Option<i32> {
    if v.is_empty() {
        return None;
    }
    v.sort_unstable();
    let q = q.clamp(0.0, 1.0);
    let rank = (q * v.len() as f64).ceil() as usize;
    let idx = rank.saturating_sub(1).min(v.len() - 1);
    Some(v[idx])
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals with locale-aware thousands separators (`1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Damage totals can exceed i64 when exponents are large.
    let mut res = match int_part.parse::<u128>() {
        Ok(v) => v.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_with_separators() {
        assert_eq!(parse_f64_safe(Some(" 1,250.5 ")), Some(1250.5));
        assert_eq!(parse_f64_safe(Some("0")), Some(0.0));
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(Some("K")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn quantile_uses_nearest_rank() {
        let years: Vec<i32> = (1950..=2011).collect();
        assert_eq!(quantile(years, 0.1), Some(1956));
        assert_eq!(quantile(vec![], 0.1), None);
        assert_eq!(quantile(vec![3, 1, 2], 0.0), Some(1));
        assert_eq!(quantile(vec![3, 1, 2], 1.0), Some(3));
    }

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(10000.0, 0), "10,000");
        assert_eq!(format_number(-5.5, 1), "-5.5");
        assert_eq!(format_int(9855u64), "9,855");
    }
}
