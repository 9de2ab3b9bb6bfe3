//! Decoding of `PROPDMGEXP` / `CROPDMGEXP` exponent codes.
//!
//! The exponent columns mix letter multipliers (`K`, `M`, `B`, `H`),
//! placeholder symbols, and plain digits. Each code is parsed into an
//! [`ExponentCode`] before any arithmetic happens.

use crate::types::WorkingRecord;
use log::{info, warn};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Digit codes outside this range are treated as invalid. The source data
/// only carries 0-8; larger powers overflow the magnitude into infinity.
pub const NUMERIC_EXPONENTS: RangeInclusive<i32> = 0..=15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExponentCode {
    /// Letter multiplier or placeholder symbol with its power of ten.
    Named { code: String, exponent: i32 },
    /// Digit string that already is the exponent.
    Numeric(i32),
    Invalid(String),
}

impl ExponentCode {
    pub fn parse(raw: &str) -> Self {
        let code = raw.trim();
        let named = match code {
            "m" | "M" => Some(6),
            "k" | "K" => Some(3),
            "b" | "B" => Some(9),
            "h" | "H" => Some(2),
            "?" | "-" | "+" | "" => Some(0),
            _ => None,
        };
        if let Some(exponent) = named {
            return ExponentCode::Named {
                code: code.to_string(),
                exponent,
            };
        }
        match code.parse::<i32>() {
            Ok(exponent) if NUMERIC_EXPONENTS.contains(&exponent) => {
                ExponentCode::Numeric(exponent)
            }
            _ => ExponentCode::Invalid(code.to_string()),
        }
    }

    pub fn exponent(&self) -> Option<i32> {
        match self {
            ExponentCode::Named { exponent, .. } => Some(*exponent),
            ExponentCode::Numeric(exponent) => Some(*exponent),
            ExponentCode::Invalid(_) => None,
        }
    }
}

/// `magnitude * 10^exponent`, or `None` when the code is invalid or the
/// product is not a finite number.
pub fn damage_total(magnitude: f64, code: &str) -> Option<f64> {
    let exponent = ExponentCode::parse(code).exponent()?;
    let total = magnitude * 10f64.powi(exponent);
    total.is_finite().then_some(total)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageReport {
    pub invalid_property: usize,
    pub invalid_crop: usize,
}

/// Fill in `property_damage_total` and `crop_damage_total` for every record.
/// Records with an invalid code keep `None` for that metric and are
/// excluded from its ranking.
pub fn resolve_damages(records: &mut [WorkingRecord]) -> DamageReport {
    let mut report = DamageReport::default();
    let mut warned: HashSet<String> = HashSet::new();

    for r in records.iter_mut() {
        r.property_damage_total = damage_total(r.property_damage, &r.property_damage_exp);
        if r.property_damage_total.is_none() {
            report.invalid_property += 1;
            if warned.insert(r.property_damage_exp.clone()) {
                warn!("Unrecognized exponent code {:?}", r.property_damage_exp);
            }
        }
        r.crop_damage_total = damage_total(r.crop_damage, &r.crop_damage_exp);
        if r.crop_damage_total.is_none() {
            report.invalid_crop += 1;
            if warned.insert(r.crop_damage_exp.clone()) {
                warn!("Unrecognized exponent code {:?}", r.crop_damage_exp);
            }
        }
    }

    info!(
        "Resolved damage totals ({} property, {} crop records with invalid exponent codes)",
        report.invalid_property, report.invalid_crop
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_code_class() {
        let cases = [
            ("m", 6),
            ("M", 6),
            ("k", 3),
            ("K", 3),
            ("b", 9),
            ("B", 9),
            ("h", 2),
            ("H", 2),
            ("?", 0),
            ("-", 0),
            ("+", 0),
            ("", 0),
            ("0", 0),
            ("3", 3),
            ("8", 8),
        ];
        for (code, exponent) in cases {
            assert_eq!(
                ExponentCode::parse(code).exponent(),
                Some(exponent),
                "code {:?}",
                code
            );
        }
    }

    #[test]
    fn digits_parse_as_numeric_and_letters_as_named() {
        assert_eq!(ExponentCode::parse("5"), ExponentCode::Numeric(5));
        assert_eq!(
            ExponentCode::parse(" K "),
            ExponentCode::Named {
                code: "K".to_string(),
                exponent: 3
            }
        );
    }

    #[test]
    fn unknown_codes_are_invalid() {
        assert_eq!(ExponentCode::parse("X"), ExponentCode::Invalid("X".to_string()));
        assert_eq!(ExponentCode::parse("KK").exponent(), None);
        assert_eq!(damage_total(10.0, "X"), None);
    }

    #[test]
    fn out_of_range_digit_codes_are_invalid() {
        assert_eq!(ExponentCode::parse("15"), ExponentCode::Numeric(15));
        assert_eq!(ExponentCode::parse("16"), ExponentCode::Invalid("16".to_string()));
        assert_eq!(ExponentCode::parse("400").exponent(), None);
        assert_eq!(ExponentCode::parse("-3").exponent(), None);
        assert_eq!(damage_total(0.0, "400"), None);
        assert_eq!(damage_total(f64::MAX, "15"), None);
    }

    #[test]
    fn totals_scale_by_power_of_ten() {
        assert_eq!(damage_total(10.0, "K"), Some(10_000.0));
        assert_eq!(damage_total(2.5, "M"), Some(2_500_000.0));
        assert_eq!(damage_total(1.0, "B"), Some(1e9));
        assert_eq!(damage_total(7.0, "h"), Some(700.0));
        assert_eq!(damage_total(4.0, ""), Some(4.0));
        assert_eq!(damage_total(4.0, "2"), Some(400.0));
    }

    #[test]
    fn resolve_counts_invalid_codes_per_metric() {
        let base = WorkingRecord {
            begin_date: "6/1/1999".to_string(),
            year: Some(1999),
            event_type: "Hail".to_string(),
            fatalities: 0.0,
            injuries: 0.0,
            property_damage: 10.0,
            property_damage_exp: "K".to_string(),
            crop_damage: 2.0,
            crop_damage_exp: "M".to_string(),
            property_damage_total: None,
            crop_damage_total: None,
        };
        let mut records = vec![
            base.clone(),
            WorkingRecord {
                crop_damage_exp: "X".to_string(),
                ..base.clone()
            },
        ];
        let report = resolve_damages(&mut records);

        assert_eq!(records[0].property_damage_total, Some(10_000.0));
        assert_eq!(records[0].crop_damage_total, Some(2_000_000.0));
        assert_eq!(records[1].property_damage_total, Some(10_000.0));
        assert_eq!(records[1].crop_damage_total, None);
        assert_eq!(
            report,
            DamageReport {
                invalid_property: 0,
                invalid_crop: 1
            }
        );
    }
}
