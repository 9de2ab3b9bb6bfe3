//! Column projection and the year / impact / placeholder filters.
//!
//! The three retention predicates are evaluated together for each record;
//! a dropped record may therefore be counted under more than one reason.

use crate::config::{is_excluded_event_type, PipelineConfig, DATE_FORMAT};
use crate::types::{RawRecord, WorkingRecord};
use chrono::{Datelike, NaiveDate};
use log::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub input_rows: usize,
    pub retained_rows: usize,
    pub unknown_year: usize,
    pub out_of_range: usize,
    pub zero_impact: usize,
    pub excluded_event_type: usize,
}

/// Calendar year of a `BGN_DATE` such as `4/18/1950 0:00:00`. Only the
/// leading date token is parsed; anything unparseable gives `None`.
pub fn parse_year(begin_date: &str) -> Option<i32> {
    let date = begin_date.split_whitespace().next()?;
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .ok()
        .map(|d| d.year())
}

pub fn project(raw: &RawRecord) -> WorkingRecord {
    WorkingRecord {
        begin_date: raw.begin_date.clone(),
        year: parse_year(&raw.begin_date),
        event_type: raw.event_type.trim().to_string(),
        fatalities: raw.fatalities,
        injuries: raw.injuries,
        property_damage: raw.property_damage,
        property_damage_exp: raw.property_damage_exp.clone(),
        crop_damage: raw.crop_damage,
        crop_damage_exp: raw.crop_damage_exp.clone(),
        property_damage_total: None,
        crop_damage_total: None,
    }
}

pub fn project_and_filter(
    records: &[RawRecord],
    config: &PipelineConfig,
) -> (Vec<WorkingRecord>, FilterReport) {
    let range = config.year_range();
    let mut report = FilterReport {
        input_rows: records.len(),
        ..FilterReport::default()
    };

    let mut working = Vec::new();
    for raw in records {
        let record = project(raw);

        let in_range = match record.year {
            Some(y) => range.contains(&y),
            None => {
                report.unknown_year += 1;
                false
            }
        };
        if record.year.is_some() && !in_range {
            report.out_of_range += 1;
        }
        let has_impact = raw.has_impact();
        if !has_impact {
            report.zero_impact += 1;
        }
        let excluded = is_excluded_event_type(&record.event_type);
        if excluded {
            report.excluded_event_type += 1;
        }

        if in_range && has_impact && !excluded {
            working.push(record);
        }
    }

    report.retained_rows = working.len();
    info!(
        "Retained {} of {} records for {}-{} ({} unknown year, {} out of range, {} zero impact, {} placeholder type)",
        report.retained_rows,
        report.input_rows,
        config.year_min,
        config.year_max,
        report.unknown_year,
        report.out_of_range,
        report.zero_impact,
        report.excluded_event_type
    );
    (working, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, event: &str, fatalities: f64, prop: f64) -> RawRecord {
        RawRecord {
            begin_date: date.to_string(),
            event_type: event.to_string(),
            fatalities,
            injuries: 0.0,
            property_damage: prop,
            property_damage_exp: "K".to_string(),
            crop_damage: 0.0,
            crop_damage_exp: String::new(),
        }
    }

    #[test]
    fn year_comes_from_month_day_year() {
        assert_eq!(parse_year("6/1/1999"), Some(1999));
        assert_eq!(parse_year("4/18/1950 0:00:00"), Some(1950));
        assert_eq!(parse_year("12/31/2011"), Some(2011));
        assert_eq!(parse_year("1999-06-01"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("13/40/1999"), None);
    }

    #[test]
    fn projection_trims_event_type_and_leaves_raw_untouched() {
        let r = raw("6/1/1999", "  TSTM WIND ", 1.0, 0.0);
        let w = project(&r);
        assert_eq!(w.event_type, "TSTM WIND");
        assert_eq!(w.year, Some(1999));
        assert_eq!(r.event_type, "  TSTM WIND ");
    }

    #[test]
    fn keeps_only_in_range_impactful_known_types() {
        let records = vec![
            raw("6/1/1999", "TORNADO", 1.0, 0.0),
            raw("6/1/1981", "TORNADO", 1.0, 0.0),
            raw("6/1/2012", "TORNADO", 1.0, 0.0),
            raw("1/1/1982", "HAIL", 0.0, 5.0),
            raw("12/31/2011", "HAIL", 0.0, 0.0),
            raw("not a date", "HAIL", 3.0, 0.0),
            raw("6/1/1999", "Other", 2.0, 0.0),
            raw("6/1/1999", "?", 0.0, 0.0),
        ];
        let (working, report) = project_and_filter(&records, &PipelineConfig::default());

        assert_eq!(working.len(), 2);
        assert_eq!(working[0].event_type, "TORNADO");
        assert_eq!(working[1].year, Some(1982));
        for w in &working {
            let y = w.year.unwrap();
            assert!((1982..=2011).contains(&y));
        }
        assert_eq!(report.input_rows, 8);
        assert_eq!(report.retained_rows, 2);
        assert_eq!(report.unknown_year, 1);
        assert_eq!(report.out_of_range, 2);
        assert_eq!(report.zero_impact, 2);
        assert_eq!(report.excluded_event_type, 2);
    }

    #[test]
    fn zero_impact_placeholder_is_dropped() {
        let records = vec![raw("6/1/1999", "?", 0.0, 0.0)];
        let (working, report) = project_and_filter(&records, &PipelineConfig::default());
        assert!(working.is_empty());
        assert_eq!(report.zero_impact, 1);
    }
}
