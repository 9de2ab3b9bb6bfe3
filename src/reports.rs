use crate::canonicalize::CanonicalizeReport;
use crate::damage::DamageReport;
use crate::loader::LoadReport;
use crate::types::{RankedRow, RawRecord, SummaryStats, WorkingRecord};
use crate::util::quantile;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Fatalities,
    Injuries,
    PropertyDamage,
    CropDamage,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Fatalities,
        Metric::Injuries,
        Metric::CropDamage,
        Metric::PropertyDamage,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Fatalities => "Fatalities by Event Type",
            Metric::Injuries => "Injuries by Event Type",
            Metric::PropertyDamage => "Property Damage (USD) by Event Type",
            Metric::CropDamage => "Crop Damage (USD) by Event Type",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Metric::Fatalities => "fatalities_by_event_type.csv",
            Metric::Injuries => "injuries_by_event_type.csv",
            Metric::PropertyDamage => "property_damage_by_event_type.csv",
            Metric::CropDamage => "crop_damage_by_event_type.csv",
        }
    }

    /// Counts are people, damages are dollars.
    pub fn is_currency(&self) -> bool {
        matches!(self, Metric::PropertyDamage | Metric::CropDamage)
    }

    /// `None` means the record carries an invalid damage total for this
    /// metric and must be left out of its sums.
    pub fn value(&self, r: &WorkingRecord) -> Option<f64> {
        match self {
            Metric::Fatalities => Some(r.fatalities),
            Metric::Injuries => Some(r.injuries),
            Metric::PropertyDamage => r.property_damage_total,
            Metric::CropDamage => r.crop_damage_total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedTable {
    pub metric: Metric,
    pub rows: Vec<RankedRow>,
    /// Records left out because their total for this metric was invalid.
    pub excluded: usize,
}

impl RankedTable {
    pub fn top(&self, n: usize) -> &[RankedRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn total(&self, event_type: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.event_type == event_type)
            .map(|row| row.total)
    }
}

/// Sum `metric` per event type and sort descending. Groups with equal
/// totals keep the order in which their event type first appeared.
pub fn rank_by(data: &[WorkingRecord], metric: Metric) -> RankedTable {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<RankedRow> = Vec::new();
    let mut excluded = 0usize;

    for r in data {
        let Some(value) = metric.value(r) else {
            excluded += 1;
            continue;
        };
        let slot = *index.entry(r.event_type.as_str()).or_insert_with(|| {
            rows.push(RankedRow {
                event_type: r.event_type.clone(),
                total: 0.0,
            });
            rows.len() - 1
        });
        rows[slot].total += value;
    }

    // `sort_by` is stable, which gives the encounter-order tie break.
    rows.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    RankedTable {
        metric,
        rows,
        excluded,
    }
}

pub fn generate_rankings(data: &[WorkingRecord]) -> Vec<RankedTable> {
    Metric::ALL.iter().map(|m| rank_by(data, *m)).collect()
}

pub fn generate_summary(
    raw: &[RawRecord],
    data: &[WorkingRecord],
    load: &LoadReport,
    canon: &CanonicalizeReport,
    damage: &DamageReport,
) -> SummaryStats {
    let years: Vec<i32> = raw
        .iter()
        .filter_map(|r| crate::filter::parse_year(&r.begin_date))
        .collect();
    let labels: HashSet<&str> = data.iter().map(|r| r.event_type.as_str()).collect();
    SummaryStats {
        total_rows: load.total_rows,
        retained_rows: data.len(),
        year_p10: quantile(years, 0.1),
        distinct_raw_event_types: canon.distinct_before,
        distinct_event_types: labels.len(),
        uncanonicalized_records: canon.uncanonicalized,
        total_fatalities: data.iter().map(|r| r.fatalities).sum(),
        total_injuries: data.iter().map(|r| r.injuries).sum(),
        total_property_damage: data.iter().filter_map(|r| r.property_damage_total).sum(),
        total_crop_damage: data.iter().filter_map(|r| r.crop_damage_total).sum(),
        excluded_property_damage: damage.invalid_property,
        excluded_crop_damage: damage.invalid_crop,
    }
}
