use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One CSV row as it appears in the storm data file. Everything is read as
/// text and parsed by the loader so bad numbers can be counted, not fatal.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "BGN_DATE")]
    pub begin_date: Option<String>,
    #[serde(rename = "EVTYPE")]
    pub event_type: Option<String>,
    #[serde(rename = "FATALITIES")]
    pub fatalities: Option<String>,
    #[serde(rename = "INJURIES")]
    pub injuries: Option<String>,
    #[serde(rename = "PROPDMG")]
    pub property_damage: Option<String>,
    #[serde(rename = "PROPDMGEXP")]
    pub property_damage_exp: Option<String>,
    #[serde(rename = "CROPDMG")]
    pub crop_damage: Option<String>,
    #[serde(rename = "CROPDMGEXP")]
    pub crop_damage_exp: Option<String>,
}

/// Typed storm event as produced by the loader. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub begin_date: String,
    pub event_type: String,
    pub fatalities: f64,
    pub injuries: f64,
    pub property_damage: f64,
    pub property_damage_exp: String,
    pub crop_damage: f64,
    pub crop_damage_exp: String,
}

impl RawRecord {
    /// At least one of the four impact fields is strictly positive.
    pub fn has_impact(&self) -> bool {
        self.fatalities > 0.0
            || self.injuries > 0.0
            || self.property_damage > 0.0
            || self.crop_damage > 0.0
    }
}

/// A record in the working set. `event_type` is rewritten by the
/// canonicalizer and the damage totals are filled in by the resolver;
/// a `None` total after resolution means the exponent code was invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingRecord {
    pub begin_date: String,
    pub year: Option<i32>,
    pub event_type: String,
    pub fatalities: f64,
    pub injuries: f64,
    pub property_damage: f64,
    pub property_damage_exp: String,
    pub crop_damage: f64,
    pub crop_damage_exp: String,
    pub property_damage_total: Option<f64>,
    pub crop_damage_total: Option<f64>,
}

/// One (event type, total) pair of a ranked table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    #[serde(rename = "EventType")]
    pub event_type: String,
    #[serde(rename = "Total")]
    pub total: f64,
}

/// Display form of a ranked row used for console previews.
#[derive(Debug, Clone, Tabled)]
pub struct RankingPreviewRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "EventType")]
    pub event_type: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Bar")]
    pub bar: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_rows: usize,
    pub retained_rows: usize,
    pub year_p10: Option<i32>,
    pub distinct_raw_event_types: usize,
    pub distinct_event_types: usize,
    pub uncanonicalized_records: usize,
    pub total_fatalities: f64,
    pub total_injuries: f64,
    pub total_property_damage: f64,
    pub total_crop_damage: f64,
    pub excluded_property_damage: usize,
    pub excluded_crop_damage: usize,
}
