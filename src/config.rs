//! Constants and pipeline configuration.

use crate::error::ConfigError;
use std::ops::RangeInclusive;

/// First year kept. Earlier years form a sparse tail (below the 10th
/// percentile of the year distribution) recording mostly tornadoes.
pub const YEAR_MIN: i32 = 1982;
pub const YEAR_MAX: i32 = 2011;

/// `BGN_DATE` format, month/day/4-digit year.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

pub const DEFAULT_TOP_N: usize = 10;

/// Event types meaning "unknown"; compared case-insensitively after trimming.
pub const EXCLUDED_EVENT_TYPES: &[&str] = &["other", "?"];

pub const DEFAULT_INPUT_FILE: &str = "repdata_StormData.csv";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub year_min: i32,
    pub year_max: i32,
    pub top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            year_min: YEAR_MIN,
            year_max: YEAR_MAX,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl PipelineConfig {
    pub fn year_range(&self) -> RangeInclusive<i32> {
        self.year_min..=self.year_max
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.year_min > self.year_max {
            return Err(ConfigError::InvertedYearRange {
                min: self.year_min,
                max: self.year_max,
            });
        }
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        Ok(())
    }
}

/// True when the event type is one of the "unknown" placeholders.
pub fn is_excluded_event_type(event_type: &str) -> bool {
    let t = event_type.trim();
    EXCLUDED_EVENT_TYPES
        .iter()
        .any(|excluded| t.eq_ignore_ascii_case(excluded))
}
