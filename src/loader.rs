use crate::error::LoadError;
use crate::types::{RawRecord, RawRow};
use crate::util::parse_f64_safe;
use csv::ReaderBuilder;
use log::{info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

pub fn load_records<P: AsRef<Path>>(path: P) -> Result<(Vec<RawRecord>, LoadReport), LoadError> {
    let file = File::open(path.as_ref())?;
    info!("Loading storm events from {}", path.as_ref().display());
    load_records_from_reader(file)
}

/// Read storm events from any CSV source with the `BGN_DATE`, `EVTYPE`,
/// `FATALITIES`, `INJURIES`, `PROPDMG`, `PROPDMGEXP`, `CROPDMG` and
/// `CROPDMGEXP` columns. Rows that fail to parse are skipped and counted.
pub fn load_records_from_reader<R: Read>(
    reader: R,
) -> Result<(Vec<RawRecord>, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    // Fail early on a missing header rather than counting every row as bad.
    rdr.headers()?;

    let mut report = LoadReport::default();
    let mut records: Vec<RawRecord> = Vec::new();

    for (line, result) in rdr.deserialize::<RawRow>().enumerate() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping row {}: {}", line + 1, e);
                report.parse_errors += 1;
                continue;
            }
        };
        match to_record(row) {
            Some(r) => records.push(r),
            None => {
                warn!("Skipping row {}: missing or negative impact field", line + 1);
                report.parse_errors += 1;
            }
        }
    }

    report.loaded_rows = records.len();
    info!(
        "Loaded {} of {} rows ({} parse errors)",
        report.loaded_rows, report.total_rows, report.parse_errors
    );
    Ok((records, report))
}

/// Impact counts and damage magnitudes are never negative.
fn parse_impact(s: Option<&str>) -> Option<f64> {
    parse_f64_safe(s).filter(|v| *v >= 0.0)
}

fn to_record(row: RawRow) -> Option<RawRecord> {
    Some(RawRecord {
        fatalities: parse_impact(row.fatalities.as_deref())?,
        injuries: parse_impact(row.injuries.as_deref())?,
        property_damage: parse_impact(row.property_damage.as_deref())?,
        crop_damage: parse_impact(row.crop_damage.as_deref())?,
        begin_date: row.begin_date.unwrap_or_default(),
        event_type: row.event_type.unwrap_or_default(),
        property_damage_exp: row.property_damage_exp.unwrap_or_default(),
        crop_damage_exp: row.crop_damage_exp.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
STATE__,BGN_DATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP
1,4/18/1950 0:00:00,TORNADO,0,15,25,K,0,
1,6/1/1999 0:00:00,TSTM WIND,1,0,10,K,0,
1,6/2/1999 0:00:00,HAIL,oops,0,0,,0,
";

    #[test]
    fn loads_rows_and_counts_bad_numbers() {
        let (records, report) = load_records_from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.parse_errors, 1);
        assert_eq!(records[1].event_type, "TSTM WIND");
        assert_eq!(records[1].property_damage, 10.0);
        assert_eq!(records[1].property_damage_exp, "K");
        assert_eq!(records[0].crop_damage_exp, "");
    }

    #[test]
    fn negative_impact_counts_as_parse_error() {
        let csv = "\
BGN_DATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP
6/1/1999,HAIL,0,0,-5,K,0,
6/1/1999,HAIL,0,-1,5,K,0,
6/1/1999,HAIL,0,0,5,K,0,
";
        let (records, report) = load_records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(report.parse_errors, 2);
        assert_eq!(records[0].property_damage, 5.0);
    }

    #[test]
    fn empty_input_yields_no_records() {
        let csv = "BGN_DATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP\n";
        let (records, report) = load_records_from_reader(csv.as_bytes()).unwrap();
        assert!(records.is_empty());
        assert_eq!(report.total_rows, 0);
    }
}
