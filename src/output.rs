use crate::error::OutputError;
use crate::reports::RankedTable;
use crate::types::RankingPreviewRow;
use crate::util::format_number;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table};

const BAR_WIDTH: usize = 30;

pub fn write_csv<T: Serialize, P: AsRef<Path>>(path: P, rows: &[T]) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<(), OutputError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Top `n` rows as display rows, with a text bar scaled to the largest total.
pub fn preview_rows(table: &RankedTable, n: usize) -> Vec<RankingPreviewRow> {
    let rows = table.top(n);
    let max = rows.first().map(|r| r.total).unwrap_or(0.0);
    let decimals = if table.metric.is_currency() { 2 } else { 0 };
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let width = if max > 0.0 {
                ((row.total / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            RankingPreviewRow {
                rank: idx + 1,
                event_type: row.event_type.clone(),
                total: format_number(row.total, decimals),
                bar: "#".repeat(width),
            }
        })
        .collect()
}

pub fn render_ranking(table: &RankedTable, n: usize) -> String {
    let rows = preview_rows(table, n);
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows).with(Style::markdown()).to_string()
}

pub fn preview_ranking(table: &RankedTable, n: usize, note: &str) {
    println!("{}", table.metric.title());
    println!("(Top {}, {})\n", n, note);
    println!("{}\n", render_ranking(table, n));
    if table.excluded > 0 {
        println!(
            "Note: {} records excluded for invalid exponent codes.\n",
            table.excluded
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::Metric;
    use crate::types::RankedRow;

    fn table() -> RankedTable {
        RankedTable {
            metric: Metric::PropertyDamage,
            rows: vec![
                RankedRow {
                    event_type: "Flooding".to_string(),
                    total: 2_000_000.0,
                },
                RankedRow {
                    event_type: "Hail".to_string(),
                    total: 1_000_000.0,
                },
            ],
            excluded: 0,
        }
    }

    #[test]
    fn preview_scales_bars_to_leader() {
        let rows = preview_rows(&table(), 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].total, "2,000,000.00");
        assert_eq!(rows[0].bar.len(), BAR_WIDTH);
        assert_eq!(rows[1].bar.len(), BAR_WIDTH / 2);
    }

    #[test]
    fn render_includes_event_types() {
        let s = render_ranking(&table(), 1);
        assert!(s.contains("Flooding"));
        assert!(!s.contains("Hail"));
        assert!(s.contains("| Bar"));
    }

    #[test]
    fn render_empty_table() {
        let empty = RankedTable {
            metric: Metric::Injuries,
            rows: vec![],
            excluded: 0,
        };
        assert_eq!(render_ranking(&empty, 10), "(no rows)");
    }
}
