// Entry point and high-level CLI flow.
//
// Two steps, run back to back:
// - load the storm event CSV, printing diagnostics;
// - run the cleaning pipeline, write the four rankings and a JSON summary,
//   and print a preview of each ranking.
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::{Path, PathBuf};

use storm_report::config::{
    PipelineConfig, DEFAULT_INPUT_FILE, DEFAULT_TOP_N, SUMMARY_FILE, YEAR_MAX, YEAR_MIN,
};
use storm_report::loader::{self, LoadReport};
use storm_report::pipeline::run_pipeline;
use storm_report::types::RawRecord;
use storm_report::{output, reports, util};

/// Rank storm event types by health and economic impact
#[derive(Parser, Debug)]
#[command(name = "storm_report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Storm data CSV (decompressed)
    #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Directory for the ranking CSVs and summary.json
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Rows shown in each preview
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// First year kept
    #[arg(long, default_value_t = YEAR_MIN)]
    year_min: i32,

    /// Last year kept
    #[arg(long, default_value_t = YEAR_MAX)]
    year_max: i32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Load the CSV and print a short summary of what happened.
fn handle_load(path: &Path) -> Result<(Vec<RawRecord>, LoadReport)> {
    let (records, report) = loader::load_records(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    println!(
        "Processing dataset... ({} rows read, {} loaded)",
        util::format_int(report.total_rows),
        util::format_int(report.loaded_rows)
    );
    if report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse errors.",
            util::format_int(report.parse_errors)
        );
    }
    println!();
    Ok((records, report))
}

/// Run the pipeline, write every ranking and the summary, print previews.
fn handle_generate_reports(
    raw: &[RawRecord],
    load_report: &LoadReport,
    config: &PipelineConfig,
    out_dir: &Path,
) -> Result<()> {
    let out = run_pipeline(raw, config);
    println!(
        "Kept {} events from {}-{} with recorded harm.",
        util::format_int(out.filter.retained_rows),
        config.year_min,
        config.year_max
    );
    println!(
        "{} raw event types collapsed into {} labels.\n",
        util::format_int(out.canonicalize.distinct_before),
        util::format_int(out.canonicalize.distinct_after)
    );

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let note = format!("{}-{} events", config.year_min, config.year_max);
    for table in &out.rankings {
        let file = out_dir.join(table.metric.file_name());
        output::write_csv(&file, &table.rows)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        output::preview_ranking(table, config.top_n, &note);
        println!("(Full table exported to {})\n", file.display());
    }

    let summary = reports::generate_summary(
        raw,
        &out.records,
        load_report,
        &out.canonicalize,
        &out.damage,
    );
    let summary_path = out_dir.join(SUMMARY_FILE);
    output::write_json(&summary_path, &summary)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;
    println!("Summary Stats ({}):", summary_path.display());
    println!(
        "{{\"total_property_damage\": {}, \"total_crop_damage\": {}}}\n",
        util::format_number(summary.total_property_damage, 2),
        util::format_number(summary.total_crop_damage, 2)
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = PipelineConfig {
        year_min: cli.year_min,
        year_max: cli.year_max,
        top_n: cli.top,
    };
    config.validate().context("Invalid configuration")?;

    let (raw, load_report) = handle_load(&cli.input)?;
    handle_generate_reports(&raw, &load_report, &config, &cli.output_dir)
}
