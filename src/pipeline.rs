//! Sequential batch pipeline: project/filter, canonicalize, resolve
//! damages, aggregate. Every stage runs over the whole working set before
//! the next one starts; nothing is mutated after aggregation.

use crate::canonicalize::{canonicalize, CanonicalizeReport};
use crate::config::PipelineConfig;
use crate::damage::{resolve_damages, DamageReport};
use crate::filter::{project_and_filter, FilterReport};
use crate::reports::{generate_rankings, RankedTable};
use crate::types::{RawRecord, WorkingRecord};
use log::info;

#[derive(Debug)]
pub struct PipelineOutput {
    pub records: Vec<WorkingRecord>,
    pub rankings: Vec<RankedTable>,
    pub filter: FilterReport,
    pub canonicalize: CanonicalizeReport,
    pub damage: DamageReport,
}

pub fn run_pipeline(raw: &[RawRecord], config: &PipelineConfig) -> PipelineOutput {
    let (mut records, filter) = project_and_filter(raw, config);
    let canonicalize = canonicalize(&mut records);
    let damage = resolve_damages(&mut records);
    let rankings = generate_rankings(&records);
    info!(
        "Pipeline finished: {} records across {} event types",
        records.len(),
        canonicalize.distinct_after
    );
    PipelineOutput {
        records,
        rankings,
        filter,
        canonicalize,
        damage,
    }
}
