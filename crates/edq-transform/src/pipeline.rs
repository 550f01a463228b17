//! Ordered cleaning pipeline for ED visit record sets.
//!
//! Stages run in a fixed order because later stages rely on what earlier
//! ones established:
//!
//! 1. **Deduplicate**: first, so duplicate rows are never counted twice
//! 2. **Timestamps**: parse, impute arrival, drop unanchored rows, fix triage
//! 3. **Gender**: standardize, drop unmapped categories
//! 4. **Age range**: drop ages outside the valid range
//! 5. **Backfill**: default acuity and patient key
//! 6. **Boarding cap**: clamp boarding time to the ceiling
//! 7. **LWBS flag**: derive from `time_doc_seen` after it has been parsed
//!
//! # Example
//!
//! ```ignore
//! use edq_model::CleaningOptions;
//! use edq_transform::CleaningPipeline;
//!
//! let pipeline = CleaningPipeline::new(CleaningOptions::default());
//! let (clean, report) = pipeline.run(records);
//! println!("{} rows kept", report.final_rows);
//! ```

use std::time::Instant;

use tracing::{debug, info, info_span};

use edq_model::{CleaningOptions, PipelineReport, RecordSet, StageKind, StageReport};

use crate::stages::{
    backfill_defaults, cap_boarding_time, derive_lwbs_flag, filter_age_range,
    normalize_timestamps, remove_duplicates, standardize_genders,
};

/// Execution order of the stages.
pub const STAGE_ORDER: [StageKind; 7] = [
    StageKind::Deduplicate,
    StageKind::Timestamps,
    StageKind::Gender,
    StageKind::AgeRange,
    StageKind::Backfill,
    StageKind::BoardingCap,
    StageKind::LwbsFlag,
];

/// Runs every cleaning stage over a record set.
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    options: CleaningOptions,
}

impl CleaningPipeline {
    pub fn new(options: CleaningOptions) -> Self {
        Self { options }
    }

    /// Apply all stages in order, returning the cleaned set and its counts.
    pub fn run(&self, mut records: RecordSet) -> (RecordSet, PipelineReport) {
        let report = self.run_in_place(&mut records);
        (records, report)
    }

    /// Apply all stages in order to a record set owned by the caller.
    pub fn run_in_place(&self, records: &mut RecordSet) -> PipelineReport {
        let span = info_span!("clean", rows = records.len());
        let _guard = span.enter();
        let start = Instant::now();

        let mut report = PipelineReport::new(records.len());
        for stage in STAGE_ORDER {
            report.push(run_stage(stage, records, &self.options));
        }

        info!(
            initial_rows = report.initial_rows,
            final_rows = report.final_rows,
            duplicates_removed = report.duplicates_removed(),
            gender_rejected = report.gender_rejected(),
            lwbs = report.lwbs_count(),
            duration_ms = start.elapsed().as_millis(),
            "cleaning complete"
        );
        report
    }
}

/// Run a single stage with its own span and timing.
pub fn run_stage(
    stage: StageKind,
    records: &mut RecordSet,
    options: &CleaningOptions,
) -> StageReport {
    info_span!("stage", stage = %stage).in_scope(|| {
        let start = Instant::now();
        let report = match stage {
            StageKind::Deduplicate => remove_duplicates(records, options),
            StageKind::Timestamps => normalize_timestamps(records, options),
            StageKind::Gender => standardize_genders(records),
            StageKind::AgeRange => filter_age_range(records, options),
            StageKind::Backfill => backfill_defaults(records, options),
            StageKind::BoardingCap => cap_boarding_time(records, options),
            StageKind::LwbsFlag => derive_lwbs_flag(records),
        };
        info!(
            rows_in = report.rows_in,
            rows_dropped = report.rows_dropped,
            cells_rewritten = report.cells_rewritten,
            "stage complete"
        );
        for (name, count) in &report.details {
            debug!(counter = %name, count = *count, "stage detail");
        }
        debug!(duration_ms = start.elapsed().as_millis(), "stage timing");
        report
    })
}

/// Convenience wrapper for a one-off run.
pub fn clean_records(
    records: RecordSet,
    options: &CleaningOptions,
) -> (RecordSet, PipelineReport) {
    CleaningPipeline::new(options.clone()).run(records)
}
