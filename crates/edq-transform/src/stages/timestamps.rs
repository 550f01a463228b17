//! Timestamp normalization, arrival imputation and triage ordering.
//!
//! Order matters within the stage: parsing runs first so that unparseable
//! text counts as absent, arrival imputation runs before the anchor check,
//! and the triage correction only sees records that still have an arrival.

use edq_model::{Cell, CleaningOptions, Record, RecordSet, StageKind, StageReport};
use tracing::trace;

use crate::normalization::parse_timestamp;

#[derive(Debug, Default)]
struct TimestampCounts {
    unparseable: usize,
    arrival_imputed: usize,
    triage_corrected: usize,
}

/// Parse the three timestamps, impute missing arrivals from triage, drop
/// rows with no temporal anchor and move triage after arrival when it
/// precedes it.
pub fn normalize_timestamps(set: &mut RecordSet, options: &CleaningOptions) -> StageReport {
    let mut report = StageReport::new(StageKind::Timestamps, set.len());
    let mut counts = TimestampCounts::default();

    for record in set.records_mut() {
        counts.unparseable += parse_fields(record);
        if impute_arrival(record, options) {
            counts.arrival_imputed += 1;
        }
    }

    report.rows_dropped = set.retain(|record| record.time_arrival.is_present());

    for (idx, record) in set.records_mut().iter_mut().enumerate() {
        if correct_triage(record, options) {
            trace!(row = idx, "triage moved after arrival");
            counts.triage_corrected += 1;
        }
    }

    report.cells_rewritten = counts.arrival_imputed + counts.triage_corrected;
    report
        .with_detail("unparseable", counts.unparseable)
        .with_detail("arrival_imputed", counts.arrival_imputed)
        .with_detail("triage_corrected", counts.triage_corrected)
}

/// Resolve raw timestamp text. Returns the number of values blanked.
pub(super) fn parse_fields(record: &mut Record) -> usize {
    [
        &mut record.time_arrival,
        &mut record.time_triage,
        &mut record.time_doc_seen,
    ]
    .into_iter()
    .map(|cell| usize::from(cell.resolve_with(parse_timestamp)))
    .sum()
}

/// Arrival is taken as a fixed offset before triage when the source lacks it.
pub(super) fn impute_arrival(record: &mut Record, options: &CleaningOptions) -> bool {
    if record.time_arrival.is_present() {
        return false;
    }
    let Some(triage) = record.time_triage.value() else {
        return false;
    };
    match triage.checked_sub_signed(options.arrival_offset()) {
        Some(arrival) => {
            record.time_arrival = Cell::Value(arrival);
            true
        }
        None => false,
    }
}

/// Triage before arrival is rewritten to shortly after arrival.
pub(super) fn correct_triage(record: &mut Record, options: &CleaningOptions) -> bool {
    let (Some(arrival), Some(triage)) = (record.time_arrival.value(), record.time_triage.value())
    else {
        return false;
    };
    if triage >= arrival {
        return false;
    }
    match arrival.checked_add_signed(options.triage_correction()) {
        Some(corrected) => {
            record.time_triage = Cell::Value(corrected);
            true
        }
        None => false,
    }
}
