//! Duplicate removal.
//!
//! Two rows are duplicates when they would be written out identically. The
//! comparison key is the row as the later stages will leave it (timestamps
//! parsed, arrival imputed, triage corrected, gender standardized, defaults
//! filled, boarding capped, LWBS derived), built on a copy so the stored
//! record is untouched. Unmapped gender text stays raw in the key; those rows
//! are dropped by the gender stage and counted there.

use std::collections::BTreeSet;

use edq_model::{Cell, CleaningOptions, Record, RecordSet, StageKind, StageReport};

use super::backfill::backfill_record;
use super::boarding::cap_record;
use super::lwbs::flag_record;
use super::timestamps::{correct_triage, impute_arrival, parse_fields};
use crate::normalization::standardize_gender;

/// Drop records that clean to the same output row as an earlier record,
/// keeping the first occurrence. No cell is rewritten.
pub fn remove_duplicates(set: &mut RecordSet, options: &CleaningOptions) -> StageReport {
    let mut report = StageReport::new(StageKind::Deduplicate, set.len());
    let mut seen = BTreeSet::new();
    report.rows_dropped = set.retain(|record| seen.insert(cleaned_key(record, options)));
    report
}

/// Fingerprint of the row the remaining stages would produce.
fn cleaned_key(record: &Record, options: &CleaningOptions) -> Vec<String> {
    let mut projected = record.clone();
    parse_fields(&mut projected);
    impute_arrival(&mut projected, options);
    correct_triage(&mut projected, options);
    if let Cell::Raw(text) = &projected.gender
        && let Some(gender) = standardize_gender(text)
    {
        projected.gender = Cell::Value(gender);
    }
    backfill_record(&mut projected, options);
    cap_record(&mut projected, options.boarding_cap_minutes);
    flag_record(&mut projected);
    projected.fingerprint()
}
