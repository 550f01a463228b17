//! Missing acuity and patient key backfill.

use edq_model::{CleaningOptions, Record, RecordSet, StageKind, StageReport};

/// Fill missing acuity with the default level and missing patient keys with
/// the sentinel. Never drops rows.
pub fn backfill_defaults(set: &mut RecordSet, options: &CleaningOptions) -> StageReport {
    let mut report = StageReport::new(StageKind::Backfill, set.len());
    let mut acuity_filled = 0usize;
    let mut key_filled = 0usize;
    for record in set.records_mut() {
        let (acuity, key) = backfill_record(record, options);
        acuity_filled += usize::from(acuity);
        key_filled += usize::from(key);
    }
    report.cells_rewritten = acuity_filled + key_filled;
    report
        .with_detail("acuity_defaulted", acuity_filled)
        .with_detail("patient_key_defaulted", key_filled)
}

/// Fill one record. Returns which of acuity and patient key were filled.
pub(super) fn backfill_record(record: &mut Record, options: &CleaningOptions) -> (bool, bool) {
    (
        record.acuity.fill(options.default_acuity),
        record.patient_key.fill(options.missing_patient_key),
    )
}
