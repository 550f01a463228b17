//! Boarding-time ceiling.

use edq_model::{CleaningOptions, Record, RecordSet, StageKind, StageReport};

/// Clamp boarding times above the cap down to exactly the cap.
///
/// Ceiling only: missing and negative values pass through unchanged.
pub fn cap_boarding_time(set: &mut RecordSet, options: &CleaningOptions) -> StageReport {
    let mut report = StageReport::new(StageKind::BoardingCap, set.len());
    let cap = options.boarding_cap_minutes;
    for record in set.records_mut() {
        if cap_record(record, cap) {
            report.cells_rewritten += 1;
        }
    }
    let capped = report.cells_rewritten;
    report.with_detail("capped", capped)
}

/// Returns true when the value was clamped.
pub(super) fn cap_record(record: &mut Record, cap: f64) -> bool {
    if let Some(minutes) = record.boarding_minutes
        && minutes > cap
    {
        record.boarding_minutes = Some(cap);
        return true;
    }
    false
}
