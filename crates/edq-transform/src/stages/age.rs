//! Age range filter.

use edq_model::{CleaningOptions, RecordSet, StageKind, StageReport};

/// Keep rows whose age lies in the inclusive configured range.
///
/// Missing ages fail the comparison and are dropped; there is no imputation.
pub fn filter_age_range(set: &mut RecordSet, options: &CleaningOptions) -> StageReport {
    let mut report = StageReport::new(StageKind::AgeRange, set.len());
    let (min, max) = (options.age_min, options.age_max);
    report.rows_dropped =
        set.retain(|record| record.age.is_some_and(|age| age >= min && age <= max));
    report
}
