//! Gender standardization with exclusion of unmapped categories.

use edq_model::{Cell, RecordSet, StageKind, StageReport};

use crate::normalization::standardize_gender;

/// Map gender text to `Male`/`Female` and drop every row that does not map.
pub fn standardize_genders(set: &mut RecordSet) -> StageReport {
    let mut report = StageReport::new(StageKind::Gender, set.len());
    for record in set.records_mut() {
        if let Cell::Raw(text) = &record.gender {
            let canonical = standardize_gender(text);
            if canonical.is_some_and(|gender| gender.as_str() != text.as_str()) {
                report.cells_rewritten += 1;
            }
            record.gender = canonical.map_or(Cell::Absent, Cell::Value);
        }
    }
    let rejected = set.retain(|record| record.gender.value().is_some());
    report.rows_dropped = rejected;
    report.with_detail("rejected", rejected)
}
