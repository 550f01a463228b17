//! Left-without-being-seen flag.

use edq_model::{Record, RecordSet, StageKind, StageReport};

/// Set `lwbs_flag` from the absence of a clinician-seen timestamp.
pub fn derive_lwbs_flag(set: &mut RecordSet) -> StageReport {
    let mut report = StageReport::new(StageKind::LwbsFlag, set.len());
    let mut lwbs = 0usize;
    for record in set.records_mut() {
        if flag_record(record) {
            lwbs += 1;
        }
    }
    report.cells_rewritten = set.len();
    report.with_detail("lwbs", lwbs)
}

/// Set the flag on one record and return it.
pub(super) fn flag_record(record: &mut Record) -> bool {
    let left = record.time_doc_seen.is_absent();
    record.lwbs_flag = Some(left);
    left
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use edq_model::{Cell, Schema};

    use super::*;

    #[test]
    fn flag_tracks_doc_seen_absence() {
        let seen = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut set = RecordSet::new(
            Schema::canonical(),
            vec![
                Record::default(),
                Record {
                    time_doc_seen: Cell::Value(seen),
                    ..Record::default()
                },
            ],
        );
        let report = derive_lwbs_flag(&mut set);

        assert_eq!(report.detail("lwbs"), Some(1));
        assert_eq!(set.records()[0].lwbs_flag, Some(true));
        assert_eq!(set.records()[1].lwbs_flag, Some(false));
    }
}
