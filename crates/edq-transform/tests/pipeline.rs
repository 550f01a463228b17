//! End-to-end tests for the cleaning pipeline on CSV extracts.

use std::path::Path;

use edq_ingest::read_records;
use edq_model::{CleaningOptions, Column, Gender, PipelineReport, RecordSet, StageKind};
use edq_transform::{CleaningPipeline, audit_records, clean_records};

const HEADER: &str = "Visit_ID,Time_Arrival,Time_Triage,Time_Doc_Seen,Gender,Age,ESI_Acuity,FK_Patient_ID,Boarding_Time_min";

fn load(rows: &[&str]) -> RecordSet {
    let text = format!("{HEADER}\n{}\n", rows.join("\n"));
    read_records(text.as_bytes(), Path::new("visits.csv")).unwrap()
}

fn clean(rows: &[&str]) -> (RecordSet, PipelineReport) {
    clean_records(load(rows), &CleaningOptions::default())
}

fn column(set: &RecordSet, column: Column) -> Vec<String> {
    set.iter().map(|record| record.render(column)).collect()
}

#[test]
fn test_identical_rows_collapse_to_one() {
    let row = "V1,2024-01-01 08:00,2024-01-01 08:05,2024-01-01 09:00,M,40,2,17,30";
    let (set, report) = clean(&[row, row]);

    assert_eq!(set.len(), 1);
    assert_eq!(report.duplicates_removed(), 1);
}

#[test]
fn test_rows_that_clean_identically_collapse_to_one() {
    let rows = [
        "V1,2024-01-01 08:00,,,M,40,2,17,30",
        "V1,2024-01-01 08:00:00,,,m,40,2,17,30",
        "V2,2024-01-01 09:00,,,F,50,2,17,2000",
        "V2,2024-01-01 09:00,,,F,50,2,17,3000",
    ];
    let options = CleaningOptions::default();
    let (set, report) = clean(&rows);

    assert_eq!(set.len(), 2);
    assert_eq!(report.duplicates_removed(), 2);
    assert_eq!(column(&set, Column::BoardingMinutes), vec!["30", "1440"]);
    assert!(audit_records(&set, &options).is_clean());

    let mut output = set.schema().output_headers().join(",");
    for record in &set {
        output.push('\n');
        output.push_str(&record.render_row(set.schema()).join(","));
    }
    let reloaded = read_records(output.as_bytes(), Path::new("clean.csv")).unwrap();
    let (again, report) = clean_records(reloaded, &options);
    assert_eq!(report.total_dropped(), 0);
    assert_eq!(again.len(), 2);
}

#[test]
fn test_missing_arrival_is_imputed_from_triage() {
    let (set, report) = clean(&["V1,,2024-01-01 08:30:00,,F,50,,,"]);

    assert_eq!(column(&set, Column::TimeArrival), vec!["2024-01-01 08:15:00"]);
    assert_eq!(column(&set, Column::TimeTriage), vec!["2024-01-01 08:30:00"]);
    let stage = report.stage(StageKind::Timestamps).unwrap();
    assert_eq!(stage.detail("arrival_imputed"), Some(1));
}

#[test]
fn test_rows_without_any_anchor_are_dropped() {
    let (set, report) = clean(&[
        "V1,,,2024-01-01 09:00,M,40,2,17,30",
        "V2,not a date,NA,,M,40,2,17,30",
        "V3,2024-01-01 08:00,,,M,40,2,17,30",
    ]);

    assert_eq!(column(&set, Column::TimeArrival), vec!["2024-01-01 08:00:00"]);
    assert_eq!(report.stage(StageKind::Timestamps).unwrap().rows_dropped, 2);
}

#[test]
fn test_triage_before_arrival_is_corrected() {
    let (set, _) = clean(&["V1,2024-01-01 10:00,2024-01-01 09:50,2024-01-01 11:00,M,30,3,5,"]);

    assert_eq!(column(&set, Column::TimeTriage), vec!["2024-01-01 10:05:00"]);
}

#[test]
fn test_gender_is_standardized_or_dropped() {
    let (set, report) = clean(&[
        "V1,2024-01-01 08:00,,,other,40,2,17,30",
        "V2,2024-01-01 08:00,,, M ,40,2,17,30",
        "V3,2024-01-01 08:00,,,female,40,2,17,30",
        "V4,2024-01-01 08:00,,,,40,2,17,30",
    ]);

    let genders: Vec<_> = set.iter().filter_map(|r| r.gender.value().copied()).collect();
    assert_eq!(genders, vec![Gender::Male, Gender::Female]);
    assert_eq!(report.gender_rejected(), 2);
}

#[test]
fn test_age_outside_range_or_unreadable_is_dropped() {
    let (set, report) = clean(&[
        "V1,2024-01-01 08:00,,,M,-1,2,17,30",
        "V2,2024-01-01 08:00,,,M,111,2,17,30",
        "V3,2024-01-01 08:00,,,M,abc,2,17,30",
        "V4,2024-01-01 08:00,,,M,110,2,17,30",
        "V5,2024-01-01 08:00,,,M,0,2,17,30",
    ]);

    assert_eq!(column(&set, Column::Age), vec!["110", "0"]);
    assert_eq!(report.stage(StageKind::AgeRange).unwrap().rows_dropped, 3);
}

#[test]
fn test_acuity_and_patient_key_are_backfilled() {
    let (set, _) = clean(&[
        "V1,2024-01-01 08:00,,,M,40,,,30",
        "V2,2024-01-01 08:00,,,M,40,1,99,30",
    ]);

    assert_eq!(column(&set, Column::Acuity), vec!["3", "1"]);
    assert_eq!(column(&set, Column::PatientKey), vec!["-1", "99"]);
}

#[test]
fn test_boarding_time_is_capped() {
    let (set, report) = clean(&[
        "V1,2024-01-01 08:00,,,M,40,2,17,2000",
        "V2,2024-01-01 08:00,,,M,40,2,17,1440",
        "V3,2024-01-01 08:00,,,M,40,2,17,-20",
        "V4,2024-01-01 08:00,,,M,40,2,17,",
    ]);

    assert_eq!(
        column(&set, Column::BoardingMinutes),
        vec!["1440", "1440", "-20", ""]
    );
    let stage = report.stage(StageKind::BoardingCap).unwrap();
    assert_eq!(stage.detail("capped"), Some(1));
}

#[test]
fn test_lwbs_count_matches_absent_doc_seen() {
    let (set, report) = clean(&[
        "V1,2024-01-01 08:00,,,M,40,2,17,30",
        "V2,2024-01-01 08:00,,2024-01-01 09:00,M,40,2,17,30",
        "V3,2024-01-01 08:00,,pending,F,40,2,17,30",
    ]);

    let flags: Vec<_> = set.iter().map(|r| r.render_lwbs_flag()).collect();
    assert_eq!(flags, vec!["1", "0", "1"]);
    let absent = set.iter().filter(|r| r.time_doc_seen.is_absent()).count();
    assert_eq!(report.lwbs_count(), absent);
}

#[test]
fn test_output_row_keeps_input_order_and_appends_flag() {
    let (set, _) = clean(&["V9,2024-01-01 08:00,2024-01-01 08:10,,m,34.0,2,17,45.5"]);

    assert_eq!(set.schema().output_headers().last().unwrap(), "LWBS_Flag");
    assert_eq!(
        set.records()[0].render_row(set.schema()),
        vec![
            "V9",
            "2024-01-01 08:00:00",
            "2024-01-01 08:10:00",
            "",
            "Male",
            "34",
            "2",
            "17",
            "45.5",
            "1",
        ]
    );
}

#[test]
fn test_report_counts_are_consistent() {
    let row = "V1,2024-01-01 08:00,,,M,40,2,17,30";
    let (set, report) = clean(&[row, row, "V2,,,,M,40,2,17,30", "V3,2024-01-01 08:00,,,x,40,,,"]);

    assert_eq!(report.initial_rows, 4);
    assert_eq!(report.final_rows, set.len());
    assert_eq!(report.initial_rows - report.total_dropped(), report.final_rows);
    for stage in &report.stages {
        assert_eq!(stage.rows_in - stage.rows_dropped, stage.rows_out());
    }
}

#[test]
fn test_cleaned_output_passes_audit() {
    let options = CleaningOptions::default();
    let (set, _) = CleaningPipeline::new(options.clone()).run(load(&[
        "V1,,2024-01-01 08:30,,f,50,,,5000",
        "V2,2024-01-01 10:00,2024-01-01 09:00,2024-01-01 11:00,MALE,20,4,8,",
        "V2,2024-01-01 10:00,2024-01-01 09:00,2024-01-01 11:00,MALE,20,4,8,",
    ]));

    let audit = audit_records(&set, &options);
    assert!(audit.is_clean(), "{:?}", audit.violations);
    assert_eq!(audit.rows_checked, 2);
}

#[test]
fn test_configured_options_change_policy() {
    let options = CleaningOptions::default()
        .with_default_acuity(5)
        .with_boarding_cap(60.0);
    let (set, _) = clean_records(load(&["V1,2024-01-01 08:00,,,M,40,,,90"]), &options);

    assert_eq!(column(&set, Column::Acuity), vec!["5"]);
    assert_eq!(column(&set, Column::BoardingMinutes), vec!["60"]);
}
