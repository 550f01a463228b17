//! Post-clean audit of the output invariants.
//!
//! The audit re-checks a cleaned record set against the guarantees the
//! pipeline makes. It never mutates the set. A non-empty audit after
//! [`CleaningPipeline::run`](crate::CleaningPipeline::run) indicates a bug,
//! not bad input.

use std::collections::BTreeMap;
use std::fmt;

use edq_model::{Cell, CleaningOptions, Record, RecordSet};

/// A single invariant violation. Each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Row is an exact copy of an earlier row
    Duplicate { row: usize, first: usize },
    /// Row has no arrival timestamp
    MissingArrival { row: usize },
    /// Triage precedes arrival
    TriageBeforeArrival { row: usize },
    /// Gender is absent or not one of the two categories
    UnmappedGender { row: usize, value: String },
    /// Age is missing or outside the configured range
    AgeOutOfRange { row: usize, age: Option<f64> },
    MissingAcuity { row: usize },
    MissingPatientKey { row: usize },
    /// Boarding time exceeds the ceiling
    BoardingAboveCap { row: usize, minutes: f64 },
    /// Flag disagrees with the clinician-seen timestamp, or was never derived
    LwbsMismatch { row: usize },
}

impl Violation {
    /// Zero-based row index in the audited set.
    pub fn row(&self) -> usize {
        match self {
            Violation::Duplicate { row, .. }
            | Violation::MissingArrival { row }
            | Violation::TriageBeforeArrival { row }
            | Violation::UnmappedGender { row, .. }
            | Violation::AgeOutOfRange { row, .. }
            | Violation::MissingAcuity { row }
            | Violation::MissingPatientKey { row }
            | Violation::BoardingAboveCap { row, .. }
            | Violation::LwbsMismatch { row } => *row,
        }
    }

    /// Short stable label, used for grouping.
    pub fn label(&self) -> &'static str {
        match self {
            Violation::Duplicate { .. } => "duplicate",
            Violation::MissingArrival { .. } => "missing_arrival",
            Violation::TriageBeforeArrival { .. } => "triage_before_arrival",
            Violation::UnmappedGender { .. } => "unmapped_gender",
            Violation::AgeOutOfRange { .. } => "age_out_of_range",
            Violation::MissingAcuity { .. } => "missing_acuity",
            Violation::MissingPatientKey { .. } => "missing_patient_key",
            Violation::BoardingAboveCap { .. } => "boarding_above_cap",
            Violation::LwbsMismatch { .. } => "lwbs_mismatch",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Duplicate { row, first } => {
                write!(f, "row {row}: duplicate of row {first}")
            }
            Violation::MissingArrival { row } => write!(f, "row {row}: arrival time missing"),
            Violation::TriageBeforeArrival { row } => {
                write!(f, "row {row}: triage precedes arrival")
            }
            Violation::UnmappedGender { row, value } => {
                write!(f, "row {row}: unmapped gender {value:?}")
            }
            Violation::AgeOutOfRange { row, age: Some(age) } => {
                write!(f, "row {row}: age {age} out of range")
            }
            Violation::AgeOutOfRange { row, age: None } => write!(f, "row {row}: age missing"),
            Violation::MissingAcuity { row } => write!(f, "row {row}: acuity missing"),
            Violation::MissingPatientKey { row } => write!(f, "row {row}: patient key missing"),
            Violation::BoardingAboveCap { row, minutes } => {
                write!(f, "row {row}: boarding time {minutes} above cap")
            }
            Violation::LwbsMismatch { row } => write!(f, "row {row}: LWBS flag inconsistent"),
        }
    }
}

/// Result of auditing a record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditReport {
    pub rows_checked: usize,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation counts grouped by label.
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for violation in &self.violations {
            *counts.entry(violation.label()).or_insert(0) += 1;
        }
        counts
    }
}

/// Check every output invariant against a cleaned record set.
pub fn audit_records(set: &RecordSet, options: &CleaningOptions) -> AuditReport {
    let mut violations = Vec::new();
    let mut seen: BTreeMap<Vec<String>, usize> = BTreeMap::new();

    for (row, record) in set.iter().enumerate() {
        let first = *seen.entry(record.fingerprint()).or_insert(row);
        if first != row {
            violations.push(Violation::Duplicate { row, first });
        }
        check_record(row, record, options, &mut violations);
    }

    AuditReport {
        rows_checked: set.len(),
        violations,
    }
}

fn check_record(
    row: usize,
    record: &Record,
    options: &CleaningOptions,
    violations: &mut Vec<Violation>,
) {
    match record.time_arrival.value() {
        None => violations.push(Violation::MissingArrival { row }),
        Some(arrival) => {
            if let Some(triage) = record.time_triage.value()
                && triage < arrival
            {
                violations.push(Violation::TriageBeforeArrival { row });
            }
        }
    }

    match &record.gender {
        Cell::Value(_) => {}
        Cell::Raw(text) => violations.push(Violation::UnmappedGender {
            row,
            value: text.clone(),
        }),
        Cell::Absent => violations.push(Violation::UnmappedGender {
            row,
            value: String::new(),
        }),
    }

    let age_ok = record
        .age
        .is_some_and(|age| age >= options.age_min && age <= options.age_max);
    if !age_ok {
        violations.push(Violation::AgeOutOfRange {
            row,
            age: record.age,
        });
    }

    if record.acuity.is_missing() {
        violations.push(Violation::MissingAcuity { row });
    }
    if record.patient_key.is_missing() {
        violations.push(Violation::MissingPatientKey { row });
    }

    if let Some(minutes) = record.boarding_minutes
        && minutes > options.boarding_cap_minutes
    {
        violations.push(Violation::BoardingAboveCap { row, minutes });
    }

    if record.lwbs_flag != Some(record.time_doc_seen.is_absent()) {
        violations.push(Violation::LwbsMismatch { row });
    }
}
