//! Loads an ED visit extract into a typed record set.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use edq_model::{Backfill, Cell, Column, LWBS_FLAG_COLUMN, Record, RecordSet, Schema, Slot};

use crate::error::{IngestError, Result};
use crate::values::{non_null, parse_f64, parse_i64};

use super::header::normalize_headers;

/// Where an input column goes.
#[derive(Debug, Clone, Copy)]
enum Target {
    Field(Column),
    Passthrough(usize),
    /// Derived column from an earlier run; recomputed by the pipeline.
    Discard,
}

/// Count of non-null numeric cells that failed to parse, per column.
#[derive(Debug, Default)]
struct CoercionStats {
    age: usize,
    acuity: usize,
    patient_key: usize,
    boarding: usize,
}

/// Reads a CSV extract from disk.
///
/// The file handle is owned by the reader and closed on every return path.
pub fn load_records(path: &Path) -> Result<RecordSet> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let records = read_records(file, path)?;
    info!(
        path = %path.display(),
        rows = records.len(),
        columns = records.schema().headers().len(),
        "loaded records"
    );
    Ok(records)
}

/// Reads a CSV extract from any reader. `source` is used in error messages.
///
/// Fails with [`IngestError::MissingColumns`] before reading any row when the
/// header lacks a required column.
pub fn read_records<R: Read>(input: R, source: &Path) -> Result<RecordSet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let csv_error = |e: csv::Error| IngestError::CsvParse {
        path: source.to_path_buf(),
        source: e,
    };

    let raw_headers = reader.headers().map_err(csv_error)?.clone();
    let headers = normalize_headers(raw_headers.iter());
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: source.to_path_buf(),
        });
    }

    let kept: Vec<String> = headers
        .iter()
        .filter(|header| header.as_str() != LWBS_FLAG_COLUMN)
        .cloned()
        .collect();
    let schema = Schema::from_headers(kept);
    let missing = schema.missing_columns();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: source.to_path_buf(),
            columns: missing
                .into_iter()
                .map(|column| column.header().to_string())
                .collect(),
        });
    }
    let targets = input_targets(&headers, &schema);

    let mut stats = CoercionStats::default();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        records.push(build_record(
            &row,
            &targets,
            schema.passthrough_count(),
            &mut stats,
        ));
    }

    if stats.age + stats.acuity + stats.patient_key + stats.boarding > 0 {
        debug!(
            age = stats.age,
            acuity = stats.acuity,
            patient_key = stats.patient_key,
            boarding = stats.boarding,
            "non-numeric values read as missing"
        );
    }

    Ok(RecordSet::new(schema, records))
}

fn input_targets(headers: &[String], schema: &Schema) -> Vec<Target> {
    let mut slots = schema.slots().iter();
    headers
        .iter()
        .map(|header| {
            if header == LWBS_FLAG_COLUMN {
                return Target::Discard;
            }
            match slots.next() {
                Some(Slot::Field(column)) => Target::Field(*column),
                Some(Slot::Passthrough(idx)) => Target::Passthrough(*idx),
                None => Target::Discard,
            }
        })
        .collect()
}

fn build_record(
    row: &StringRecord,
    targets: &[Target],
    passthrough_count: usize,
    stats: &mut CoercionStats,
) -> Record {
    let mut record = Record {
        passthrough: vec![String::new(); passthrough_count],
        ..Record::default()
    };
    for (idx, target) in targets.iter().enumerate() {
        let text = row.get(idx).unwrap_or("");
        match *target {
            Target::Discard => {}
            Target::Passthrough(slot) => record.passthrough[slot] = text.to_string(),
            Target::Field(column) => assign_field(&mut record, column, non_null(text), stats),
        }
    }
    record
}

fn assign_field(
    record: &mut Record,
    column: Column,
    value: Option<&str>,
    stats: &mut CoercionStats,
) {
    match column {
        Column::TimeArrival => record.time_arrival = Cell::from_input(value),
        Column::TimeTriage => record.time_triage = Cell::from_input(value),
        Column::TimeDocSeen => record.time_doc_seen = Cell::from_input(value),
        Column::Gender => record.gender = Cell::from_input(value),
        Column::Age => record.age = coerce(value, parse_f64, &mut stats.age),
        Column::BoardingMinutes => {
            record.boarding_minutes = coerce(value, parse_f64, &mut stats.boarding);
        }
        Column::Acuity => {
            record.acuity = Backfill::from_option(coerce(value, parse_i64, &mut stats.acuity));
        }
        Column::PatientKey => {
            record.patient_key =
                Backfill::from_option(coerce(value, parse_i64, &mut stats.patient_key));
        }
    }
}

fn coerce<T>(
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
    failures: &mut usize,
) -> Option<T> {
    let text = value?;
    let parsed = parse(text);
    if parsed.is_none() {
        *failures += 1;
    }
    parsed
}
