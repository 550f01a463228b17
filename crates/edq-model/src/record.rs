//! ED visit records and the record set they live in.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::cell::{Backfill, Cell};
use crate::columns::{Column, LWBS_FLAG_COLUMN};

/// Output format for timestamps; fractional seconds only when non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Standardized gender category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ED visit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub time_arrival: Cell<NaiveDateTime>,
    pub time_triage: Cell<NaiveDateTime>,
    pub time_doc_seen: Cell<NaiveDateTime>,
    pub gender: Cell<Gender>,
    pub age: Option<f64>,
    pub acuity: Backfill<i64>,
    pub patient_key: Backfill<i64>,
    pub boarding_minutes: Option<f64>,
    /// Derived; never read from input.
    pub lwbs_flag: Option<bool>,
    /// Non-schema columns in input order, untouched.
    pub passthrough: Vec<String>,
}

impl Record {
    /// Render a required column as output text. Absent values render empty.
    pub fn render(&self, column: Column) -> String {
        match column {
            Column::TimeArrival => render_timestamp(&self.time_arrival),
            Column::TimeTriage => render_timestamp(&self.time_triage),
            Column::TimeDocSeen => render_timestamp(&self.time_doc_seen),
            Column::Gender => match &self.gender {
                Cell::Absent => String::new(),
                Cell::Raw(text) => text.clone(),
                Cell::Value(gender) => gender.as_str().to_string(),
            },
            Column::Age => self.age.map(format_numeric).unwrap_or_default(),
            Column::Acuity => render_backfill(self.acuity),
            Column::PatientKey => render_backfill(self.patient_key),
            Column::BoardingMinutes => self
                .boarding_minutes
                .map(format_numeric)
                .unwrap_or_default(),
        }
    }

    /// Render the derived LWBS flag as `0`/`1`, empty before derivation.
    pub fn render_lwbs_flag(&self) -> String {
        match self.lwbs_flag {
            Some(true) => "1".to_string(),
            Some(false) => "0".to_string(),
            None => String::new(),
        }
    }

    /// Render a full output row in schema order, `LWBS_Flag` last.
    pub fn render_row(&self, schema: &Schema) -> Vec<String> {
        let mut row = Vec::with_capacity(schema.slots.len() + 1);
        for slot in &schema.slots {
            match slot {
                Slot::Field(column) => row.push(self.render(*column)),
                Slot::Passthrough(idx) => {
                    row.push(self.passthrough.get(*idx).cloned().unwrap_or_default());
                }
            }
        }
        row.push(self.render_lwbs_flag());
        row
    }

    /// Attribute-wise identity used for duplicate detection.
    pub fn fingerprint(&self) -> Vec<String> {
        let mut key: Vec<String> = Column::ALL
            .into_iter()
            .map(|column| self.render(column))
            .collect();
        key.push(self.render_lwbs_flag());
        key.extend(self.passthrough.iter().cloned());
        key
    }
}

fn render_timestamp(cell: &Cell<NaiveDateTime>) -> String {
    match cell {
        Cell::Absent => String::new(),
        Cell::Raw(text) => text.clone(),
        Cell::Value(timestamp) => format_timestamp(timestamp),
    }
}

fn render_backfill(value: Backfill<i64>) -> String {
    value.value().map(|v| v.to_string()).unwrap_or_default()
}

/// Format a timestamp the way the output file carries it.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Formats a floating-point number in its shortest round-trippable form.
///
/// Whole numbers carry no decimal point (`34.0` -> `34`).
pub fn format_numeric(value: f64) -> String {
    format!("{value}")
}

/// Position of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Field(Column),
    /// Index into `Record::passthrough`.
    Passthrough(usize),
}

/// Column layout of a record set, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    headers: Vec<String>,
    slots: Vec<Slot>,
    passthrough_count: usize,
}

impl Schema {
    /// Classify headers into required columns and passthrough columns.
    ///
    /// A repeated required header is kept as passthrough after its first
    /// occurrence. `LWBS_Flag` must be removed by the caller.
    pub fn from_headers(headers: Vec<String>) -> Self {
        let mut slots = Vec::with_capacity(headers.len());
        let mut seen = Vec::new();
        let mut passthrough_count = 0usize;
        for header in &headers {
            match Column::from_header(header) {
                Some(column) if !seen.contains(&column) => {
                    seen.push(column);
                    slots.push(Slot::Field(column));
                }
                _ => {
                    slots.push(Slot::Passthrough(passthrough_count));
                    passthrough_count += 1;
                }
            }
        }
        Self {
            headers,
            slots,
            passthrough_count,
        }
    }

    /// Schema holding exactly the required columns in canonical order.
    pub fn canonical() -> Self {
        Self::from_headers(
            Column::ALL
                .into_iter()
                .map(|column| column.header().to_string())
                .collect(),
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn passthrough_count(&self) -> usize {
        self.passthrough_count
    }

    /// Required columns with no slot in this schema.
    pub fn missing_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|column| !self.slots.contains(&Slot::Field(*column)))
            .collect()
    }

    /// Output header row: input headers followed by `LWBS_Flag`.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        headers.push(LWBS_FLAG_COLUMN.to_string());
        headers
    }
}

/// Ordered records sharing one schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    schema: Schema,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(schema: Schema, records: Vec<Record>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Keep records matching the predicate. Returns the number dropped.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Record) -> bool,
    {
        let before = self.records.len();
        self.records.retain(keep);
        before - self.records.len()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
