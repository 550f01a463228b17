//! ED visit data ingestion.
//!
//! Loads a raw ED visit extract (CSV) into a typed [`edq_model::RecordSet`].
//!
//! - **Schema check**: every required column must be present in the header,
//!   otherwise loading fails before any row is read
//! - **Null tokens**: empty cells and common null markers (`NA`, `NULL`, ...)
//!   become absent values
//! - **Numeric coercion**: age and boarding time as `f64`, acuity and patient
//!   key as integers
//! - **Passthrough**: columns outside the schema are carried verbatim
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use edq_ingest::load_records;
//!
//! let records = load_records(Path::new("CN_RAW_DATA.csv"))?;
//! println!("{} rows", records.len());
//! ```

mod csv_table;
mod error;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{load_records, normalize_header, normalize_headers, read_records};

// === Value Coercion ===
pub use values::{NULL_TOKENS, non_null, parse_f64, parse_i64};
