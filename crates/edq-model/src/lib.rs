//! ED visit data model.
//!
//! This crate holds the types shared by every stage of the cleaning workflow:
//!
//! - **columns**: the fixed input schema and the derived `LWBS_Flag` column
//! - **cell**: tagged optionals for raw input values and backfilled values
//! - **record**: `Record`, `Schema` and `RecordSet`
//! - **options**: `CleaningOptions`, the policy constants of the pipeline
//! - **report**: per-stage and whole-run counters

pub mod cell;
pub mod columns;
pub mod error;
pub mod options;
pub mod record;
pub mod report;

pub use cell::{Backfill, Cell};
pub use columns::{Column, LWBS_FLAG_COLUMN};
pub use error::{ModelError, Result};
pub use options::CleaningOptions;
pub use record::{Gender, Record, RecordSet, Schema, Slot, format_numeric, format_timestamp};
pub use report::{PipelineReport, StageKind, StageReport};
