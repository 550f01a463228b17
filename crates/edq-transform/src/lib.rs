//! Data-quality stages for ED visit records.
//!
//! - **normalization**: timestamp parsing and gender standardization
//! - **stages**: the seven cleaning stages, each returning a `StageReport`
//! - **pipeline**: `CleaningPipeline`, which runs the stages in a fixed order
//! - **audit**: a read-only check of the output invariants

pub mod audit;
pub mod normalization;
pub mod pipeline;
pub mod stages;

pub use audit::{AuditReport, Violation, audit_records};
pub use normalization::{parse_timestamp, standardize_gender};
pub use pipeline::{CleaningPipeline, STAGE_ORDER, clean_records, run_stage};
