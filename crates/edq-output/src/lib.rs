//! ED visit output.
//!
//! - **writer**: cleaned CSV with input column order and a trailing
//!   `LWBS_Flag`, retried once under a timestamped name on failure
//! - **naming**: default and fallback destinations
//! - **report**: JSON run report

mod error;
mod naming;
mod report;
mod writer;

pub use error::{OutputError, Result};
pub use naming::{DEFAULT_OUTPUT_NAME, default_output_path, fallback_path};
pub use report::{RunReport, render_run_report, write_run_report};
pub use writer::{persist_records, write_records};
