//! CSV table reading.

mod header;
mod reader;

pub use header::{normalize_header, normalize_headers};
pub use reader::{load_records, read_records};
