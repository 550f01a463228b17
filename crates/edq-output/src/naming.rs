//! Output file naming.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// File name used when no destination is given.
pub const DEFAULT_OUTPUT_NAME: &str = "CN_CLEAN_DATA.csv";

const FALLBACK_STAMP: &str = "%Y%m%d_%H%M%S";

/// Default destination: `CN_CLEAN_DATA.csv` next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(DEFAULT_OUTPUT_NAME),
        None => PathBuf::from(DEFAULT_OUTPUT_NAME),
    }
}

/// Timestamp-suffixed sibling of `destination`:
/// `<stem>_<YYYYMMDD_HHMMSS>.<ext>` in the same directory.
pub fn fallback_path(destination: &Path, now: NaiveDateTime) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let stamp = now.format(FALLBACK_STAMP);
    let name = match destination.extension() {
        Some(ext) => format!("{stem}_{stamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{stamp}"),
    };
    destination.with_file_name(name)
}
