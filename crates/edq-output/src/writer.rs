//! Cleaned CSV writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::WriterBuilder;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use edq_model::RecordSet;

use crate::error::{OutputError, Result};
use crate::naming::fallback_path;

/// Write the cleaned record set to `destination`.
///
/// When the destination cannot be written, one retry goes to a
/// timestamp-suffixed name in the same directory. Returns the path that was
/// actually written.
pub fn persist_records(set: &RecordSet, destination: &Path) -> Result<PathBuf> {
    let primary_error = match write_file(set, destination) {
        Ok(()) => {
            info!(path = %destination.display(), rows = set.len(), "wrote cleaned extract");
            return Ok(destination.to_path_buf());
        }
        Err(err) => err,
    };

    let fallback = fallback_path(destination, Local::now().naive_local());
    warn!(
        path = %destination.display(),
        fallback = %fallback.display(),
        error = %primary_error,
        "destination not writable, using fallback name"
    );
    match write_file(set, &fallback) {
        Ok(()) => {
            info!(path = %fallback.display(), rows = set.len(), "wrote cleaned extract");
            Ok(fallback)
        }
        Err(source) => Err(OutputError::FallbackFailed {
            primary: destination.to_path_buf(),
            fallback,
            source,
        }),
    }
}

/// Write the cleaned record set to any writer, header first.
pub fn write_records<W: Write>(set: &RecordSet, output: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    writer.write_record(set.schema().output_headers())?;
    for record in set {
        writer.write_record(record.render_row(set.schema()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Stage the file beside `path` and rename it into place, so a failed write
/// never leaves a partial extract under the destination name.
fn write_file(set: &RecordSet, path: &Path) -> csv::Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(directory)?;
    write_records(set, staged.as_file_mut())?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use edq_model::{Record, Schema};

    use super::*;

    #[test]
    fn writes_header_with_flag_column() {
        let set = RecordSet::new(Schema::canonical(), vec![Record::default()]);
        let mut buffer = Vec::new();
        write_records(&set, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Time_Arrival,Time_Triage,Time_Doc_Seen,Gender,Age,ESI_Acuity,FK_Patient_ID,Boarding_Time_min,LWBS_Flag"
            )
        );
        assert_eq!(lines.next(), Some(",,,,,,,,"));
    }
}
