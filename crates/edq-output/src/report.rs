//! Machine-readable run report.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use edq_model::{CleaningOptions, PipelineReport};

use crate::error::{OutputError, Result};

const REPORT_SCHEMA: &str = "edq.run-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Everything a run produced, as written to the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub input: &'a Path,
    /// `None` for dry runs.
    pub output: Option<&'a Path>,
    pub options: &'a CleaningOptions,
    pub pipeline: &'a PipelineReport,
    /// Audit violation counts by label; empty when the output is clean.
    pub audit: Vec<(String, usize)>,
}

#[derive(Serialize)]
struct RunReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    #[serde(flatten)]
    run: &'a RunReport<'a>,
}

/// Render the run report as pretty-printed JSON.
pub fn render_run_report(run: &RunReport<'_>) -> Result<String> {
    let payload = RunReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        run,
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Write the run report to `path`.
pub fn write_run_report(path: &Path, run: &RunReport<'_>) -> Result<PathBuf> {
    let json = render_run_report(run)?;
    std::fs::write(path, format!("{json}\n")).map_err(|source| OutputError::Report {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote run report");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use edq_model::{StageKind, StageReport};

    use super::*;

    #[test]
    fn report_carries_schema_and_counts() {
        let mut pipeline = PipelineReport::new(3);
        let mut dedupe = StageReport::new(StageKind::Deduplicate, 3);
        dedupe.rows_dropped = 1;
        pipeline.push(dedupe);
        let options = CleaningOptions::default();
        let run = RunReport {
            input: Path::new("raw.csv"),
            output: None,
            options: &options,
            pipeline: &pipeline,
            audit: Vec::new(),
        };

        let json: serde_json::Value =
            serde_json::from_str(&render_run_report(&run).unwrap()).unwrap();
        assert_eq!(json["schema"], "edq.run-report");
        assert_eq!(json["input"], "raw.csv");
        assert!(json["output"].is_null());
        assert_eq!(json["pipeline"]["final_rows"], 2);
        assert_eq!(json["pipeline"]["stages"][0]["stage"], "deduplicate");
        assert_eq!(json["options"]["default_acuity"], 3);
    }
}
