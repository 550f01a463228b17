use std::path::PathBuf;

use edq_model::PipelineReport;
use edq_transform::AuditReport;

/// What a single run should do, independent of how it was requested.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub input: PathBuf,
    /// Defaults to `CN_CLEAN_DATA.csv` next to the input.
    pub output: Option<PathBuf>,
    /// TOML file with `CleaningOptions` overrides.
    pub config: Option<PathBuf>,
    /// Where to write the JSON run report.
    pub report: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    /// Path actually written; `None` for dry runs.
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub pipeline: PipelineReport,
    pub audit: AuditReport,
}
