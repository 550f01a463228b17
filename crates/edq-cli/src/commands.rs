use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use edq_ingest::load_records;
use edq_model::CleaningOptions;
use edq_output::{RunReport, default_output_path, persist_records, write_run_report};
use edq_transform::{AuditReport, CleaningPipeline, audit_records};

use crate::logging::redact_value;
use crate::types::{RunConfig, RunResult};

/// Audit violations logged individually before the rest are summarized.
const MAX_LOGGED_VIOLATIONS: usize = 20;

/// Load, clean, audit and persist one extract.
///
/// The pipeline completes in memory before the destination is opened, so a
/// structural failure never leaves a partial output file behind.
pub fn run_clean(config: &RunConfig) -> Result<RunResult> {
    let span = info_span!("run", input = %config.input.display());
    let _guard = span.enter();

    let options = load_options(config.config.as_deref())?;
    let records = load_records(&config.input)
        .with_context(|| format!("load {}", config.input.display()))?;
    let (records, pipeline) = CleaningPipeline::new(options.clone()).run(records);

    let audit = audit_records(&records, &options);
    log_audit(&audit);

    let output = if config.dry_run {
        info!("dry run, cleaned extract not written");
        None
    } else {
        let destination = config
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&config.input));
        let written = persist_records(&records, &destination)
            .with_context(|| format!("write {}", destination.display()))?;
        Some(written)
    };

    let report = match &config.report {
        Some(path) => {
            let run = RunReport {
                input: &config.input,
                output: output.as_deref(),
                options: &options,
                pipeline: &pipeline,
                audit: audit
                    .counts()
                    .into_iter()
                    .map(|(label, count)| (label.to_string(), count))
                    .collect(),
            };
            Some(write_run_report(path, &run).context("write run report")?)
        }
        None => None,
    };

    Ok(RunResult {
        input: config.input.clone(),
        output,
        report,
        pipeline,
        audit,
    })
}

/// Read cleaning options from a TOML file, or use the defaults.
pub fn load_options(path: Option<&Path>) -> Result<CleaningOptions> {
    let Some(path) = path else {
        return Ok(CleaningOptions::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let options = CleaningOptions::from_toml_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    info!(path = %path.display(), "loaded cleaning options");
    Ok(options)
}

fn log_audit(audit: &AuditReport) {
    if audit.is_clean() {
        return;
    }
    for violation in audit.violations.iter().take(MAX_LOGGED_VIOLATIONS) {
        warn!(
            row = violation.row(),
            check = violation.label(),
            detail = %redact_value(&violation.to_string()),
            "output invariant violated"
        );
    }
    if audit.violations.len() > MAX_LOGGED_VIOLATIONS {
        warn!(
            remaining = audit.violations.len() - MAX_LOGGED_VIOLATIONS,
            "further invariant violations omitted"
        );
    }
}
