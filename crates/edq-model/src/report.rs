//! Row counts reported by each cleaning stage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Deduplicate,
    Timestamps,
    Gender,
    AgeRange,
    Backfill,
    BoardingCap,
    LwbsFlag,
}

impl StageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StageKind::Deduplicate => "deduplicate",
            StageKind::Timestamps => "timestamps",
            StageKind::Gender => "gender",
            StageKind::AgeRange => "age_range",
            StageKind::Backfill => "backfill",
            StageKind::BoardingCap => "boarding_cap",
            StageKind::LwbsFlag => "lwbs_flag",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StageKind::Deduplicate => "Remove exact duplicate rows",
            StageKind::Timestamps => "Parse timestamps, impute arrival, fix triage order",
            StageKind::Gender => "Standardize gender, drop unknown categories",
            StageKind::AgeRange => "Drop ages outside the valid range",
            StageKind::Backfill => "Default acuity and patient key",
            StageKind::BoardingCap => "Cap boarding time",
            StageKind::LwbsFlag => "Derive LWBS flag",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts produced by one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: StageKind,
    pub rows_in: usize,
    pub rows_dropped: usize,
    /// Cells rewritten in place (imputed, corrected, capped or derived).
    pub cells_rewritten: usize,
    /// Stage-specific counters, in the order the stage produced them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<(String, usize)>,
}

impl StageReport {
    pub fn new(stage: StageKind, rows_in: usize) -> Self {
        Self {
            stage,
            rows_in,
            rows_dropped: 0,
            cells_rewritten: 0,
            details: Vec::new(),
        }
    }

    pub fn rows_out(&self) -> usize {
        self.rows_in - self.rows_dropped
    }

    /// Attach a named counter.
    #[must_use]
    pub fn with_detail(mut self, name: &str, count: usize) -> Self {
        self.details.push((name.to_string(), count));
        self
    }

    pub fn detail(&self, name: &str) -> Option<usize> {
        self.details
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, count)| *count)
    }
}

/// Accumulated counts for a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub initial_rows: usize,
    pub final_rows: usize,
    pub stages: Vec<StageReport>,
}

impl PipelineReport {
    pub fn new(initial_rows: usize) -> Self {
        Self {
            initial_rows,
            final_rows: initial_rows,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, report: StageReport) {
        self.final_rows = report.rows_out();
        self.stages.push(report);
    }

    pub fn stage(&self, stage: StageKind) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.stage == stage)
    }

    pub fn total_dropped(&self) -> usize {
        self.stages.iter().map(|report| report.rows_dropped).sum()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.dropped_by(StageKind::Deduplicate)
    }

    pub fn gender_rejected(&self) -> usize {
        self.dropped_by(StageKind::Gender)
    }

    /// Number of rows flagged as left without being seen.
    pub fn lwbs_count(&self) -> usize {
        self.stage(StageKind::LwbsFlag)
            .and_then(|report| report.detail("lwbs"))
            .unwrap_or(0)
    }

    fn dropped_by(&self, stage: StageKind) -> usize {
        self.stage(stage).map_or(0, |report| report.rows_dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_report_tracks_final_rows() {
        let mut report = PipelineReport::new(10);
        let mut dedupe = StageReport::new(StageKind::Deduplicate, 10);
        dedupe.rows_dropped = 2;
        report.push(dedupe);
        let mut gender = StageReport::new(StageKind::Gender, 8);
        gender.rows_dropped = 1;
        report.push(gender);
        report.push(StageReport::new(StageKind::LwbsFlag, 7).with_detail("lwbs", 3));

        assert_eq!(report.final_rows, 7);
        assert_eq!(report.duplicates_removed(), 2);
        assert_eq!(report.gender_rejected(), 1);
        assert_eq!(report.lwbs_count(), 3);
        assert_eq!(report.total_dropped(), 3);
    }

    #[test]
    fn report_serializes_stage_names_in_snake_case() {
        let report = StageReport::new(StageKind::BoardingCap, 4).with_detail("capped", 1);
        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json["stage"], "boarding_cap");
        assert_eq!(json["details"][0][1], 1);
    }
}
