//! Policy constants for the cleaning pipeline.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Options controlling drop, impute and cap policies.
///
/// Every field has a default, so a TOML file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningOptions {
    /// Minutes subtracted from triage time to impute a missing arrival.
    pub arrival_offset_minutes: i64,
    /// Minutes added to arrival when triage precedes it.
    pub triage_correction_minutes: i64,
    /// Inclusive lower age bound.
    pub age_min: f64,
    /// Inclusive upper age bound.
    pub age_max: f64,
    /// ESI acuity used when the source has none (mid-scale).
    pub default_acuity: i64,
    /// Patient key used when the source has none.
    pub missing_patient_key: i64,
    /// Ceiling for boarding time, in minutes.
    pub boarding_cap_minutes: f64,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            arrival_offset_minutes: 15,
            triage_correction_minutes: 5,
            age_min: 0.0,
            age_max: 110.0,
            default_acuity: 3,
            missing_patient_key: -1,
            boarding_cap_minutes: 1440.0,
        }
    }
}

impl CleaningOptions {
    /// Parse options from TOML and validate them.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject option combinations the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        check_minutes("arrival_offset_minutes", self.arrival_offset_minutes)?;
        check_minutes("triage_correction_minutes", self.triage_correction_minutes)?;
        if !self.age_min.is_finite() || !self.age_max.is_finite() {
            return Err(invalid("age_min/age_max", "must be finite".to_string()));
        }
        if self.age_min > self.age_max {
            return Err(invalid(
                "age_min",
                format!(
                    "lower bound {} exceeds upper bound {}",
                    self.age_min, self.age_max
                ),
            ));
        }
        if !self.boarding_cap_minutes.is_finite() {
            return Err(invalid(
                "boarding_cap_minutes",
                "must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Offset used to impute a missing arrival from triage.
    pub fn arrival_offset(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.arrival_offset_minutes).unwrap_or(TimeDelta::zero())
    }

    /// Gap placed between arrival and a corrected triage time.
    pub fn triage_correction(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.triage_correction_minutes).unwrap_or(TimeDelta::zero())
    }

    pub fn with_default_acuity(mut self, acuity: i64) -> Self {
        self.default_acuity = acuity;
        self
    }

    pub fn with_boarding_cap(mut self, minutes: f64) -> Self {
        self.boarding_cap_minutes = minutes;
        self
    }

    pub fn with_age_range(mut self, min: f64, max: f64) -> Self {
        self.age_min = min;
        self.age_max = max;
        self
    }
}

fn check_minutes(field: &'static str, minutes: i64) -> Result<()> {
    if minutes < 0 {
        return Err(invalid(field, format!("must be non-negative, got {minutes}")));
    }
    if TimeDelta::try_minutes(minutes).is_none() {
        return Err(invalid(field, format!("{minutes} minutes is out of range")));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: String) -> ModelError {
    ModelError::InvalidOption { field, reason }
}
