use serde::Serialize;

use salary_model::{CellKey, EditRecord, ScheduleId};
use salary_transform::{ComparisonRow, EditOutcome, Provenance, Resolution};

/// One resolved cell, as printed by `resolve`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCell {
    pub school_year: String,
    pub period: String,
    pub column: String,
    pub step: u32,
    pub salary: Option<f64>,
    pub provenance: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<CellKey>,
}

impl ResolvedCell {
    pub fn new(schedule: &ScheduleId, target: &CellKey, resolution: &Resolution<'_>) -> Self {
        Self {
            school_year: schedule.school_year.clone(),
            period: schedule.period.clone(),
            column: target.column_key(),
            step: target.step,
            salary: resolution.salary(),
            provenance: resolution.provenance(),
            source: resolution.cell().map(salary_model::SalaryCell::key),
        }
    }
}

/// Result of `diff`, with errors rendered as messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffReport {
    pub records: Vec<EditRecord>,
    pub errors: Vec<String>,
}

impl DiffReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl From<EditOutcome> for DiffReport {
    fn from(outcome: EditOutcome) -> Self {
        Self {
            records: outcome.records,
            errors: outcome.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Result of `compare`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub column: String,
    pub step: u32,
    pub rows: Vec<ComparisonRow>,
}
