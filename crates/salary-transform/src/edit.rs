//! Diffing user input against the original schedules.
//!
//! The editor shows one text input per cell. [`build_edit_records`] walks
//! every original cell, compares the trimmed input with the stored salary and
//! produces the minimal set of [`EditRecord`]s to persist. Blank input means
//! "no change", never "delete". Values that equal the stored salary to the
//! cent are skipped, which keeps calculated cells from being frozen into
//! recorded ones when the user did not touch them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, debug_span, trace, warn};

use salary_model::{
    CellKey, EditOptions, EditRecord, SalaryCell, Schedule, ScheduleId, format_salary,
    same_salary,
};

use crate::error::EditError;

/// Raw text typed into the editor, keyed by schedule and cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputGrid {
    values: BTreeMap<ScheduleId, BTreeMap<CellKey, String>>,
}

impl InputGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills every cell that has a salary with its current value.
    pub fn from_schedules(schedules: &[Schedule]) -> Self {
        let mut input = Self::new();
        for schedule in schedules {
            let id = schedule.id();
            for cell in &schedule.salaries {
                if let Some(salary) = cell.salary {
                    input.set(&id, cell.key(), format_salary(salary));
                }
            }
        }
        input
    }

    pub fn set(&mut self, schedule: &ScheduleId, key: CellKey, raw: impl Into<String>) {
        self.values
            .entry(schedule.clone())
            .or_default()
            .insert(key, raw.into());
    }

    pub fn with_value(mut self, schedule: &ScheduleId, key: CellKey, raw: impl Into<String>) -> Self {
        self.set(schedule, key, raw);
        self
    }

    pub fn get(&self, schedule: &ScheduleId, key: &CellKey) -> Option<&str> {
        self.values
            .get(schedule)
            .and_then(|cells| cells.get(key))
            .map(String::as_str)
    }

    /// Clears one input, returning what was typed.
    pub fn clear(&mut self, schedule: &ScheduleId, key: &CellKey) -> Option<String> {
        self.values.get_mut(schedule)?.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records to persist and the inputs that were rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditOutcome {
    pub records: Vec<EditRecord>,
    pub errors: Vec<EditError>,
}

impl EditOutcome {
    /// True when nothing was rejected; records may still be empty.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

fn salary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("valid salary pattern"))
}

/// Validates a manually entered salary: plain digits, up to two decimals,
/// strictly positive. Currency symbols and separators are rejected.
///
/// # Errors
///
/// Returns [`EditError::Malformed`] or [`EditError::NotPositive`] naming the
/// cell.
pub fn validate_salary(schedule: &ScheduleId, key: &CellKey, raw: &str) -> Result<f64, EditError> {
    let value = salary_pattern()
        .is_match(raw)
        .then(|| raw.parse::<f64>().ok())
        .flatten()
        .filter(|value| value.is_finite())
        .ok_or_else(|| EditError::Malformed {
            schedule: schedule.clone(),
            step: key.step,
            column: key.column_key(),
            raw: raw.to_string(),
        })?;
    if value <= 0.0 {
        return Err(EditError::NotPositive {
            schedule: schedule.clone(),
            step: key.step,
            column: key.column_key(),
            raw: raw.to_string(),
        });
    }
    Ok(value)
}

/// Decides what to do with one original cell given its input.
fn evaluate_cell(
    schedule: &ScheduleId,
    cell: &SalaryCell,
    raw: &str,
) -> Result<Option<EditRecord>, EditError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let key = cell.key();
    let unchanged = raw
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .zip(cell.salary)
        .is_some_and(|(typed, current)| same_salary(typed, current));
    if unchanged {
        trace!(%schedule, cell = %key, calculated = cell.is_calculated, "unchanged value skipped");
        return Ok(None);
    }
    let salary = validate_salary(schedule, &key, raw)?;
    Ok(Some(EditRecord::new(schedule, &key, salary)))
}

/// Computes the edit records for every cell of `originals`.
///
/// Inputs for cells that are not in `originals` are ignored. When a
/// schedule lists a cell twice only the first is diffed. Validation
/// failures are collected; with [`EditOptions::fail_fast`] the walk stops at
/// the first one.
pub fn build_edit_records(
    originals: &[Schedule],
    input: &InputGrid,
    options: &EditOptions,
) -> EditOutcome {
    let span = debug_span!("build_edit_records", schedules = originals.len());
    let _guard = span.enter();

    let mut outcome = EditOutcome::default();
    'schedules: for schedule in originals {
        let id = schedule.id();
        let mut seen = BTreeSet::new();
        for cell in &schedule.salaries {
            if !seen.insert(cell.key()) {
                debug!(schedule = %id, cell = %cell.key(), "duplicate cell ignored");
                continue;
            }
            let raw = input.get(&id, &cell.key()).map_or("", str::trim);
            match evaluate_cell(&id, cell, raw) {
                Ok(Some(record)) => outcome.records.push(record),
                Ok(None) => {}
                Err(error) => {
                    warn!(%error, "salary input rejected");
                    outcome.errors.push(error);
                    if options.fail_fast {
                        break 'schedules;
                    }
                }
            }
        }
    }

    debug!(
        records = outcome.records.len(),
        errors = outcome.errors.len(),
        "edit records built"
    );
    outcome
}
