//! In-memory schedule shape editing.
//!
//! The editor can add and remove steps and columns and start a new school
//! year before the user types any values. New cells are blank and recorded
//! (not calculated), so they only produce edit records once filled in.

use tracing::debug;

use salary_model::{
    ColumnId, Education, SalaryCell, Schedule, ScheduleId, format_school_year, parse_school_year,
};

use crate::error::{Result, TransformError};

/// Appends step `max + 1` with a blank cell in every existing column.
///
/// Returns the new step number.
pub fn add_step(schedule: &mut Schedule) -> u32 {
    let step = schedule.steps().last().map_or(1, |last| last + 1);
    let columns = schedule.columns();
    for column in &columns {
        schedule
            .salaries
            .push(SalaryCell::blank(step, column.education.clone(), column.credits));
    }
    debug!(schedule = %schedule.id(), step, columns = columns.len(), "step added");
    step
}

/// Removes every cell of `step`; returns how many were removed.
///
/// # Errors
///
/// Returns [`TransformError::StepNotFound`] when no cell has that step.
pub fn remove_step(schedule: &mut Schedule, step: u32) -> Result<usize> {
    let before = schedule.salaries.len();
    schedule.salaries.retain(|cell| cell.step != step);
    let removed = before - schedule.salaries.len();
    if removed == 0 {
        return Err(TransformError::StepNotFound {
            schedule: schedule.id(),
            step,
        });
    }
    debug!(schedule = %schedule.id(), step, removed, "step removed");
    Ok(removed)
}

/// Adds a column with a blank cell for every existing step.
///
/// A schedule without steps gets the column at step 1.
///
/// # Errors
///
/// Returns [`TransformError::DuplicateColumn`] when the column exists.
pub fn add_column(schedule: &mut Schedule, education: Education, credits: u32) -> Result<()> {
    let column = ColumnId::new(education, credits);
    if schedule.columns().contains(&column) {
        return Err(TransformError::DuplicateColumn {
            schedule: schedule.id(),
            column: column.key(),
        });
    }
    let mut steps = schedule.steps();
    if steps.is_empty() {
        steps.push(1);
    }
    for step in &steps {
        schedule
            .salaries
            .push(SalaryCell::blank(*step, column.education.clone(), column.credits));
    }
    debug!(schedule = %schedule.id(), column = %column, steps = steps.len(), "column added");
    Ok(())
}

/// Removes every cell of a column; returns how many were removed.
///
/// # Errors
///
/// Returns [`TransformError::ColumnNotFound`] when no cell is in the column.
pub fn remove_column(schedule: &mut Schedule, education: &Education, credits: u32) -> Result<usize> {
    let before = schedule.salaries.len();
    schedule
        .salaries
        .retain(|cell| !(cell.education == *education && cell.credits == credits));
    let removed = before - schedule.salaries.len();
    let column = ColumnId::new(education.clone(), credits);
    if removed == 0 {
        return Err(TransformError::ColumnNotFound {
            schedule: schedule.id(),
            column: column.key(),
        });
    }
    debug!(schedule = %schedule.id(), column = %column, removed, "column removed");
    Ok(removed)
}

/// The school year following the latest one in `schedules`.
///
/// Schedules whose year does not parse are ignored; `None` when none parse.
pub fn next_school_year(schedules: &[Schedule]) -> Option<String> {
    latest(schedules).map(|(start, _)| format_school_year(start + 1))
}

/// Starts the next school year by copying the latest schedule's shape.
///
/// Every cell of the latest schedule is copied as a blank, non-calculated
/// cell. Returns the id of the new schedule.
///
/// # Errors
///
/// Returns [`TransformError::NoSchedules`] when no schedule has a valid
/// school year.
pub fn add_schedule(schedules: &mut Vec<Schedule>, period: &str) -> Result<ScheduleId> {
    let (start, template) = latest(schedules).ok_or(TransformError::NoSchedules)?;
    let salaries: Vec<SalaryCell> = template
        .salaries
        .iter()
        .map(|cell| SalaryCell::blank(cell.step, cell.education.clone(), cell.credits))
        .collect();
    let schedule = Schedule::new(format_school_year(start + 1), period).with_salaries(salaries);
    let id = schedule.id();
    debug!(
        schedule = %id,
        from = %template.id(),
        cells = schedule.salaries.len(),
        "schedule added"
    );
    schedules.push(schedule);
    Ok(id)
}

fn latest(schedules: &[Schedule]) -> Option<(i32, &Schedule)> {
    schedules
        .iter()
        .filter_map(|schedule| {
            parse_school_year(&schedule.school_year)
                .ok()
                .map(|(start, _)| (start, schedule))
        })
        .max_by_key(|(start, _)| *start)
}
