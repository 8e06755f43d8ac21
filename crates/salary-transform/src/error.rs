//! Error types for edit validation and schedule editing.

use salary_model::ScheduleId;
use thiserror::Error;

/// A user-entered salary that cannot be persisted.
///
/// These are data errors: they are collected into an
/// [`EditOutcome`](crate::EditOutcome), never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(
        "{schedule}: step {step}, {column}: '{raw}' is not a valid salary (digits with up to two decimals)"
    )]
    Malformed {
        schedule: ScheduleId,
        step: u32,
        column: String,
        raw: String,
    },

    #[error("{schedule}: step {step}, {column}: salary must be greater than zero (got '{raw}')")]
    NotPositive {
        schedule: ScheduleId,
        step: u32,
        column: String,
        raw: String,
    },
}

impl EditError {
    pub fn schedule(&self) -> &ScheduleId {
        match self {
            Self::Malformed { schedule, .. } | Self::NotPositive { schedule, .. } => schedule,
        }
    }

    pub fn step(&self) -> u32 {
        match self {
            Self::Malformed { step, .. } | Self::NotPositive { step, .. } => *step,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Self::Malformed { column, .. } | Self::NotPositive { column, .. } => column,
        }
    }
}

/// Errors from in-memory schedule editing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("column {column} already exists in {schedule}")]
    DuplicateColumn { schedule: ScheduleId, column: String },

    #[error("column {column} not found in {schedule}")]
    ColumnNotFound { schedule: ScheduleId, column: String },

    #[error("step {step} not found in {schedule}")]
    StepNotFound { schedule: ScheduleId, step: u32 },

    #[error("no schedule with a valid school year to copy from")]
    NoSchedules,
}

pub type Result<T> = std::result::Result<T, TransformError>;
