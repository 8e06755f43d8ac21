//! Salary schedule data model.
//!
//! Shared types for the clipboard parser, the cell resolver and the edit
//! engine: schedules and their cells, parsed grids, edit records, the
//! education vocabulary and the option structs that configure each stage.

pub mod amount;
pub mod edit;
pub mod education;
pub mod error;
pub mod options;
pub mod parse_result;
pub mod schedule;
pub mod vocabulary;

pub use amount::{format_salary, parse_amount, round_salary, same_salary};
pub use edit::EditRecord;
pub use education::{Column, ColumnId, Education, column_key};
pub use error::{ModelError, Result};
pub use options::{
    DEFAULT_PROBE_LINES, EditOptions, ParseOptions, ResolveOptions, ResolveStrategy,
};
pub use parse_result::ParseResult;
pub use schedule::{
    CellKey, DEFAULT_PERIOD, SalaryCell, Schedule, ScheduleId, format_school_year,
    load_schedules, parse_school_year,
};
pub use vocabulary::EducationVocabulary;
