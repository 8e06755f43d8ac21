//! Salary grid resolution and edit reconciliation.
//!
//! - **grid**: a schedule indexed by cell, with fully calculated columns hidden
//! - **resolve**: exact, provenance and search-based cell resolution
//! - **edit**: user input diffed against the original schedules
//! - **editing**: step, column and school-year shape changes
//! - **compare**: one cell resolved across districts

pub mod compare;
pub mod edit;
pub mod editing;
pub mod error;
pub mod grid;
pub mod resolve;

pub use compare::{ComparisonRow, compare};
pub use edit::{EditOutcome, InputGrid, build_edit_records, validate_salary};
pub use editing::{add_column, add_schedule, add_step, next_school_year, remove_column, remove_step};
pub use error::{EditError, Result, TransformError};
pub use grid::SalaryGrid;
pub use resolve::{Provenance, Resolution, resolve, resolve_default};
