//! Resolution of a requested cell to an authoritative salary.
//!
//! A schedule is sparse and partly machine-filled. Resolving a target
//! `(education, credits, step)` returns the recorded cell itself when there
//! is one, and otherwise the nearest recorded cell it can be traced to:
//!
//! 1. **Exact**: the target exists and is not calculated.
//! 2. **Provenance**: the target is calculated and its `calculated_from`
//!    pointer names a recorded cell.
//! 3. **Search**: visible columns from the target's display position
//!    leftward; within each, steps from the target step downward.
//!
//! Which of 2 and 3 run is chosen by
//! [`ResolveStrategy`](salary_model::ResolveStrategy), never inferred from
//! the data.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use salary_model::{CellKey, ResolveOptions, SalaryCell};

use crate::grid::SalaryGrid;

/// Where a resolved salary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Exact,
    Fallback,
    None,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fallback => "fallback",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The target cell itself is recorded.
    Exact(&'a SalaryCell),
    /// A different, recorded cell stands in for the target.
    Fallback(&'a SalaryCell),
    /// Nothing authoritative was found.
    None,
}

impl<'a> Resolution<'a> {
    pub fn cell(&self) -> Option<&'a SalaryCell> {
        match *self {
            Self::Exact(cell) | Self::Fallback(cell) => Some(cell),
            Self::None => None,
        }
    }

    pub fn salary(&self) -> Option<f64> {
        self.cell().and_then(|cell| cell.salary)
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            Self::Exact(_) => Provenance::Exact,
            Self::Fallback(_) => Provenance::Fallback,
            Self::None => Provenance::None,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Resolves `target` against `grid` using the configured strategy.
pub fn resolve<'a>(
    grid: &'a SalaryGrid,
    target: &CellKey,
    options: &ResolveOptions,
) -> Resolution<'a> {
    if let Some(cell) = grid.cell(target).filter(|cell| cell.is_authoritative()) {
        return Resolution::Exact(cell);
    }

    let strategy = options.strategy;
    if strategy.uses_provenance()
        && let Some(cell) = follow_provenance(grid, target)
    {
        trace!(cell = %target, source = %cell.key(), "resolved through provenance");
        return Resolution::Fallback(cell);
    }
    if strategy.uses_search()
        && let Some(cell) = search_left_and_down(grid, target)
    {
        trace!(cell = %target, source = %cell.key(), "resolved by search");
        return Resolution::Fallback(cell);
    }

    trace!(
        schedule = %grid.id(),
        cell = %target,
        strategy = strategy.as_str(),
        "no authoritative cell"
    );
    Resolution::None
}

/// Resolves with the default [`ResolveOptions`].
pub fn resolve_default<'a>(grid: &'a SalaryGrid, target: &CellKey) -> Resolution<'a> {
    resolve(grid, target, &ResolveOptions::default())
}

fn follow_provenance<'a>(grid: &'a SalaryGrid, target: &CellKey) -> Option<&'a SalaryCell> {
    let source = grid.calculated_from(target)?;
    grid.cell(source).filter(|cell| cell.is_authoritative())
}

fn search_left_and_down<'a>(grid: &'a SalaryGrid, target: &CellKey) -> Option<&'a SalaryCell> {
    let target_column = target.column();
    grid.visible_columns()
        .iter()
        .rev()
        .filter(|column| **column <= target_column)
        .find_map(|column| {
            grid.column_cells_through(column, target.step)
                .rev()
                .find(|cell| cell.is_authoritative())
        })
}
