//! Cross-district comparison of one schedule cell.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use salary_model::{CellKey, ResolveOptions, SalaryCell};

use crate::grid::SalaryGrid;
use crate::resolve::{Provenance, resolve};

/// One district's answer for the compared cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub district: String,
    pub salary: Option<f64>,
    pub provenance: Provenance,
    /// Cell the salary was taken from; differs from the target on fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<CellKey>,
}

/// Resolves `target` in every district's grid.
///
/// Rows are ordered by salary, highest first; districts without a value
/// come last. Ties keep district name order.
pub fn compare(
    districts: &[(String, SalaryGrid)],
    target: &CellKey,
    options: &ResolveOptions,
) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = districts
        .iter()
        .map(|(district, grid)| {
            let resolution = resolve(grid, target, options);
            ComparisonRow {
                district: district.clone(),
                salary: resolution.salary(),
                provenance: resolution.provenance(),
                source: resolution.cell().map(SalaryCell::key),
            }
        })
        .collect();
    rows.sort_by(|left, right| {
        by_salary_descending(left.salary, right.salary)
            .then_with(|| left.district.cmp(&right.district))
    });
    debug!(
        cell = %target,
        districts = rows.len(),
        fallbacks = rows
            .iter()
            .filter(|row| row.provenance == Provenance::Fallback)
            .count(),
        "comparison built"
    );
    rows
}

fn by_salary_descending(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => right.total_cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
