//! Indexed view of one schedule for cell lookups.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use salary_model::{CellKey, ColumnId, SalaryCell, Schedule, ScheduleId};

/// A schedule indexed by [`CellKey`], with fully calculated columns hidden.
///
/// A column whose every cell is calculated never holds authoritative data,
/// so it is left out of [`visible_columns`](Self::visible_columns) and
/// [`cell`](Self::cell) never returns its cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryGrid {
    id: ScheduleId,
    cells: BTreeMap<CellKey, SalaryCell>,
    columns: Vec<ColumnId>,
    visible: Vec<ColumnId>,
}

impl SalaryGrid {
    /// Builds the grid; when a cell appears twice the first one is kept.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let id = schedule.id();
        let mut cells = BTreeMap::new();
        for cell in &schedule.salaries {
            let key = cell.key();
            if cells.contains_key(&key) {
                debug!(schedule = %id, cell = %key, "duplicate cell ignored");
                continue;
            }
            cells.insert(key, cell.clone());
        }

        let columns: Vec<ColumnId> = cells
            .keys()
            .map(CellKey::column)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let visible: Vec<ColumnId> = columns
            .iter()
            .filter(|column| {
                column_cells(&cells, column).any(|cell| !cell.is_calculated)
            })
            .cloned()
            .collect();
        if visible.len() < columns.len() {
            trace!(
                schedule = %id,
                suppressed = columns.len() - visible.len(),
                "fully calculated columns hidden"
            );
        }

        Self {
            id,
            cells,
            columns,
            visible,
        }
    }

    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    /// Every column present, in display order.
    pub fn all_columns(&self) -> &[ColumnId] {
        &self.columns
    }

    /// Columns holding at least one non-calculated cell, in display order.
    pub fn visible_columns(&self) -> &[ColumnId] {
        &self.visible
    }

    pub fn is_visible(&self, column: &ColumnId) -> bool {
        self.visible.binary_search(column).is_ok()
    }

    /// The cell at `key`, unless it is missing or its column is hidden.
    pub fn cell(&self, key: &CellKey) -> Option<&SalaryCell> {
        if !self.is_visible(&key.column()) {
            return None;
        }
        self.cells.get(key)
    }

    /// The provenance pointer stored on the cell at `key`, hidden column or not.
    pub fn calculated_from(&self, key: &CellKey) -> Option<&CellKey> {
        self.cells
            .get(key)
            .filter(|cell| cell.is_calculated)
            .and_then(|cell| cell.calculated_from.as_ref())
    }

    /// Cells of `column` with a step at or below `step`, lowest step first.
    pub fn column_cells_through(
        &self,
        column: &ColumnId,
        step: u32,
    ) -> impl DoubleEndedIterator<Item = &SalaryCell> {
        let start = CellKey::new(column.education.clone(), column.credits, 0);
        let end = CellKey::new(column.education.clone(), column.credits, step);
        self.cells.range(start..=end).map(|(_, cell)| cell)
    }

    /// Steps present in any column, ascending.
    pub fn steps(&self) -> Vec<u32> {
        let steps: BTreeSet<u32> = self.cells.keys().map(|key| key.step).collect();
        steps.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<&Schedule> for SalaryGrid {
    fn from(schedule: &Schedule) -> Self {
        Self::from_schedule(schedule)
    }
}

fn column_cells<'a>(
    cells: &'a BTreeMap<CellKey, SalaryCell>,
    column: &ColumnId,
) -> impl Iterator<Item = &'a SalaryCell> {
    let start = CellKey::new(column.education.clone(), column.credits, 0);
    let end = CellKey::new(column.education.clone(), column.credits, u32::MAX);
    cells.range(start..=end).map(|(_, cell)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use salary_model::{DEFAULT_PERIOD, Education};

    fn schedule(cells: Vec<SalaryCell>) -> Schedule {
        Schedule::new("2023-2024", DEFAULT_PERIOD).with_salaries(cells)
    }

    #[test]
    fn hides_fully_calculated_columns() {
        let grid = SalaryGrid::from_schedule(&schedule(vec![
            SalaryCell::recorded(1, Education::Bachelor, 0, 50000.0),
            SalaryCell::calculated(1, Education::Master, 0, Some(55000.0), None),
            SalaryCell::calculated(2, Education::Master, 0, Some(56000.0), None),
            SalaryCell::calculated(1, Education::Master, 30, Some(58000.0), None),
            SalaryCell::recorded(2, Education::Master, 30, 59000.0),
        ]));

        let all: Vec<String> = grid.all_columns().iter().map(ColumnId::key).collect();
        let visible: Vec<String> = grid.visible_columns().iter().map(ColumnId::key).collect();
        assert_eq!(all, vec!["B", "M", "M+30"]);
        assert_eq!(visible, vec!["B", "M+30"]);

        let hidden = CellKey::new(Education::Master, 0, 1);
        assert!(grid.cell(&hidden).is_none());
        let partly = CellKey::new(Education::Master, 30, 1);
        assert!(grid.cell(&partly).is_some_and(|cell| cell.is_calculated));
    }

    #[test]
    fn first_duplicate_wins() {
        let grid = SalaryGrid::from_schedule(&schedule(vec![
            SalaryCell::recorded(1, Education::Bachelor, 0, 50000.0),
            SalaryCell::recorded(1, Education::Bachelor, 0, 99999.0),
        ]));
        assert_eq!(grid.len(), 1);
        let key = CellKey::new(Education::Bachelor, 0, 1);
        assert_eq!(grid.cell(&key).and_then(|cell| cell.salary), Some(50000.0));
    }

    #[test]
    fn column_range_stops_at_step() {
        let grid = SalaryGrid::from_schedule(&schedule(vec![
            SalaryCell::recorded(1, Education::Bachelor, 0, 1.0),
            SalaryCell::recorded(2, Education::Bachelor, 0, 2.0),
            SalaryCell::recorded(3, Education::Bachelor, 0, 3.0),
            SalaryCell::recorded(1, Education::Bachelor, 15, 4.0),
        ]));
        let column = ColumnId::new(Education::Bachelor, 0);
        let steps: Vec<u32> = grid
            .column_cells_through(&column, 2)
            .rev()
            .map(|cell| cell.step)
            .collect();
        assert_eq!(steps, vec![2, 1]);
        assert_eq!(grid.steps(), vec![1, 2, 3]);
    }
}
