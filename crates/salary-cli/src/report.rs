//! Table, CSV and JSON rendering of command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use anyhow::{Context, Result};

use salary_model::{CellKey, ParseResult, ResolveOptions, format_salary};
use salary_transform::{Provenance, Resolution, SalaryGrid, resolve};

use crate::types::{ComparisonReport, DiffReport, ResolvedCell};

/// Marker appended to salaries that were resolved from another cell.
pub const FALLBACK_MARKER: &str = "*";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn parse_table(result: &ParseResult) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Step")];
    header.extend(result.columns.iter().map(|column| {
        if column.is_placeholder() {
            header_cell(&column.key).fg(Color::Yellow)
        } else {
            header_cell(&column.key)
        }
    }));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=result.columns.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for step in &result.steps {
        let mut row = vec![step_cell(*step)];
        row.extend(result.columns.iter().map(|column| {
            match result.value(*step, &column.key) {
                Some(value) => Cell::new(format_salary(value)),
                None => dim_cell("-"),
            }
        }));
        table.add_row(row);
    }
    table
}

/// `step` then one column per key; missing values are empty.
pub fn parse_csv(result: &ParseResult) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    let mut header = vec!["step".to_string()];
    header.extend(result.columns.iter().map(|column| column.key.clone()));
    writer.write_record(&header).context("write csv header")?;
    for step in &result.steps {
        let mut record = vec![step.to_string()];
        record.extend(result.columns.iter().map(|column| {
            result
                .value(*step, &column.key)
                .map(format_salary)
                .unwrap_or_default()
        }));
        writer.write_record(&record).context("write csv row")?;
    }
    let bytes = writer.into_inner().context("flush csv")?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize json")
}

/// Visible columns by step; fallback values carry [`FALLBACK_MARKER`].
pub fn grid_table(grid: &SalaryGrid, options: &ResolveOptions) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Step")];
    header.extend(
        grid.visible_columns()
            .iter()
            .map(|column| header_cell(&column.key())),
    );
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=grid.visible_columns().len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for step in grid.steps() {
        let mut row = vec![step_cell(step)];
        row.extend(grid.visible_columns().iter().map(|column| {
            let target = CellKey::new(column.education.clone(), column.credits, step);
            resolution_cell(&resolve(grid, &target, options))
        }));
        table.add_row(row);
    }
    table
}

pub fn resolved_table(cell: &ResolvedCell) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Schedule"),
        header_cell("Column"),
        header_cell("Step"),
        header_cell("Salary"),
        header_cell("Provenance"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(format!("{} ({})", cell.school_year, cell.period)),
        Cell::new(&cell.column),
        Cell::new(cell.step),
        salary_cell(cell.salary),
        provenance_cell(cell.provenance),
        source_cell(cell.source.as_ref().map(ToString::to_string)),
    ]);
    table
}

pub fn diff_table(report: &DiffReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("School year"),
        header_cell("Period"),
        header_cell("Column"),
        header_cell("Step"),
        header_cell("Salary"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for record in &report.records {
        table.add_row(vec![
            Cell::new(&record.school_year),
            Cell::new(&record.period),
            Cell::new(record.column_key()).add_attribute(Attribute::Bold),
            Cell::new(record.step),
            Cell::new(format!("{:.2}", record.salary)),
        ]);
    }
    table
}

pub fn comparison_table(report: &ComparisonReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("District"),
        header_cell(&format!("{} step {}", report.column, report.step)),
        header_cell("Provenance"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in &report.rows {
        table.add_row(vec![
            Cell::new(&row.district).add_attribute(Attribute::Bold),
            salary_cell(row.salary),
            provenance_cell(row.provenance),
            source_cell(row.source.as_ref().map(ToString::to_string)),
        ]);
    }
    table
}

fn resolution_cell(resolution: &Resolution<'_>) -> Cell {
    match (resolution.provenance(), resolution.salary()) {
        (Provenance::Exact, Some(salary)) => Cell::new(format_salary(salary)),
        (Provenance::Fallback, Some(salary)) => {
            Cell::new(format!("{}{FALLBACK_MARKER}", format_salary(salary))).fg(Color::Yellow)
        }
        _ => dim_cell("-"),
    }
}

fn salary_cell(salary: Option<f64>) -> Cell {
    match salary {
        Some(value) => Cell::new(format!("{value:.2}")),
        None => dim_cell("-"),
    }
}

fn provenance_cell(provenance: Provenance) -> Cell {
    match provenance {
        Provenance::Exact => Cell::new(provenance).fg(Color::Green),
        Provenance::Fallback => Cell::new(provenance).fg(Color::Yellow),
        Provenance::None => dim_cell(provenance),
    }
}

fn source_cell(source: Option<String>) -> Cell {
    match source {
        Some(source) => Cell::new(source),
        None => dim_cell("-"),
    }
}

fn step_cell(step: u32) -> Cell {
    Cell::new(step)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
