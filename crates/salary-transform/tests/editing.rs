//! Tests for schedule shape editing.

use salary_model::{
    CellKey, ColumnId, DEFAULT_PERIOD, EditOptions, Education, SalaryCell, Schedule,
};
use salary_transform::{
    InputGrid, TransformError, add_column, add_schedule, add_step, build_edit_records,
    next_school_year, remove_column, remove_step,
};

fn base_schedule(year: &str) -> Schedule {
    Schedule::new(year, DEFAULT_PERIOD).with_salaries(vec![
        SalaryCell::recorded(1, Education::Bachelor, 0, 50000.0),
        SalaryCell::recorded(2, Education::Bachelor, 0, 52000.0),
        SalaryCell::recorded(1, Education::Master, 0, 55000.0),
        SalaryCell::calculated(2, Education::Master, 0, Some(57000.0), None),
    ])
}

fn column_keys(schedule: &Schedule) -> Vec<String> {
    schedule.columns().iter().map(ColumnId::key).collect()
}

#[test]
fn add_step_appends_blank_row() {
    let mut schedule = base_schedule("2023-2024");
    assert_eq!(add_step(&mut schedule), 3);
    assert_eq!(schedule.steps(), vec![1, 2, 3]);

    let new_cells: Vec<&SalaryCell> = schedule.salaries.iter().filter(|cell| cell.step == 3).collect();
    assert_eq!(new_cells.len(), 2);
    assert!(new_cells.iter().all(|cell| cell.salary.is_none() && !cell.is_calculated));
    schedule.validate().unwrap();
}

#[test]
fn remove_step_requires_existing_step() {
    let mut schedule = base_schedule("2023-2024");
    assert_eq!(remove_step(&mut schedule, 2).unwrap(), 2);
    assert_eq!(schedule.steps(), vec![1]);
    assert!(matches!(
        remove_step(&mut schedule, 7),
        Err(TransformError::StepNotFound { step: 7, .. })
    ));
}

#[test]
fn add_column_refuses_duplicates() {
    let mut schedule = base_schedule("2023-2024");
    add_column(&mut schedule, Education::Master, 30).unwrap();
    assert_eq!(column_keys(&schedule), vec!["B", "M", "M+30"]);
    assert!(
        schedule
            .cell(&CellKey::new(Education::Master, 30, 2))
            .is_some_and(|cell| cell.salary.is_none())
    );

    let err = add_column(&mut schedule, Education::Master, 30).unwrap_err();
    assert_eq!(
        err.to_string(),
        "column M+30 already exists in 2023-2024 (Full Year)"
    );
}

#[test]
fn add_column_to_empty_schedule_starts_at_step_one() {
    let mut schedule = Schedule::new("2023-2024", DEFAULT_PERIOD);
    add_column(&mut schedule, Education::Doctorate, 0).unwrap();
    assert_eq!(schedule.steps(), vec![1]);
    assert_eq!(column_keys(&schedule), vec!["D"]);
}

#[test]
fn remove_column_drops_every_step() {
    let mut schedule = base_schedule("2023-2024");
    assert_eq!(remove_column(&mut schedule, &Education::Master, 0).unwrap(), 2);
    assert_eq!(column_keys(&schedule), vec!["B"]);
    assert!(matches!(
        remove_column(&mut schedule, &Education::Master, 0),
        Err(TransformError::ColumnNotFound { .. })
    ));
}

#[test]
fn next_school_year_follows_latest() {
    let schedules = vec![
        base_schedule("2022-2023"),
        base_schedule("2024-2025"),
        base_schedule("2023-2024"),
        Schedule::new("not a year", DEFAULT_PERIOD),
    ];
    assert_eq!(next_school_year(&schedules).as_deref(), Some("2025-2026"));
    assert_eq!(next_school_year(&[]), None);
}

#[test]
fn add_schedule_copies_latest_shape() {
    let mut schedules = vec![base_schedule("2023-2024")];
    let id = add_schedule(&mut schedules, "Half Year").unwrap();
    assert_eq!(id.school_year, "2024-2025");
    assert_eq!(id.period, "Half Year");

    let added = &schedules[1];
    assert_eq!(added.steps(), vec![1, 2]);
    assert_eq!(column_keys(added), vec!["B", "M"]);
    assert!(
        added
            .salaries
            .iter()
            .all(|cell| cell.salary.is_none() && !cell.is_calculated)
    );

    let mut empty = Vec::new();
    assert_eq!(
        add_schedule(&mut empty, DEFAULT_PERIOD),
        Err(TransformError::NoSchedules)
    );
}

#[test]
fn new_rows_produce_records_once_filled() {
    let mut schedule = base_schedule("2023-2024");
    let step = add_step(&mut schedule);
    let originals = [schedule];
    let id = originals[0].id();

    let mut input = InputGrid::from_schedules(&originals);
    input.set(&id, CellKey::new(Education::Bachelor, 0, step), "54000");

    let outcome = build_edit_records(&originals, &input, &EditOptions::default());
    assert!(outcome.is_clean());
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].step, 3);
    assert_eq!(outcome.records[0].salary, 54000.0);
}
