//! Tests for cross-district comparison.

use salary_model::{CellKey, DEFAULT_PERIOD, Education, ResolveOptions, SalaryCell, Schedule};
use salary_transform::{Provenance, SalaryGrid, compare};

fn district(name: &str, cells: Vec<SalaryCell>) -> (String, SalaryGrid) {
    let schedule = Schedule::new("2024-2025", DEFAULT_PERIOD).with_salaries(cells);
    (name.to_string(), SalaryGrid::from_schedule(&schedule))
}

#[test]
fn rows_sorted_by_salary_with_misses_last() {
    let districts = vec![
        district("Amherst", vec![SalaryCell::recorded(5, Education::Master, 0, 62000.0)]),
        district("Boston", vec![SalaryCell::recorded(5, Education::Master, 0, 71000.0)]),
        district(
            "Chelsea",
            vec![
                SalaryCell::recorded(4, Education::Bachelor, 0, 64000.0),
                SalaryCell::calculated(5, Education::Master, 0, Some(69000.0), None),
            ],
        ),
        district("Dover", vec![SalaryCell::recorded(7, Education::Master, 0, 80000.0)]),
    ];
    let target = CellKey::new(Education::Master, 0, 5);

    let rows = compare(&districts, &target, &ResolveOptions::default());
    let order: Vec<&str> = rows.iter().map(|row| row.district.as_str()).collect();
    assert_eq!(order, vec!["Boston", "Chelsea", "Amherst", "Dover"]);

    assert_eq!(rows[0].provenance, Provenance::Exact);
    assert_eq!(rows[0].source.as_ref(), Some(&target));

    assert_eq!(rows[1].provenance, Provenance::Fallback);
    assert_eq!(rows[1].salary, Some(64000.0));
    assert_eq!(
        rows[1].source.as_ref().map(ToString::to_string).as_deref(),
        Some("B step 4")
    );

    assert_eq!(rows[3].provenance, Provenance::None);
    assert_eq!(rows[3].salary, None);
    assert_eq!(rows[3].source, None);
}

#[test]
fn ties_keep_district_order() {
    let districts = vec![
        district("Worcester", vec![SalaryCell::recorded(1, Education::Bachelor, 0, 50000.0)]),
        district("Acton", vec![SalaryCell::recorded(1, Education::Bachelor, 0, 50000.0)]),
    ];
    let rows = compare(
        &districts,
        &CellKey::new(Education::Bachelor, 0, 1),
        &ResolveOptions::default(),
    );
    assert_eq!(rows[0].district, "Acton");
    assert_eq!(rows[1].district, "Worcester");
}
