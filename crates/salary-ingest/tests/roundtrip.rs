use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::subsequence;

use salary_ingest::{parse, render_plain_text};

const COLUMN_POOL: &[&str] = &[
    "B", "B+15", "B+30", "M", "M+15", "M+30", "M+45", "M+60", "D",
];

fn table_text(columns: &[&str], rows: &[Vec<u64>]) -> String {
    let mut text = format!("Step {}\n", columns.join(" "));
    for (index, row) in rows.iter().enumerate() {
        let values: Vec<String> = row
            .iter()
            .take(columns.len())
            .map(|cents| format!("{:.2}", *cents as f64 / 100.0))
            .collect();
        text.push_str(&format!("{} {}\n", index + 1, values.join(" ")));
    }
    text
}

proptest! {
    #[test]
    fn full_tables_parse_exactly(
        columns in subsequence(COLUMN_POOL, 1..=COLUMN_POOL.len()),
        rows in vec(vec(1_000_000u64..20_000_000, COLUMN_POOL.len()), 1..15),
    ) {
        let result = parse(&table_text(&columns, &rows));
        prop_assert!(result.success);

        let keys: Vec<&str> = result.columns.iter().map(|c| c.key.as_str()).collect();
        prop_assert_eq!(&keys, &columns);
        let expected_steps: Vec<u32> = (1..=rows.len() as u32).collect();
        prop_assert_eq!(&result.steps, &expected_steps);

        for (index, row) in rows.iter().enumerate() {
            for (key, cents) in columns.iter().zip(row) {
                let step = index as u32 + 1;
                prop_assert_eq!(result.value(step, key), Some(*cents as f64 / 100.0));
            }
        }
    }

    #[test]
    fn rendered_tables_parse_back(
        columns in subsequence(COLUMN_POOL, 1..=COLUMN_POOL.len()),
        rows in vec(vec(1_000_000u64..20_000_000, COLUMN_POOL.len()), 1..15),
    ) {
        let first = parse(&table_text(&columns, &rows));
        let second = parse(&render_plain_text(&first));
        prop_assert_eq!(second.columns, first.columns);
        prop_assert_eq!(second.data, first.data);
    }
}
