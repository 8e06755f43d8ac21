//! Integration tests for the clipboard table parser.

use salary_ingest::{ParseError, parse, parse_with_options, try_parse};
use salary_model::{Education, EducationVocabulary, ParseOptions};

fn keys(result: &salary_model::ParseResult) -> Vec<&str> {
    result.columns.iter().map(|column| column.key.as_str()).collect()
}

#[test]
fn parses_simple_table() {
    let text = "Step   B      M\n1      50000  55000\n2      52000  57000\n";
    let result = parse(text);

    assert!(result.success, "{:?}", result.error);
    assert_eq!(keys(&result), vec!["B", "M"]);
    assert_eq!(result.columns[0].education, Education::Bachelor);
    assert_eq!(result.columns[1].education, Education::Master);
    assert_eq!(result.columns[1].credits, 0);
    assert_eq!(result.steps, vec![1, 2]);
    assert_eq!(result.value(1, "B"), Some(50000.0));
    assert_eq!(result.value(1, "M"), Some(55000.0));
    assert_eq!(result.value(2, "B"), Some(52000.0));
    assert_eq!(result.value(2, "M"), Some(57000.0));
    assert!(result.error.is_none());
}

#[test]
fn parses_credit_suffix_and_ocr_artifact() {
    let text = "STEP BA15 MA\n1 41.124.59 45,000\n2 42.500.00 $46,000";
    let result = parse(text);

    assert!(result.success);
    assert_eq!(keys(&result), vec!["B+15", "M"]);
    assert_eq!(result.columns[0].education, Education::Bachelor);
    assert_eq!(result.columns[0].credits, 15);
    assert_eq!(result.value(1, "B+15"), Some(41124.59));
    assert_eq!(result.value(2, "B+15"), Some(42500.0));
    assert_eq!(result.value(2, "M"), Some(46000.0));
}

#[test]
fn single_line_is_insufficient() {
    let result = parse("Step B M 50000 55000");
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("insufficient lines"));
    assert!(result.columns.is_empty());
    assert!(result.steps.is_empty());

    assert_eq!(parse("").error.as_deref(), Some("insufficient lines"));
    assert_eq!(parse("  \n\n   \n").error.as_deref(), Some("insufficient lines"));
}

#[test]
fn try_parse_exposes_typed_errors() {
    let options = ParseOptions::default();
    assert_eq!(
        try_parse("STEP", &options).unwrap_err(),
        ParseError::InsufficientLines
    );
    assert_eq!(
        try_parse("!!!\n###", &options).unwrap_err(),
        ParseError::MissingHeaderOrData
    );
    assert_eq!(
        try_parse("STEP B M\n1\n2", &options).unwrap_err(),
        ParseError::NoDataRows
    );
    assert_eq!(
        try_parse("STEP B M\n1 0 0\n2 -1 n/a", &options).unwrap_err(),
        ParseError::NoDataRows
    );
}

#[test]
fn skips_title_lines_and_formats_currency() {
    let text = "\
Springfield Public Schools
Teachers Salary Schedule 2024-2025
Step Bachelor's Master's Master's+30 CAGS/DOC
1 $48,210 $52,500 $55,000 $58,300
2 $49,900 $54,100 $56,800 $60,050
3 $51,650 $55,800 $58,700 $61,900
";
    let result = parse(text);

    assert!(result.success);
    assert_eq!(keys(&result), vec!["B", "M", "M+30", "D"]);
    assert_eq!(result.steps, vec![1, 2, 3]);
    assert_eq!(result.value(3, "D"), Some(61900.0));
    assert_eq!(result.value(2, "M+30"), Some(56800.0));
}

#[test]
fn continuation_lines_extend_the_open_step() {
    let text = "\
STEP B B+15 M M+30
1 45000 46000
Masters 47000 48000
2 46000 47000 48000 49000
";
    let result = parse(text);

    assert!(result.success);
    assert_eq!(result.value(1, "B"), Some(45000.0));
    assert_eq!(result.value(1, "B+15"), Some(46000.0));
    assert_eq!(result.value(1, "M"), Some(47000.0));
    assert_eq!(result.value(1, "M+30"), Some(48000.0));
    assert_eq!(result.value(2, "M+30"), Some(49000.0));
}

#[test]
fn continuation_at_end_is_flushed() {
    let text = "STEP B M\n1 50000 55000\n2 52000\nMasters 57000";
    let result = parse(text);
    assert_eq!(result.value(2, "B"), Some(52000.0));
    assert_eq!(result.value(2, "M"), Some(57000.0));
}

#[test]
fn extra_data_columns_get_placeholders() {
    let text = "STEP B M\n1 50000 55000 60000\n2 52000 57000 62000";
    let result = parse(text);

    assert!(result.success);
    assert_eq!(keys(&result), vec!["B", "M", "Col3"]);
    assert_eq!(result.value(1, "Col3"), Some(60000.0));
}

#[test]
fn duplicate_headers_are_suffixed() {
    let result = parse("STEP MA MA\n1 50000 51000");
    assert_eq!(keys(&result), vec!["M", "M_1"]);
    assert_eq!(result.columns[1].education, Education::Master);
    assert_eq!(result.value(1, "M_1"), Some(51000.0));
}

#[test]
fn step_zero_is_not_a_new_row() {
    let result = parse("STEP B M\n1 50000\n0 55000\n2 52000 57000");
    assert_eq!(result.steps, vec![1, 2]);
    assert_eq!(result.value(1, "B"), Some(50000.0));
    assert_eq!(result.value(1, "M"), Some(55000.0));
}

#[test]
fn vocabulary_is_injectable() {
    let text = "STEP I II\n1 50000 52000\n2 51000 53000";

    let default = parse(text);
    assert_eq!(keys(&default), vec!["Col1", "Col2"]);

    let options = ParseOptions::new().with_vocabulary(EducationVocabulary::new([
        ("I", Education::Bachelor),
        ("II", Education::Master),
    ]));
    let custom = parse_with_options(text, &options);
    assert_eq!(keys(&custom), vec!["B", "M"]);
    assert_eq!(custom.value(2, "M"), Some(53000.0));
}

#[test]
fn probe_window_limits_inference() {
    let text = "STEP B M D\n1 50000\n2 50000 55000 60000";
    let options = ParseOptions::new().with_probe_lines(1);
    let result = parse_with_options(text, &options);
    assert_eq!(keys(&result), vec!["B"]);
    assert_eq!(result.value(2, "B"), Some(50000.0));
}

#[test]
fn phrase_headers_carry_credits() {
    let text = "STEP MASTER'S DEGREE +30 CAGS\n1 60000 62000 64000\n2 61000 63000 65000";
    let result = parse(text);
    assert_eq!(keys(&result), vec!["M+30", "M+60", "Col3"]);
    assert_eq!(result.value(1, "M+60"), Some(62000.0));
}
