//! Salary amount helpers shared by the parser and the edit engine.

/// Parses a money-like string (`$52,000.00`, ` 41124.5 `) as f64.
///
/// Returns `None` for empty or non-numeric input.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rounds a salary to cents.
pub fn round_salary(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compares two salaries after rounding both to cents.
pub fn same_salary(left: f64, right: f64) -> bool {
    // Compare in integer cents so representation noise cannot leak through.
    (left * 100.0).round() as i64 == (right * 100.0).round() as i64
}

/// Formats a salary without trailing zeros (`50000`, `41124.5`, `41124.59`).
pub fn format_salary(value: f64) -> String {
    let s = format!("{:.2}", round_salary(value));
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
