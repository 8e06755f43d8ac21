//! Cell value cleanup for pasted and OCR'd salary figures.

use std::borrow::Cow;

use salary_model::parse_amount;

/// Parses a step number token (`^\d+$`).
pub fn step_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Parses a numeric cell, stripping `$`/`,` and repairing OCR dot artifacts.
pub fn numeric_value(token: &str) -> Option<f64> {
    parse_amount(&collapse_ocr_dots(token))
}

/// Parses a salary candidate: numeric and strictly positive.
pub fn salary_value(token: &str) -> Option<f64> {
    numeric_value(token).filter(|value| *value > 0.0)
}

/// Turns `41.124.59` into `41124.59` by keeping only the last dot.
fn collapse_ocr_dots(token: &str) -> Cow<'_, str> {
    let dots = token.matches('.').count();
    if dots < 2 {
        return Cow::Borrowed(token);
    }
    let mut seen = 0;
    let collapsed: String = token
        .chars()
        .filter(|ch| {
            if *ch != '.' {
                return true;
            }
            seen += 1;
            seen == dots
        })
        .collect();
    Cow::Owned(collapsed)
}

pub fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}
