//! Plain-text rendering of a parsed grid.

use salary_model::{ParseResult, format_salary};

/// Renders a grid as a whitespace table the parser reads back unchanged.
///
/// Each step line lists only the values it has. Because short rows are
/// right-aligned on parse, gaps survive a round trip only on the left.
/// A failed parse renders as an empty string.
pub fn render_plain_text(result: &ParseResult) -> String {
    if !result.success {
        return String::new();
    }
    let mut lines = Vec::with_capacity(result.steps.len() + 1);
    let mut header = vec!["STEP".to_string()];
    header.extend(result.columns.iter().map(|column| column.key.clone()));
    lines.push(header.join(" "));
    for step in &result.steps {
        let mut line = vec![step.to_string()];
        line.extend(
            result
                .columns
                .iter()
                .filter_map(|column| result.value(*step, &column.key))
                .map(format_salary),
        );
        lines.push(line.join(" "));
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
