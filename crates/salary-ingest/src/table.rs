//! Clipboard salary table parser.
//!
//! Input is whatever a user pasted: a spreadsheet copy, a PDF text dump or
//! OCR output. The parser runs as a two-phase state machine:
//!
//! 1. `CollectingHeader` gathers header tokens until a line starts with a
//!    step number. At that point the column count is inferred from the data
//!    region and the header tokens are turned into columns.
//! 2. `ReadingData` walks the remaining lines. A step line opens a new row;
//!    any other line is continuation data for the open row (OCR often wraps
//!    wide rows). Values collect in a pending buffer that is flushed into the
//!    grid, right-aligned, when the next step starts or input ends.

use std::collections::BTreeMap;

use tracing::{debug, debug_span, trace};

use salary_model::{Column, ParseOptions, ParseResult};

use crate::columns::{assemble_columns, infer_column_count};
use crate::error::{ParseError, Result};
use crate::values::{is_alphabetic, salary_value, step_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    CollectingHeader,
    ReadingData,
}

/// Values read for the step currently open.
#[derive(Debug, Default)]
struct PendingValues {
    step: Option<u32>,
    values: Vec<f64>,
}

impl PendingValues {
    fn open(&mut self, step: u32) {
        self.step = Some(step);
        self.values.clear();
    }

    fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    fn take(&mut self) -> Option<(u32, Vec<f64>)> {
        let step = self.step.take()?;
        Some((step, std::mem::take(&mut self.values)))
    }
}

struct TableParser<'a> {
    options: &'a ParseOptions,
    state: ParserState,
    header_tokens: Vec<String>,
    columns: Vec<Column>,
    pending: PendingValues,
    data: BTreeMap<u32, BTreeMap<String, f64>>,
}

impl<'a> TableParser<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            state: ParserState::CollectingHeader,
            header_tokens: Vec::new(),
            columns: Vec::new(),
            pending: PendingValues::default(),
            data: BTreeMap::new(),
        }
    }

    fn collect_header(&mut self, line: &str) {
        self.header_tokens.extend(
            line.split_whitespace()
                .filter(|token| !token.eq_ignore_ascii_case("STEP"))
                .map(String::from),
        );
    }

    /// Switches to data reading; `data_lines` starts at the first step line.
    fn begin_data(&mut self, data_lines: &[&str]) -> Result<()> {
        if self.header_tokens.is_empty() {
            return Err(ParseError::MissingHeaderOrData);
        }
        let column_count = infer_column_count(
            data_lines,
            self.options.probe_lines,
            self.header_tokens.len(),
        );
        let (_, columns) = assemble_columns(
            &self.header_tokens,
            column_count,
            &self.options.vocabulary,
        );
        if columns.is_empty() {
            return Err(ParseError::NoColumns);
        }
        debug!(
            column_count,
            columns = ?columns.iter().map(|column| column.key.as_str()).collect::<Vec<_>>(),
            "header resolved"
        );
        self.columns = columns;
        self.state = ParserState::ReadingData;
        Ok(())
    }

    fn read_data_line(&mut self, line: &str) {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return;
        };
        match step_number(first).filter(|step| *step > 0) {
            Some(step) => {
                self.flush();
                self.pending.open(step);
                for token in tokens {
                    if let Some(value) = salary_value(token) {
                        self.pending.push(value);
                    }
                }
            }
            None => {
                if self.pending.step.is_none() {
                    trace!(line, "continuation line without an open step");
                    return;
                }
                for token in std::iter::once(first).chain(tokens) {
                    if is_alphabetic(token) {
                        continue;
                    }
                    if let Some(value) = salary_value(token) {
                        self.pending.push(value);
                    }
                }
            }
        }
    }

    /// Writes the open step's values into the grid, right-aligned.
    fn flush(&mut self) {
        let Some((step, values)) = self.pending.take() else {
            return;
        };
        if values.is_empty() {
            trace!(step, "step without values skipped");
            return;
        }
        let width = self.columns.len();
        if values.len() > width {
            debug!(
                step,
                values = values.len(),
                columns = width,
                "extra values dropped"
            );
        }
        let offset = width.saturating_sub(values.len());
        let row = self.data.entry(step).or_default();
        for (column, value) in self.columns[offset..].iter().zip(values) {
            row.insert(column.key.clone(), value);
        }
    }

    fn finish(mut self) -> Result<ParseResult> {
        if self.state == ParserState::CollectingHeader {
            return Err(ParseError::MissingHeaderOrData);
        }
        self.flush();
        if self.data.is_empty() {
            return Err(ParseError::NoDataRows);
        }
        Ok(ParseResult::parsed(self.columns, self.data))
    }
}

/// Parses pasted schedule text with the default vocabulary.
///
/// Never fails: problems are reported through `success`/`error`.
pub fn parse(text: &str) -> ParseResult {
    parse_with_options(text, &ParseOptions::default())
}

/// Parses pasted schedule text with explicit options.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> ParseResult {
    match try_parse(text, options) {
        Ok(result) => result,
        Err(error) => {
            debug!(%error, "table parse failed");
            ParseResult::failure(error.to_string())
        }
    }
}

/// Parses pasted schedule text, returning the typed failure reason.
///
/// # Errors
///
/// Returns a [`ParseError`] when the text has too few lines, no
/// header/data boundary, no recognizable columns or no data rows.
pub fn try_parse(text: &str, options: &ParseOptions) -> Result<ParseResult> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let span = debug_span!("parse_table", lines = lines.len());
    let _guard = span.enter();
    if lines.len() < 2 {
        return Err(ParseError::InsufficientLines);
    }

    let mut parser = TableParser::new(options);
    for (index, line) in lines.iter().enumerate() {
        match parser.state {
            ParserState::CollectingHeader => {
                let starts_with_step = line
                    .split_whitespace()
                    .next()
                    .and_then(step_number)
                    .is_some();
                if starts_with_step {
                    parser.begin_data(&lines[index..])?;
                    parser.read_data_line(line);
                } else {
                    parser.collect_header(line);
                }
            }
            ParserState::ReadingData => parser.read_data_line(line),
        }
    }
    let result = parser.finish()?;
    debug!(
        steps = result.steps.len(),
        columns = result.columns.len(),
        cells = result.cell_count(),
        "table parsed"
    );
    Ok(result)
}
