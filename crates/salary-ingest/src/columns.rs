//! Column count inference and header-to-column assembly.

use std::collections::HashMap;

use tracing::debug;

use salary_model::{Column, EducationVocabulary};

use crate::header::{normalize_header_token, parse_header_phrase, parse_header_token};
use crate::values::{numeric_value, step_number};

/// Longest header phrase considered when a token is not recognized alone.
const MAX_PHRASE_TOKENS: usize = 4;

/// Which rule produced the final column list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStrategy {
    /// Enough tokens were recognized on their own.
    Recognized,
    /// One header token per data column.
    OneToOne,
    /// Greedy single-token and phrase matching with placeholders.
    Greedy,
}

/// Infers how many salary columns the data region holds.
///
/// Looks at the first `probe_lines` lines of the data region. For each line
/// that starts with a step number, counts the numeric tokens after it and
/// keeps the maximum. Falls back to `header_token_count` when no such line
/// carries a number.
pub fn infer_column_count(
    data_lines: &[&str],
    probe_lines: usize,
    header_token_count: usize,
) -> usize {
    let widest = data_lines
        .iter()
        .take(probe_lines)
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            step_number(tokens.next()?)?;
            Some(tokens.filter(|token| numeric_value(token).is_some()).count())
        })
        .max()
        .unwrap_or(0);
    if widest == 0 {
        header_token_count
    } else {
        widest
    }
}

/// Builds `column_count` columns from the collected header tokens.
pub fn assemble_columns(
    header_tokens: &[String],
    column_count: usize,
    vocabulary: &EducationVocabulary,
) -> (ColumnStrategy, Vec<Column>) {
    let normalized: Vec<String> = header_tokens
        .iter()
        .map(|token| normalize_header_token(token))
        .collect();
    let recognized: Vec<Option<Column>> = normalized
        .iter()
        .map(|token| parse_header_token(token, vocabulary))
        .collect();
    let recognized_count = recognized.iter().flatten().count();

    let (strategy, columns) = if recognized_count >= column_count {
        let columns = recognized.into_iter().flatten().take(column_count).collect();
        (ColumnStrategy::Recognized, columns)
    } else if header_tokens.len() == column_count {
        let columns = recognized
            .into_iter()
            .zip(&normalized)
            .enumerate()
            .map(|(index, (column, token))| {
                column
                    .or_else(|| parse_header_phrase(token, vocabulary))
                    .unwrap_or_else(|| Column::placeholder(index + 1))
            })
            .collect();
        (ColumnStrategy::OneToOne, columns)
    } else {
        let columns = assemble_greedy(header_tokens, &recognized, column_count, vocabulary);
        (ColumnStrategy::Greedy, columns)
    };
    debug!(
        ?strategy,
        header_tokens = header_tokens.len(),
        recognized = recognized_count,
        column_count,
        "assembled columns"
    );
    (strategy, dedupe_keys(columns))
}

fn assemble_greedy(
    tokens: &[String],
    recognized: &[Option<Column>],
    column_count: usize,
    vocabulary: &EducationVocabulary,
) -> Vec<Column> {
    let mut columns = Vec::with_capacity(column_count);
    let mut index = 0;
    while index < tokens.len() && columns.len() < column_count {
        if let Some(column) = &recognized[index] {
            // A recognized word may still be the head of a phrase such as
            // `MASTER'S DEGREE +30`; only unrecognized tokens may be absorbed.
            match extend_with_credits(tokens, recognized, index, vocabulary) {
                Some((phrase_column, consumed)) => {
                    columns.push(phrase_column);
                    index += consumed;
                }
                None => {
                    columns.push(column.clone());
                    index += 1;
                }
            }
            continue;
        }
        match phrase_at(tokens, recognized, index, vocabulary) {
            Some((column, consumed)) => {
                columns.push(column);
                index += consumed;
            }
            None => {
                columns.push(Column::placeholder(columns.len() + 1));
                index += 1;
            }
        }
    }
    while columns.len() < column_count {
        columns.push(Column::placeholder(columns.len() + 1));
    }
    columns
}

/// Longest-first phrase match starting at an unrecognized token.
///
/// A phrase never swallows a later token that is a header on its own.
fn phrase_at(
    tokens: &[String],
    recognized: &[Option<Column>],
    start: usize,
    vocabulary: &EducationVocabulary,
) -> Option<(Column, usize)> {
    (2..=MAX_PHRASE_TOKENS).rev().find_map(|len| {
        let end = start + len;
        if end > tokens.len() || recognized[start + 1..end].iter().any(Option::is_some) {
            return None;
        }
        parse_header_phrase(&tokens[start..end].join(" "), vocabulary).map(|column| (column, len))
    })
}

/// Shortest phrase from a recognized token that adds a credit amount.
fn extend_with_credits(
    tokens: &[String],
    recognized: &[Option<Column>],
    start: usize,
    vocabulary: &EducationVocabulary,
) -> Option<(Column, usize)> {
    let base = recognized[start].as_ref()?;
    if base.credits > 0 {
        return None;
    }
    for len in 2..=MAX_PHRASE_TOKENS {
        let end = start + len;
        if end > tokens.len() || recognized[end - 1].is_some() {
            return None;
        }
        if let Some(column) = parse_header_phrase(&tokens[start..end].join(" "), vocabulary)
            && column.education == base.education
            && column.credits > 0
        {
            return Some((column, len));
        }
    }
    None
}

/// Appends `_1`, `_2`, ... to repeated keys; education and credits are kept.
pub fn dedupe_keys(columns: Vec<Column>) -> Vec<Column> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    columns
        .into_iter()
        .map(|column| {
            let count = seen.entry(column.key.clone()).or_insert(0);
            let suffix = *count;
            *count += 1;
            if suffix == 0 {
                column
            } else {
                let key = format!("{}_{suffix}", column.key);
                column.with_key(key)
            }
        })
        .collect()
}
