//! Salary schedule ingestion.
//!
//! This crate turns pasted or OCR'd salary tables into structured grids.
//!
//! # Features
//!
//! - **Table parsing**: header/data boundary detection, continuation lines,
//!   right-aligned short rows
//! - **Header recognition**: degree synonyms, `+N` credit suffixes, CAGS and
//!   doctorate special cases, multi-word phrases
//! - **Column inference**: column count taken from the data rather than the
//!   (often noisy) header line
//! - **Rendering**: a parsed grid back to plain text
//!
//! # Example
//!
//! ```
//! use salary_ingest::parse;
//!
//! let result = parse("Step B M\n1 50000 55000\n2 52000 57000");
//! assert!(result.success);
//! assert_eq!(result.steps, vec![1, 2]);
//! assert_eq!(result.value(2, "M"), Some(57000.0));
//! ```

mod columns;
mod error;
mod header;
mod render;
mod table;
mod values;

// === Error Types ===
pub use error::{ParseError, Result};

// === Parsing ===
pub use table::{parse, parse_with_options, try_parse};

// === Header Recognition ===
pub use columns::{ColumnStrategy, assemble_columns, dedupe_keys, infer_column_count};
pub use header::{
    CAGS_DEFAULT_CREDITS, normalize_header_token, parse_header_phrase, parse_header_token,
};

// === Values ===
pub use values::{numeric_value, salary_value};

// === Rendering ===
pub use render::render_plain_text;
