//! Error types for clipboard table parsing.

use thiserror::Error;

/// Reasons a pasted table could not be turned into a salary grid.
///
/// The messages are shown to users as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer than two non-empty lines.
    #[error("insufficient lines")]
    InsufficientLines,

    /// No header tokens, or no line starting with a step number.
    #[error("Could not find header and data rows")]
    MissingHeaderOrData,

    /// Column assembly produced nothing.
    #[error("Could not identify any education columns")]
    NoColumns,

    /// The data region held no step with a usable salary.
    #[error("No valid data rows found")]
    NoDataRows,
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
