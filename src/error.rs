use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Input selection errors (recoverable: the prompt loop asks again)
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum InputError {
    #[error("filename '{0}' must end with .csv (case-insensitive)")]
    FileName(String),

    #[error("file '{}' not found", .0.display())]
    FileNotFound(PathBuf),
}

// ---------------------------------------------------------------------------
// Validation errors (fatal: no output is produced)
// ---------------------------------------------------------------------------

/// The part of a `MM/DD/YYYY` date that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateComponent {
    /// Not exactly three `/`-separated fields.
    Format,
    Year,
    Month,
    Day,
}

impl fmt::Display for DateComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateComponent::Format => write!(f, "format"),
            DateComponent::Year => write!(f, "year"),
            DateComponent::Month => write!(f, "month"),
            DateComponent::Day => write!(f, "day"),
        }
    }
}

/// Structural or content problems found while validating the input CSV.
///
/// `line` is the 1-based line number in the source file (the header is line 1).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("the file contains no data rows")]
    NoRecords,

    #[error("line {line}: invalid date '{date}' (bad {component})")]
    InvalidDate {
        line: u64,
        date: String,
        component: DateComponent,
    },

    #[error("line {line}: expected {expected} values but found {actual}")]
    ColumnCount {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}: '{value}' in column '{column}' is not a valid non-negative number")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },
}
