//! Error types for the standing report.

use thiserror::Error;

/// Result type alias for load and report operations
pub type Result<T> = std::result::Result<T, StandingError>;

/// Errors that abort a report run.
#[derive(Error, Debug)]
pub enum StandingError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file could not be split into records
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A loan, return or report row references a book missing from the catalog
    #[error("Book {book_id} not found in catalog")]
    NotFound { book_id: String },

    /// A numeric field could not be interpreted
    #[error("{source_name} line {line}: cannot read {field} from {value:?}")]
    Coercion {
        source_name: &'static str,
        line: usize,
        field: &'static str,
        value: String,
    },

    /// A record has the wrong number of fields
    #[error("{source_name} line {line}: expected {expected} fields, found {found}")]
    MalformedRecord {
        source_name: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Due timestamp is not a YYMMDD value with a valid month
    #[error("Invalid due date timestamp {timestamp}")]
    InvalidDate { timestamp: i64 },
}
