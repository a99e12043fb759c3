//! Error types for the library engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during engine operation.
///
/// Every variant is recoverable. An issue request for an item that is already
/// on loan is not an error: it is reported as
/// [`IssueOutcome::Queued`](crate::engine::IssueOutcome::Queued).
#[derive(Error, Debug)]
pub enum EngineError {
    /// Borrower identifier is not in the catalog
    #[error("Borrower {borrower} is not registered")]
    UnknownBorrower { borrower: String },

    /// Item identifier is not in the catalog
    #[error("Item {item} not found in the catalog")]
    UnknownItem { item: String },

    /// Borrower already holds as many items as allowed
    #[error("Borrower {borrower} has reached the loan limit of {limit}")]
    IssueLimitExceeded { borrower: String, limit: usize },

    /// No unreturned loan matches the borrower/item pair
    #[error("No open transaction for borrower {borrower} and item {item}")]
    NoOpenTransaction { borrower: String, item: String },

    /// A record with the same identifier is already indexed
    #[error("Duplicate identifier {id}")]
    DuplicateIdentifier { id: String },

    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A transaction counter or fine amount left its representable range
    #[error("Arithmetic overflow computing {what}")]
    Overflow { what: &'static str },

    /// The shared engine's lock was poisoned by a panicking holder
    #[error("Engine lock poisoned")]
    LockPoisoned,

    /// Missing input file argument
    #[error("Missing input file argument. Usage: library-engine <catalog.csv> <commands.csv>")]
    MissingArgument,
}
