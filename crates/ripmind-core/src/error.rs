//! Error types for RIP MIND

use thiserror::Error;

/// Main error type for store and configuration operations
#[derive(Error, Debug)]
pub enum LetterError {
    /// A letter with the same id is already in the archive
    #[error("Letter already archived: {0}")]
    DuplicateLetter(String),

    /// Error during storage operations (redb)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using LetterError
pub type LetterResult<T> = Result<T, LetterError>;

/// A required field was missing when leaving the identity step.
///
/// The display text is what the user sees in the blocking alert.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a nickname.")]
    MissingNickname,

    #[error("Please enter a phone number.")]
    MissingPhone,

    #[error("Please agree to the collection and use of personal information.")]
    ConsentNotAcknowledged,
}

/// The external notification call failed.
///
/// Only ever logged; the flow never waits on or retries a notification.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: HTTP {status} - {body}")]
    Status { status: u16, body: String },
}
