//! Error types for guesses and stats persistence.

use derive_more::{Display, Error, From};

/// A guess that could not be applied to the lock.
///
/// All variants are recoverable: the caller re-prompts and the session is
/// left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GuessError {
    /// Wrong number of pin values
    #[display("expected {expected} pin values, got {actual}")]
    Length { expected: usize, actual: usize },
    /// A token that is not a pin value between 0 and 9
    #[display("'{token}' is not a pin value between 0 and 9")]
    Format { token: String },
    /// The lock is already open
    #[display("the lock is already open")]
    Finished,
}

/// Failure to write stats.
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display("stats file I/O failed: {_0}")]
    Io(std::io::Error),
    #[display("stats could not be serialized: {_0}")]
    Serialize(serde_json::Error),
}
