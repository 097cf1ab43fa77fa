//! Error types for playground runs.

use kem_types::{KemError, RunErrors};
use thiserror::Error;

/// Why a run produced no output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// The program did not lex.
    #[error("{0}")]
    Lex(#[from] RunErrors),
    /// A statement failed while scanning.
    #[error("{0}")]
    Scan(#[from] KemError),
    /// The request was refused before running.
    #[error("{0}")]
    Rejected(#[from] RunRejection),
}

impl RunError {
    /// Structured errors carried by this failure, in source order.
    pub fn diagnostics(&self) -> Vec<&KemError> {
        match self {
            Self::Lex(errors) => errors.errors.iter().collect(),
            Self::Scan(error) => vec![error],
            Self::Rejected(_) => Vec::new(),
        }
    }
}

/// A run request refused by the playground envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunRejection {
    #[error("No code provided")]
    NoCode,
    #[error("Code too long")]
    CodeTooLong,
    #[error("Input too long")]
    InputTooLong,
}

/// An unrecognised run mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown run mode '{0}' (expected 'mock' or 'scan')")]
pub struct ParseModeError(pub String);

pub type RunResult<T> = Result<T, RunError>;
