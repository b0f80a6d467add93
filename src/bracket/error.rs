use thiserror::Error;

use crate::database::StoreError;

pub type BracketResult<T> = Result<T, BracketError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BracketError {
    /// Store unreachable or timed out. The caller may retry.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("{0}")]
    Validation(String),
    #[error("invalid score {0}: scores cannot be negative")]
    InvalidScore(i32),
    #[error("match {0} already has a different result, submit a correction to overwrite it")]
    ScoreAlreadyRecorded(String),
    #[error("{kind} {id} does not exist")]
    NotFound { kind: &'static str, id: String },
    #[error("{0}")]
    Conflict(String)
}

impl BracketError {
    pub fn validation(message: impl Into<String>) -> Self {
        BracketError::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: &str) -> Self {
        BracketError::NotFound { kind, id: id.to_string() }
    }
}

impl From<StoreError> for BracketError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(_) | StoreError::Timeout(_) => BracketError::StorageUnavailable(e.to_string()),
            StoreError::Conflict(message) => BracketError::Conflict(message)
        }
    }
}
