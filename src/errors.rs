use std::result::Result as StdResult;

use thiserror::Error;

use crate::domain::RecordId;

/// Unified error type for the domain, ledger, and storage layers.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Index {index} is out of range (ledger holds {len} expenses)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Category `{0}` does not exist. Add it first.")]
    UnknownCategory(String),
    #[error("Expense {0} not found")]
    UnknownRecord(RecordId),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, ExpenseError>;

impl ExpenseError {
    pub fn is_storage(&self) -> bool {
        matches!(self, ExpenseError::Storage(_))
    }
}

impl From<rusqlite::Error> for ExpenseError {
    fn from(err: rusqlite::Error) -> Self {
        ExpenseError::Storage(format!("SQLite error: {}", err))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}
