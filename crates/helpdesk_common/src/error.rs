//! Error types for the helpdesk core.
//!
//! Only data-access problems are errors. Empty text, tickets without a
//! category or solutions that were never suggested are normal inputs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelpdeskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Ticket #{0} not found")]
    TicketNotFound(i64),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl HelpdeskError {
    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            HelpdeskError::TicketNotFound(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, HelpdeskError>;
