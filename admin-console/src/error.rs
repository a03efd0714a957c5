use admin_client::AdminClientError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field path (`"address.city"`) to a human-readable message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Client(#[from] AdminClientError),

    #[error("Please fix all errors ({} field(s))", .0.len())]
    Validation(FieldErrors),

    #[error("Fix email validation errors")]
    EmailTaken,

    #[error("A submit is already in progress")]
    SubmitInFlight,

    #[error("Bulk update failed for {failed} of {total} task(s); nothing was changed locally")]
    BulkUpdate { failed: usize, total: usize },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Record #{0} is not loaded")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConsoleError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ConsoleError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
