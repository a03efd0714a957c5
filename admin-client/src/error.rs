use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminClientError {
    // Транспортные ошибки
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    // Ответы сервера вне 2xx
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    // Ошибки сериализации/десериализации
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AdminClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminClientError::NotFound)
    }

    /// True for failures that never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, AdminClientError::HttpError(e) if e.status().is_none())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AdminClientError::NotFound => Some(404),
            AdminClientError::ServerError { status, .. } => Some(*status),
            AdminClientError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AdminClientError {
    fn from(err: serde_json::Error) -> Self {
        AdminClientError::SerializationError(err.to_string())
    }
}
