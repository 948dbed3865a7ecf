use thiserror::Error;

/// Classification of a failed REST call, for callers that branch on the
/// outcome rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    InvalidCredentials,
    ServerError,
    NetworkError,
    Validation,
    Storage,
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// A protected call was rejected (401)
    #[error("Unauthorized - Please login again")]
    Unauthorized,

    /// Login was rejected (401)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Any other non-success response; carries the body verbatim when there
    /// was one
    #[error("{0}")]
    ServerError(String),

    /// No response was obtained at all
    #[error("{message}")]
    NetworkError {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),

    /// The token could not be persisted or removed
    #[error("Session storage failed: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthorized => ErrorKind::Unauthorized,
            ApiError::InvalidCredentials => ErrorKind::InvalidCredentials,
            ApiError::ServerError(_) => ErrorKind::ServerError,
            ApiError::NetworkError { .. } => ErrorKind::NetworkError,
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Human-readable message for the view layer
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn network(message: &str, source: reqwest::Error) -> Self {
        ApiError::NetworkError {
            message: message.to_string(),
            source,
        }
    }

    /// Server error carrying `body` verbatim, or `fallback` when the body is
    /// empty
    pub(crate) fn server(body: String, fallback: &str) -> Self {
        if body.trim().is_empty() {
            ApiError::ServerError(fallback.to_string())
        } else {
            ApiError::ServerError(body)
        }
    }
}
