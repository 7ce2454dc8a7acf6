//! Error taxonomy for calls against the Medilabo API.

use thiserror::Error;

/// Why a backend call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// 401: the session cookie is missing or expired.
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    /// Any other 4xx, typically a validation failure.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// 5xx from the API.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl BackendError {
    /// Map a non-2xx status code and its body text.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => BackendError::Unauthorized,
            404 => BackendError::NotFound,
            400..=499 => BackendError::Rejected { status, message },
            _ => BackendError::Server { status, message },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Unauthorized)
    }
}

/// A draft field update that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidValue { field: String, value: String },
}

/// A config file that exists but could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(String),
    #[error("invalid config file: {0}")]
    Parse(String),
}
