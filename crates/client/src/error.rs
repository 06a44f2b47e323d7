use thiserror::Error;

use stockroom_core::DomainError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the body's `message` field when present.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ClientError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Parse(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
