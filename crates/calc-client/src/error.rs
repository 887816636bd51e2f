use thiserror::Error;

use crate::transport::TransportError;

/// Every failure a handler can surface.
///
/// `Display` is the exact text shown to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// Client-side check failed; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// Login or registration was rejected.
    #[error("{0}")]
    Auth(String),
    #[error("{message}")]
    Request { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("Invalid response from server: {0}")]
    Decode(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.0)
    }
}

impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}
